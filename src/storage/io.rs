use positioned_io::ReadAt;
use std::io;

// Scratch size for one positional read; the window grows by at most this much
const READ_CHUNK: usize = 64 * 1024; // 64 KB

/// Read up to `len` bytes starting at `start`.
///
/// Stops early at end of object, so the returned buffer may be shorter
/// than `len`. A short read is not an error. Memory grows with the bytes
/// actually read, never with `len` alone.
pub fn read_window<H: ReadAt + ?Sized>(handle: &H, start: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(len.min(READ_CHUNK));
    let mut scratch = vec![0u8; len.min(READ_CHUNK)];

    while buffer.len() < len {
        let want = (len - buffer.len()).min(scratch.len());
        let pos = start.saturating_add(buffer.len() as u64);

        match handle.read_at(pos, &mut scratch[..want]) {
            Ok(0) => break,
            Ok(n) => buffer.extend_from_slice(&scratch[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(buffer)
}

/// Read forward from `pos` in `step` sized chunks until a `\n` (included)
/// or end of object.
pub fn read_through_newline<H: ReadAt + ?Sized>(
    handle: &H,
    mut pos: u64,
    step: usize,
) -> io::Result<Vec<u8>> {
    let mut tail = Vec::new();

    loop {
        let chunk = read_window(handle, pos, step)?;
        if let Some(i) = chunk.iter().position(|&b| b == b'\n') {
            tail.extend_from_slice(&chunk[..=i]);
            return Ok(tail);
        }

        let at_end = chunk.len() < step;
        pos = pos.saturating_add(chunk.len() as u64);
        tail.extend_from_slice(&chunk);

        if at_end {
            return Ok(tail);
        }
    }
}
