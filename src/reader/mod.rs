//! Byte-range line extraction.
//!
//! [`RangeLineReader::open`] fetches one partition window and returns a
//! lazy [`Lines`] iterator over it. The read handle is dropped before
//! `open` returns, so abandoning the iterator releases nothing further.

mod factory;
mod lines;

pub use factory::{PartitionReader, ReaderFactory, ReaderState};
pub use lines::Lines;

use crate::common::{BoundaryPolicy, DecodePolicy, ReadError, ReaderConfig, Result};
use crate::partition::PartitionDescriptor;
use crate::storage::io::{read_through_newline, read_window};
use crate::storage::Storage;
use positioned_io::ReadAt;

#[derive(Debug, Clone)]
pub struct RangeLineReader<S> {
    storage: S,
    config: ReaderConfig,
}

impl<S: Storage> RangeLineReader<S> {
    pub fn new(storage: S, config: ReaderConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the window described by `partition` and split it into lines.
    pub fn open(&self, partition: &PartitionDescriptor) -> Result<Lines> {
        let path = partition.path.as_str();
        let length = usize::try_from(partition.length).map_err(|_| ReadError::WindowTooLarge {
            length: partition.length,
        })?;

        let bytes = {
            let handle = self
                .storage
                .open(path)
                .map_err(|e| ReadError::storage(path, e))?;

            let read = match self.config.boundary {
                BoundaryPolicy::Exact => read_window(&handle, partition.start, length),
                BoundaryPolicy::LineAligned => aligned_window(
                    &handle,
                    partition.start,
                    length,
                    self.config.overscan_step(),
                ),
            };
            read.map_err(|e| ReadError::storage(path, e))?
        };

        tracing::debug!(
            path,
            start = partition.start,
            length = partition.length,
            bytes_read = bytes.len(),
            boundary = ?self.config.boundary,
            "Read partition window"
        );

        let text = decode(bytes, self.config.decode, path)?;

        Ok(match self.config.boundary {
            BoundaryPolicy::Exact => Lines::segments(text, self.config.trim),
            BoundaryPolicy::LineAligned => Lines::records(text, self.config.trim),
        })
    }
}

/// Bytes of every line whose first byte lies in `[start, start + length)`.
///
/// A leading partial line belongs to the previous window and is skipped.
/// The last line is completed past the window end, `step` bytes at a time.
fn aligned_window<H: ReadAt + ?Sized>(
    handle: &H,
    start: u64,
    length: usize,
    step: usize,
) -> std::io::Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }

    // one byte of lookbehind tells whether `start` opens a line
    let lead = usize::from(start > 0);
    let read_from = start - lead as u64;
    let wanted = length.saturating_add(lead);
    let mut buf = read_window(handle, read_from, wanted)?;

    let skip = if lead == 0 {
        0
    } else {
        match buf.iter().position(|&b| b == b'\n') {
            Some(i) => i + 1,
            // the whole window sits inside a line owned by an earlier window
            None => return Ok(Vec::new()),
        }
    };

    if skip >= buf.len() {
        return Ok(Vec::new());
    }

    if buf.len() == wanted && buf.last() != Some(&b'\n') {
        let tail = read_through_newline(handle, read_from.saturating_add(buf.len() as u64), step)?;
        buf.extend_from_slice(&tail);
    }

    buf.drain(..skip);
    Ok(buf)
}

fn decode(bytes: Vec<u8>, policy: DecodePolicy, path: &str) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            match policy {
                DecodePolicy::Strict => Err(ReadError::Decoding {
                    path: path.to_string(),
                    valid_up_to,
                }),
                DecodePolicy::Lossy => {
                    tracing::warn!(path, valid_up_to, "Replacing invalid UTF-8 in window");
                    Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
                }
            }
        }
    }
}
