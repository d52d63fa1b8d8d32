use super::{invalid_path, object_key, Storage};
use dashmap::DashMap;
use positioned_io::ReadAt;
use std::io;
use std::sync::Arc;

/// In-memory object store, safe to share across reader threads
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<DashMap<String, Arc<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` at `path`, replacing any previous object.
    ///
    /// Handles already open keep reading the old contents.
    pub fn insert(&self, path: &str, data: impl Into<Vec<u8>>) -> io::Result<()> {
        let key = object_key(path).map_err(invalid_path)?;
        self.objects.insert(key.to_string(), Arc::new(data.into()));
        Ok(())
    }

    pub fn remove(&self, path: &str) -> bool {
        match object_key(path) {
            Ok(key) => self.objects.remove(key).is_some(),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn get(&self, path: &str) -> io::Result<Arc<Vec<u8>>> {
        let key = object_key(path).map_err(invalid_path)?;
        self.objects
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no such object: {}", key))
            })
    }
}

impl Storage for MemoryStorage {
    type Handle = MemoryHandle;

    fn open(&self, path: &str) -> io::Result<MemoryHandle> {
        self.get(path).map(MemoryHandle::new)
    }

    fn size(&self, path: &str) -> io::Result<u64> {
        Ok(self.get(path)?.len() as u64)
    }
}

/// Snapshot of one in-memory object
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    data: Arc<Vec<u8>>,
}

impl MemoryHandle {
    pub fn new(data: Arc<Vec<u8>>) -> Self {
        Self { data }
    }
}

impl ReadAt for MemoryHandle {
    fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.data.len() as u64;
        if pos >= len {
            return Ok(0);
        }

        let start = pos as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }
}
