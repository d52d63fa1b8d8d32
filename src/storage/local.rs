use super::{invalid_path, object_key, Storage};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Objects are files under a root directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let key = object_key(path).map_err(invalid_path)?;
        Ok(self.root.join(key))
    }
}

impl Storage for LocalStorage {
    type Handle = File;

    fn open(&self, path: &str) -> io::Result<File> {
        let resolved = self.resolve(path)?;
        tracing::trace!(path, resolved = %resolved.display(), "Opening local object");
        File::open(resolved)
    }

    fn size(&self, path: &str) -> io::Result<u64> {
        Ok(std::fs::metadata(self.resolve(path)?)?.len())
    }
}
