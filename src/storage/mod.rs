//! Byte-addressable object stores the reader pulls windows from.
//!
//! A backend only has to open an object by path and hand back something
//! that implements [`positioned_io::ReadAt`]. Reads are positional, so a
//! handle carries no cursor and needs no locking.

pub mod io;
mod local;
mod memory;
pub mod path;

pub use local::LocalStorage;
pub use memory::{MemoryHandle, MemoryStorage};
pub use path::{object_key, PathError};

use positioned_io::ReadAt;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    /// Read handle for one object; released on drop
    type Handle: ReadAt;

    /// Open the object at `path`
    fn open(&self, path: &str) -> std::io::Result<Self::Handle>;

    /// Total size of the object in bytes
    fn size(&self, path: &str) -> std::io::Result<u64>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    type Handle = S::Handle;

    fn open(&self, path: &str) -> std::io::Result<Self::Handle> {
        (**self).open(path)
    }

    fn size(&self, path: &str) -> std::io::Result<u64> {
        (**self).size(path)
    }
}

fn invalid_path(err: PathError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
}
