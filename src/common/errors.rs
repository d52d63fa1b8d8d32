use std::io;
use thiserror::Error;

/// Failures of a single partition read.
///
/// Every variant is fatal to the read in progress and is returned to the
/// caller; nothing here is turned into an empty result.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Open or read failed: missing object, permissions, network.
    #[error("Storage unavailable for {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Decoding { path: String, valid_up_to: usize },

    #[error("Window of {length} bytes does not fit in memory")]
    WindowTooLarge { length: u64 },

    #[error("Partition reader is closed")]
    Closed,
}

impl ReadError {
    pub fn storage(path: &str, source: io::Error) -> Self {
        ReadError::StorageUnavailable {
            path: path.to_string(),
            source,
        }
    }

    /// Path of the object the failure is tied to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            ReadError::StorageUnavailable { path, .. } | ReadError::Decoding { path, .. } => {
                Some(path)
            }
            ReadError::WindowTooLarge { .. } | ReadError::Closed => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
