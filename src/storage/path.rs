use std::path::{Component, Path};
use thiserror::Error;

/// URI scheme of the distributed filesystem
pub const XPN_SCHEME: &str = "xpn://";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Object path contains parent directory (..)")]
    ContainsParentDir,

    #[error("Object path contains invalid component")]
    InvalidComponent,

    #[error("Object path contains null byte")]
    NullByte,

    #[error("Object path is empty")]
    Empty,
}

/// Strip the `xpn://` scheme and leading slashes.
///
/// `xpn:///data/a.txt`, `/data/a.txt` and `data/a.txt` all name the same
/// object relative to a backend root.
pub fn object_key(path: &str) -> Result<&str, PathError> {
    let key = path.strip_prefix(XPN_SCHEME).unwrap_or(path);
    let key = key.trim_start_matches('/');

    if key.is_empty() {
        return Err(PathError::Empty);
    }

    // \0 would end the path early at the OS boundary
    if key.contains('\0') {
        return Err(PathError::NullByte);
    }

    for component in Path::new(key).components() {
        match component {
            Component::Normal(_) | Component::CurDir => continue,
            Component::ParentDir => return Err(PathError::ContainsParentDir),
            // leading slashes are gone, so these only show up on Windows
            Component::RootDir | Component::Prefix(_) => {
                return Err(PathError::InvalidComponent)
            }
        }
    }

    Ok(key)
}
