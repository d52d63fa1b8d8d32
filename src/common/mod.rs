pub mod config;
pub mod errors;

pub use config::{BoundaryPolicy, DecodePolicy, ReaderConfig, TrimPolicy};
pub use errors::{ReadError, Result};
