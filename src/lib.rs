pub mod common;
pub mod partition;
pub mod reader;
pub mod scan;
pub mod storage;

pub use common::{ReadError, ReaderConfig};
pub use partition::{LineRecord, PartitionDescriptor};
pub use reader::{Lines, PartitionReader, RangeLineReader, ReaderFactory};
pub use storage::{LocalStorage, MemoryStorage, Storage};
