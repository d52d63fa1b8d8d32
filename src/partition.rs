use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous byte window `[start, start + length)` of one object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionDescriptor {
    pub path: String,
    pub start: u64,
    pub length: u64,
}

impl PartitionDescriptor {
    pub fn new(path: impl Into<String>, start: u64, length: u64) -> Self {
        Self {
            path: path.into(),
            start,
            length,
        }
    }

    /// Exclusive end offset of the window
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for PartitionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{})", self.path, self.start, self.end())
    }
}

/// One output row: a single text column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub value: String,
}

impl LineRecord {
    /// Name of the only column
    pub const COLUMN: &'static str = "value";

    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl From<String> for LineRecord {
    fn from(value: String) -> Self {
        Self { value }
    }
}
