#![allow(dead_code)]

use rangeline::{LocalStorage, PartitionDescriptor, RangeLineReader, ReaderConfig, Storage};
use tempfile::TempDir;

pub const SAMPLE: &str = "alpha\nbeta \n gamma\n";
pub const SAMPLE_PATH: &str = "xpn:///data/sample.txt";

pub fn setup_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Local store rooted at a fresh temp dir holding `data/sample.txt`
pub fn sample_storage(content: &[u8]) -> (TempDir, LocalStorage) {
    let temp_dir = setup_temp_dir();
    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("sample.txt"), content).unwrap();

    let storage = LocalStorage::new(temp_dir.path());
    (temp_dir, storage)
}

pub fn read_lines<S: Storage>(
    reader: &RangeLineReader<S>,
    path: &str,
    start: u64,
    length: u64,
) -> Vec<String> {
    reader
        .open(&PartitionDescriptor::new(path, start, length))
        .expect("read should succeed")
        .collect()
}

/// Lines of every contiguous `split`-byte window, in order
pub fn read_in_windows<S: Storage>(
    reader: &RangeLineReader<S>,
    path: &str,
    size: u64,
    split: u64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    while start < size {
        let length = split.min(size - start);
        lines.extend(read_lines(reader, path, start, length));
        start += length;
    }
    lines
}

pub fn exact() -> ReaderConfig {
    ReaderConfig::exact()
}
