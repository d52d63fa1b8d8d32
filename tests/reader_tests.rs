mod common;

use common::{exact, read_in_windows, read_lines, sample_storage, SAMPLE, SAMPLE_PATH};
use rangeline::common::{DecodePolicy, TrimPolicy};
use rangeline::reader::ReaderState;
use rangeline::{
    LineRecord, PartitionDescriptor, RangeLineReader, ReadError, ReaderConfig, ReaderFactory,
};

#[test]
fn test_sample_scenario_whole_object() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    assert_eq!(
        read_lines(&reader, SAMPLE_PATH, 0, 19),
        vec!["alpha", "beta", "gamma", ""]
    );
}

#[test]
fn test_window_cut_at_word_boundary_and_mid_word() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    assert_eq!(read_lines(&reader, SAMPLE_PATH, 0, 5), vec!["alpha"]);
    assert_eq!(read_lines(&reader, SAMPLE_PATH, 0, 2), vec!["al"]);
}

#[test]
fn test_empty_object() {
    let (_dir, storage) = sample_storage(b"");
    let reader = RangeLineReader::new(storage, exact());

    assert!(read_lines(&reader, SAMPLE_PATH, 0, 0).is_empty());
    assert!(read_lines(&reader, SAMPLE_PATH, 0, 100).is_empty());
}

#[test]
fn test_repeated_reads_are_identical() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    let first = read_lines(&reader, SAMPLE_PATH, 3, 11);
    for _ in 0..5 {
        assert_eq!(read_lines(&reader, SAMPLE_PATH, 3, 11), first);
    }
}

#[test]
fn test_line_count_is_newlines_plus_one() {
    let content = "a\n b\n\n c \nlast";
    let (_dir, storage) = sample_storage(content.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    let lines = read_lines(&reader, SAMPLE_PATH, 0, content.len() as u64);
    assert_eq!(lines.len(), content.matches('\n').count() + 1);
}

#[test]
fn test_every_line_is_trimmed() {
    let content = "  a\t\n\tb  \n   \n c c \r\n";
    let (_dir, storage) = sample_storage(content.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    let lines = read_lines(&reader, SAMPLE_PATH, 0, content.len() as u64);
    assert_eq!(lines, vec!["a", "b", "", "c c", ""]);
    for line in &lines {
        assert_eq!(line.trim(), line);
    }
}

#[test]
fn test_keep_whitespace_when_configured() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let config = ReaderConfig {
        trim: TrimPolicy::Keep,
        ..exact()
    };
    let reader = RangeLineReader::new(storage, config);

    assert_eq!(
        read_lines(&reader, SAMPLE_PATH, 0, 19),
        vec!["alpha", "beta ", " gamma", ""]
    );
}

#[test]
fn test_short_read_returns_available_lines() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    assert_eq!(
        read_lines(&reader, SAMPLE_PATH, 6, 4096),
        vec!["beta", "gamma", ""]
    );
}

#[test]
fn test_aligned_windows_reproduce_whole_object() {
    let content = "first line\nsecond\n\nfourth is a bit longer\n  fifth  \nsixth";
    let size = content.len() as u64;
    let (_dir, storage) = sample_storage(content.as_bytes());
    let config = ReaderConfig {
        overscan_bytes: 3,
        ..ReaderConfig::line_aligned()
    };
    let reader = RangeLineReader::new(storage, config);

    let whole = read_lines(&reader, SAMPLE_PATH, 0, size);
    assert_eq!(
        whole,
        vec!["first line", "second", "", "fourth is a bit longer", "fifth", "sixth"]
    );

    for split in 1..=size {
        assert_eq!(
            read_in_windows(&reader, SAMPLE_PATH, size, split),
            whole,
            "split size {}",
            split
        );
    }
}

#[test]
fn test_exact_windows_split_edge_lines() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    // "alpha\nbe" | "ta \n gamma\n"
    assert_eq!(read_lines(&reader, SAMPLE_PATH, 0, 8), vec!["alpha", "be"]);
    assert_eq!(
        read_lines(&reader, SAMPLE_PATH, 8, 11),
        vec!["ta", "gamma", ""]
    );
}

#[test]
fn test_missing_object_reports_storage_unavailable() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    let err = reader
        .open(&PartitionDescriptor::new("xpn:///data/absent.txt", 0, 10))
        .unwrap_err();

    assert!(matches!(err, ReadError::StorageUnavailable { .. }));
    assert_eq!(err.path(), Some("xpn:///data/absent.txt"));
}

#[test]
fn test_path_escaping_root_is_rejected() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let reader = RangeLineReader::new(storage, exact());

    let err = reader
        .open(&PartitionDescriptor::new("../../etc/passwd", 0, 10))
        .unwrap_err();
    assert!(matches!(err, ReadError::StorageUnavailable { .. }));
}

#[test]
fn test_strict_decoding_fails_whole_partition() {
    let (_dir, storage) = sample_storage(b"good\nbad \xc3\x28\n");
    let config = ReaderConfig {
        decode: DecodePolicy::Strict,
        ..exact()
    };
    let reader = RangeLineReader::new(storage, config);

    let err = reader
        .open(&PartitionDescriptor::new(SAMPLE_PATH, 0, 64))
        .unwrap_err();
    assert!(matches!(err, ReadError::Decoding { valid_up_to: 9, .. }));
}

#[test]
fn test_partition_reader_over_local_storage() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let factory = ReaderFactory::new(storage, exact());

    let mut reader = factory.create_reader(PartitionDescriptor::new(SAMPLE_PATH, 0, 11));
    let mut records = Vec::new();
    while reader.advance().unwrap() {
        records.push(reader.get().unwrap().clone());
    }
    assert_eq!(reader.state(), ReaderState::Exhausted);
    assert_eq!(records, vec![LineRecord::new("alpha"), LineRecord::new("beta")]);

    reader.close();
    assert!(matches!(reader.advance(), Err(ReadError::Closed)));
}

#[test]
fn test_partition_reader_abandoned_early() {
    let (_dir, storage) = sample_storage(SAMPLE.as_bytes());
    let factory = ReaderFactory::new(storage, exact());

    let mut reader = factory.create_reader(PartitionDescriptor::new(SAMPLE_PATH, 0, 19));
    assert!(reader.advance().unwrap());
    reader.close();

    // a fresh reader over the same partition starts from the beginning
    let first = factory
        .create_reader(PartitionDescriptor::new(SAMPLE_PATH, 0, 19))
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(first.as_str(), "alpha");
}
