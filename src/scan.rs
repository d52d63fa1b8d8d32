use crate::common::ReaderConfig;
use crate::partition::PartitionDescriptor;
use crate::reader::ReaderFactory;
use crate::storage::Storage;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Cut `[0, size)` into contiguous windows of `split_size` bytes.
/// The last window may be shorter.
pub fn plan_windows(path: &str, size: u64, split_size: u64) -> Vec<PartitionDescriptor> {
    let split_size = split_size.max(1);
    let mut windows = Vec::with_capacity(size.div_ceil(split_size) as usize);

    let mut start = 0;
    while start < size {
        let length = split_size.min(size - start);
        windows.push(PartitionDescriptor::new(path, start, length));
        start += length;
    }

    windows
}

/// Output of a whole-object scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub partitions: usize,
    pub lines: Vec<String>,
}

/// Read every window of the object on the blocking pool, one task per
/// partition, and return all lines in object order.
///
/// `config.boundary` is honoured as given; use
/// [`ReaderConfig::line_aligned`] to get each line exactly once.
pub async fn scan_object<S>(
    storage: Arc<S>,
    config: ReaderConfig,
    path: &str,
    split_size: u64,
) -> Result<ScanResult>
where
    S: Storage + 'static,
{
    let size = storage
        .size(path)
        .with_context(|| format!("Failed to stat {}", path))?;
    let windows = plan_windows(path, size, split_size);
    let partitions = windows.len();

    tracing::info!(path, size, partitions, "Scanning object");

    let factory = ReaderFactory::shared(storage, config);
    let tasks = windows.into_iter().map(|partition| {
        let reader = factory.line_reader();
        let label = partition.to_string();
        let task = tokio::task::spawn_blocking(move || {
            reader
                .open(&partition)
                .map(|lines| lines.collect::<Vec<_>>())
        });
        async move { (label, task.await) }
    });

    // join_all keeps task order, which is object order
    let mut lines = Vec::new();
    for (label, joined) in futures::future::join_all(tasks).await {
        let partition_lines = joined
            .context("Partition task panicked")?
            .with_context(|| format!("Failed to read partition {}", label))?;
        tracing::debug!(partition = %label, lines = partition_lines.len(), "Partition done");
        lines.extend(partition_lines);
    }

    Ok(ScanResult { partitions, lines })
}
