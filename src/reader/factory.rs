use super::{Lines, RangeLineReader};
use crate::common::{ReadError, ReaderConfig, Result};
use crate::partition::{LineRecord, PartitionDescriptor};
use crate::storage::Storage;
use std::sync::Arc;

/// Hands out one [`PartitionReader`] per partition over a shared store
#[derive(Debug)]
pub struct ReaderFactory<S> {
    reader: RangeLineReader<Arc<S>>,
}

impl<S> Clone for ReaderFactory<S> {
    fn clone(&self) -> Self {
        Self {
            reader: RangeLineReader {
                storage: Arc::clone(&self.reader.storage),
                config: self.reader.config.clone(),
            },
        }
    }
}

impl<S: Storage> ReaderFactory<S> {
    pub fn new(storage: S, config: ReaderConfig) -> Self {
        Self::shared(Arc::new(storage), config)
    }

    pub fn shared(storage: Arc<S>, config: ReaderConfig) -> Self {
        Self {
            reader: RangeLineReader::new(storage, config),
        }
    }

    /// Line reader over the shared store, for callers that want the
    /// plain iterator instead of the partition-reader protocol.
    pub fn line_reader(&self) -> RangeLineReader<Arc<S>> {
        self.clone().reader
    }

    /// Nothing is read until the first `advance`.
    pub fn create_reader(&self, partition: PartitionDescriptor) -> PartitionReader<S> {
        PartitionReader {
            reader: self.line_reader(),
            partition,
            state: State::Unopened,
            current: None,
        }
    }
}

/// Observable lifecycle of a [`PartitionReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Unopened,
    Reading,
    Exhausted,
    Closed,
}

#[derive(Debug)]
enum State {
    Unopened,
    Reading(Lines),
    Exhausted,
    Closed,
}

/// Row-at-a-time reader for one partition.
///
/// `advance` moves to the next record and reports whether one is
/// current; `get` returns it. A failed open is reported once and leaves
/// the reader exhausted.
#[derive(Debug)]
pub struct PartitionReader<S> {
    reader: RangeLineReader<Arc<S>>,
    partition: PartitionDescriptor,
    state: State,
    current: Option<LineRecord>,
}

impl<S: Storage> PartitionReader<S> {
    pub fn descriptor(&self) -> &PartitionDescriptor {
        &self.partition
    }

    pub fn state(&self) -> ReaderState {
        match self.state {
            State::Unopened => ReaderState::Unopened,
            State::Reading(_) => ReaderState::Reading,
            State::Exhausted => ReaderState::Exhausted,
            State::Closed => ReaderState::Closed,
        }
    }

    pub fn advance(&mut self) -> Result<bool> {
        loop {
            match &mut self.state {
                State::Unopened => match self.reader.open(&self.partition) {
                    Ok(lines) => self.state = State::Reading(lines),
                    Err(e) => {
                        tracing::debug!(partition = %self.partition, error = %e, "Partition open failed");
                        self.state = State::Exhausted;
                        return Err(e);
                    }
                },
                State::Reading(lines) => {
                    return match lines.next() {
                        Some(value) => {
                            self.current = Some(LineRecord::from(value));
                            Ok(true)
                        }
                        None => {
                            self.state = State::Exhausted;
                            self.current = None;
                            Ok(false)
                        }
                    };
                }
                State::Exhausted => return Ok(false),
                State::Closed => return Err(ReadError::Closed),
            }
        }
    }

    /// Record made current by the last successful `advance`
    pub fn get(&self) -> Option<&LineRecord> {
        self.current.as_ref()
    }

    /// Drop the cursor. Further `advance` calls fail with `Closed`.
    pub fn close(&mut self) {
        self.state = State::Closed;
        self.current = None;
    }
}

impl<S: Storage> Iterator for PartitionReader<S> {
    type Item = Result<LineRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current.take().map(Ok),
            Ok(false) => None,
            Err(ReadError::Closed) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
