//! Storage backend trait for snapshot series
//!
//! Defines the interface the collector, rollup engine and reader use to reach
//! partitioned series storage. Callers must not overlap writes to the same
//! partition/granularity pair; backends provide no locking.

use super::record::{Granularity, SnapshotRecord};
use crate::error::Result;

/// How to treat rows that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Skip the row and log a warning
    #[default]
    Lenient,
    /// Fail the read with `TrendsError::MalformedRecord`
    Strict,
}

/// Backend trait for partitioned snapshot series
pub trait SeriesStore {
    /// Append one record to the partition derived from its timestamp.
    /// Existing content is never reordered or deduplicated.
    fn append(&self, record: &SnapshotRecord, granularity: Granularity) -> Result<()>;

    /// Replace the whole partition/granularity resource with `records`
    fn write(&self, records: &[SnapshotRecord], granularity: Granularity, partition: &str) -> Result<()>;

    /// Partition keys with existing content, ascending. A missing root is empty.
    fn list_partitions(&self, granularity: Granularity) -> Result<Vec<String>>;

    /// Records of one partition in stored order. A missing partition is empty.
    fn read_partition(&self, granularity: Granularity, partition: &str) -> Result<Vec<SnapshotRecord>>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
