//! Rollup engine: recomputes daily, weekly and monthly series from the finest series

use super::bucket::bucket_key;
use super::reduce::representative;
use crate::error::Result;
use crate::series_core::{Granularity, SeriesStore, SnapshotRecord};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupSummary {
    /// Finest partitions that produced rollup output
    pub partitions_processed: usize,
    /// Finest partitions skipped because they held no records
    pub partitions_empty: usize,
    pub records_written: usize,
}

pub struct RollupEngine<'a, S: SeriesStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SeriesStore + ?Sized> RollupEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Rebuild every rollup partition from the finest series.
    ///
    /// Each rollup file is replaced whole, so repeated runs over unchanged
    /// input produce identical output.
    pub fn run(&self) -> Result<RollupSummary> {
        let mut summary = RollupSummary::default();

        let partitions = self.store.list_partitions(Granularity::Finest)?;
        if partitions.is_empty() {
            log::info!("No {} data to aggregate", Granularity::Finest);
            return Ok(summary);
        }

        for partition in partitions {
            let written = self.rollup_partition(&partition)?;
            if written == 0 {
                summary.partitions_empty += 1;
            } else {
                summary.partitions_processed += 1;
                summary.records_written += written;
            }
        }

        log::info!(
            "✅ Rollup complete: {} partitions, {} records written, {} empty partitions skipped",
            summary.partitions_processed,
            summary.records_written,
            summary.partitions_empty
        );
        Ok(summary)
    }

    /// Roll up one finest partition into all coarser granularities.
    /// Returns the number of records written.
    pub fn rollup_partition(&self, partition: &str) -> Result<usize> {
        let records = self.store.read_partition(Granularity::Finest, partition)?;
        if records.is_empty() {
            log::debug!("Partition {} has no records, skipping", partition);
            return Ok(0);
        }

        log::info!("📊 Processing {} ({} samples)", partition, records.len());

        let mut written = 0;
        for granularity in Granularity::rollups() {
            let rolled = rollup_records(&records, granularity);
            self.store.write(&rolled, granularity, partition)?;
            log::debug!("   └─ {} {}: {} records", granularity, partition, rolled.len());
            written += rolled.len();
        }

        Ok(written)
    }
}

/// Group `records` by bucket and reduce each bucket to one record.
///
/// Group membership does not depend on input order; within a group the
/// representative timestamp is picked in chronological order. Output is
/// ordered by bucket.
pub fn rollup_records(records: &[SnapshotRecord], granularity: Granularity) -> Vec<SnapshotRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.timestamp);

    let mut buckets: BTreeMap<String, Vec<SnapshotRecord>> = BTreeMap::new();
    for record in sorted {
        buckets
            .entry(bucket_key(granularity, &record.timestamp))
            .or_default()
            .push(record);
    }

    buckets
        .values()
        .filter_map(|group| representative(group))
        .collect()
}
