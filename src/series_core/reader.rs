//! Read path for the dashboard: chronological series per granularity

use super::record::{Granularity, SnapshotRecord};
use super::store_backend::SeriesStore;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub hourly: Vec<SnapshotRecord>,
    pub daily: Vec<SnapshotRecord>,
    pub weekly: Vec<SnapshotRecord>,
    pub monthly: Vec<SnapshotRecord>,
    /// Last finest-granularity record, or a zeroed record stamped `now`
    pub latest: SnapshotRecord,
}

impl DashboardData {
    pub fn series(&self, granularity: Granularity) -> &[SnapshotRecord] {
        match granularity {
            Granularity::Finest => &self.hourly,
            Granularity::Daily => &self.daily,
            Granularity::Weekly => &self.weekly,
            Granularity::Monthly => &self.monthly,
        }
    }
}

pub struct SeriesReader<'a, S: SeriesStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SeriesStore + ?Sized> SeriesReader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All records of `granularity` across partitions, oldest first.
    /// Missing data yields an empty series.
    pub fn read(&self, granularity: Granularity) -> Result<Vec<SnapshotRecord>> {
        let mut records = Vec::new();
        for partition in self.store.list_partitions(granularity)? {
            records.extend(self.store.read_partition(granularity, &partition)?);
        }

        // Stable: equal timestamps keep their stored order
        records.sort_by_key(|record| record.timestamp);
        Ok(records)
    }

    pub fn latest(&self, now: DateTime<Utc>) -> Result<SnapshotRecord> {
        Ok(latest_or_zeroed(&self.read(Granularity::Finest)?, now))
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardData> {
        let hourly = self.read(Granularity::Finest)?;
        let latest = latest_or_zeroed(&hourly, now);

        Ok(DashboardData {
            hourly,
            daily: self.read(Granularity::Daily)?,
            weekly: self.read(Granularity::Weekly)?,
            monthly: self.read(Granularity::Monthly)?,
            latest,
        })
    }

    /// Write the dashboard document as pretty JSON, replacing `path` atomically
    pub fn export_dashboard(&self, path: &Path, now: DateTime<Utc>) -> Result<DashboardData> {
        let data = self.dashboard(now)?;
        let json = serde_json::to_string_pretty(&data)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        let counts: Vec<String> = Granularity::all()
            .iter()
            .map(|g| format!("{} {}", data.series(*g).len(), g))
            .collect();
        log::info!("📝 Dashboard exported to {} ({})", path.display(), counts.join(", "));
        Ok(data)
    }
}

fn latest_or_zeroed(series: &[SnapshotRecord], now: DateTime<Utc>) -> SnapshotRecord {
    series
        .last()
        .cloned()
        .unwrap_or_else(|| SnapshotRecord::zeroed(now))
}
