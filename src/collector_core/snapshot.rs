//! Snapshot collection: drain the registry listing and count server categories

use super::classifier::{classify, Classification};
use super::registry_client::RegistrySource;
use crate::error::Result;
use crate::series_core::{Granularity, SeriesStore, SnapshotRecord};
use chrono::{DateTime, Utc};

/// Running category counters for one collection cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotCounts {
    pub total: u64,
    pub local: u64,
    pub remote: u64,
    pub both: u64,
}

impl SnapshotCounts {
    pub fn add(&mut self, classification: Classification) {
        self.total += 1;
        if classification.is_local {
            self.local += 1;
        }
        if classification.is_remote {
            self.remote += 1;
        }
        if classification.is_both {
            self.both += 1;
        }
    }

    pub fn into_record(self, timestamp: DateTime<Utc>) -> SnapshotRecord {
        SnapshotRecord {
            timestamp,
            total: self.total,
            local: self.local,
            remote: self.remote,
            both: self.both,
        }
    }
}

pub struct SnapshotCollector<'a, R: RegistrySource + ?Sized> {
    source: &'a R,
}

impl<'a, R: RegistrySource + ?Sized> SnapshotCollector<'a, R> {
    pub fn new(source: &'a R) -> Self {
        Self { source }
    }

    /// Page through the whole listing and build one snapshot stamped `started_at`.
    ///
    /// Any page failure aborts the cycle; no partial snapshot is returned.
    pub async fn collect(&self, started_at: DateTime<Utc>) -> Result<SnapshotRecord> {
        let mut counts = SnapshotCounts::default();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.source.fetch_page(cursor.as_deref()).await?;
            pages += 1;

            for server in &page.servers {
                counts.add(classify(server));
            }

            log::debug!(
                "Page {}: {} servers (running total {})",
                pages,
                page.servers.len(),
                counts.total
            );

            match page.next_cursor() {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }

        log::info!(
            "📊 Collected {} servers across {} pages (local {}, remote {}, both {})",
            counts.total,
            pages,
            counts.local,
            counts.remote,
            counts.both
        );

        Ok(counts.into_record(started_at))
    }
}

/// One collection cycle: collect a snapshot and append it to the finest series.
///
/// `started_at` is captured once by the caller and stamps the whole snapshot.
pub async fn run_collection_cycle<R, S>(
    source: &R,
    store: &S,
    started_at: DateTime<Utc>,
) -> Result<SnapshotRecord>
where
    R: RegistrySource + ?Sized,
    S: SeriesStore + ?Sized,
{
    let record = SnapshotCollector::new(source).collect(started_at).await?;
    store.append(&record, Granularity::Finest)?;

    log::info!(
        "✅ Snapshot appended to {} partition {}",
        Granularity::Finest,
        record.partition_key()
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector_core::classifier::ServerEntry;
    use crate::collector_core::registry_client::{PageMetadata, RegistryPage};
    use crate::error::TrendsError;
    use crate::series_core::CsvSeriesStore;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Serves pages keyed by cursor "p<index>", optionally failing at one index
    struct PagedSource {
        pages: Vec<Vec<ServerEntry>>,
        fail_at: Option<usize>,
        cursors_seen: Mutex<Vec<Option<String>>>,
    }

    impl PagedSource {
        fn new(pages: Vec<Vec<ServerEntry>>) -> Self {
            Self {
                pages,
                fail_at: None,
                cursors_seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RegistrySource for PagedSource {
        async fn fetch_page(&self, cursor: Option<&str>) -> Result<RegistryPage> {
            self.cursors_seen.lock().unwrap().push(cursor.map(str::to_string));

            let idx = cursor
                .and_then(|c| c.strip_prefix('p'))
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0);
            if self.fail_at == Some(idx) {
                return Err(TrendsError::Fetch(format!("page {} unavailable", idx)));
            }

            let next_cursor = (idx + 1 < self.pages.len()).then(|| format!("p{}", idx + 1));
            Ok(RegistryPage {
                servers: self.pages[idx].clone(),
                metadata: PageMetadata { next_cursor },
            })
        }
    }

    fn local_server() -> ServerEntry {
        ServerEntry {
            packages: Some(vec![json!({"name": "pkg"})]),
            ..Default::default()
        }
    }

    fn remote_server() -> ServerEntry {
        ServerEntry {
            remotes: Some(vec![json!({"uri": "https://example.com"})]),
            ..Default::default()
        }
    }

    fn hybrid_server() -> ServerEntry {
        ServerEntry {
            packages: Some(vec![json!({"name": "pkg"})]),
            remotes: Some(vec![json!({"uri": "https://example.com"})]),
            ..Default::default()
        }
    }

    fn started_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_accumulate_independently() {
        let mut counts = SnapshotCounts::default();
        for server in [local_server(), remote_server(), hybrid_server(), ServerEntry::default()] {
            counts.add(classify(&server));
        }

        assert_eq!(
            counts,
            SnapshotCounts { total: 4, local: 3, remote: 2, both: 1 }
        );
    }

    #[tokio::test]
    async fn test_collect_walks_all_pages() {
        let source = PagedSource::new(vec![
            vec![local_server(), remote_server()],
            vec![hybrid_server()],
            vec![ServerEntry::default(), remote_server()],
        ]);

        let record = SnapshotCollector::new(&source).collect(started_at()).await.unwrap();

        assert_eq!(record.timestamp, started_at());
        assert_eq!((record.total, record.local, record.remote, record.both), (5, 3, 3, 1));
        assert_eq!(
            *source.cursors_seen.lock().unwrap(),
            vec![None, Some("p1".to_string()), Some("p2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_registry_snapshot() {
        let source = PagedSource::new(vec![vec![]]);
        let record = SnapshotCollector::new(&source).collect(started_at()).await.unwrap();

        assert_eq!(record, SnapshotRecord::zeroed(started_at()));
    }

    #[tokio::test]
    async fn test_cycle_appends_one_row() {
        let dir = tempdir().unwrap();
        let store = CsvSeriesStore::new(dir.path());
        let source = PagedSource::new(vec![vec![local_server()], vec![remote_server()]]);

        run_collection_cycle(&source, &store, started_at()).await.unwrap();

        let rows = store.read_partition(Granularity::Finest, "2025-09").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 2);
    }

    #[tokio::test]
    async fn test_failed_page_appends_nothing() {
        let dir = tempdir().unwrap();
        let store = CsvSeriesStore::new(dir.path());
        let mut source = PagedSource::new(vec![
            vec![local_server()],
            vec![remote_server()],
            vec![hybrid_server()],
        ]);
        source.fail_at = Some(1);

        let result = run_collection_cycle(&source, &store, started_at()).await;

        assert!(matches!(result, Err(TrendsError::Fetch(_))));
        assert!(store.list_partitions(Granularity::Finest).unwrap().is_empty());
    }
}
