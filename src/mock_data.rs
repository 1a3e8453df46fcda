//! Random-walk series for local development of the dashboard

use crate::error::Result;
use crate::series_core::{Granularity, SeriesStore, SnapshotRecord};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::BTreeMap;

/// Samples written per granularity by `seed_store`, with their spacing
pub fn seed_plan() -> [(Granularity, usize, Duration); 4] {
    [
        (Granularity::Finest, 24, Duration::hours(1)),
        (Granularity::Daily, 30, Duration::days(1)),
        (Granularity::Weekly, 12, Duration::weeks(1)),
        (Granularity::Monthly, 12, Duration::days(30)),
    ]
}

/// `count` samples spaced `interval` apart, the last one at `end`
pub fn generate_series<R: Rng>(
    count: usize,
    interval: Duration,
    end: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SnapshotRecord> {
    let mut total: i64 = rng.gen_range(80..100);
    let mut local: i64 = rng.gen_range(30..60);
    let mut remote: i64 = rng.gen_range(20..40);
    let mut both: i64 = rng.gen_range(10..20);

    (0..count)
        .map(|i| {
            total += rng.gen_range(-2..=2);
            local += rng.gen_range(-1..=1);
            remote += rng.gen_range(-1..=1);
            both += rng.gen_range(-1..=1);

            let steps_back = (count - i - 1) as i32;
            SnapshotRecord {
                timestamp: end - interval * steps_back,
                total: total.max((local + remote - both).max(0)).max(0) as u64,
                local: local.max(0) as u64,
                remote: remote.max(0) as u64,
                both: both.max(0) as u64,
            }
        })
        .collect()
}

/// Replace the store's partitions with generated series for every granularity.
/// Returns the number of records written.
pub fn seed_store<S, R>(store: &S, end: DateTime<Utc>, rng: &mut R) -> Result<usize>
where
    S: SeriesStore + ?Sized,
    R: Rng,
{
    let mut written = 0;

    for (granularity, count, interval) in seed_plan() {
        let mut partitions: BTreeMap<String, Vec<SnapshotRecord>> = BTreeMap::new();
        for record in generate_series(count, interval, end, rng) {
            partitions.entry(record.partition_key()).or_default().push(record);
        }

        for (partition, records) in &partitions {
            store.write(records, granularity, partition)?;
            written += records.len();
        }

        log::info!("🎲 Generated {} {} samples", count, granularity);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series_core::{CsvSeriesStore, SeriesReader};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_series(24, Duration::hours(1), end(), &mut rng);

        assert_eq!(series.len(), 24);
        assert_eq!(series.last().unwrap().timestamp, end());
        assert_eq!(series[0].timestamp, end() - Duration::hours(23));
        assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_total_covers_categories() {
        let mut rng = StdRng::seed_from_u64(42);
        for record in generate_series(50, Duration::hours(1), end(), &mut rng) {
            assert!(record.total + record.both >= record.local + record.remote, "{:?}", record);
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = generate_series(10, Duration::days(1), end(), &mut StdRng::seed_from_u64(3));
        let b = generate_series(10, Duration::days(1), end(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_store_fills_every_granularity() {
        let dir = tempdir().unwrap();
        let store = CsvSeriesStore::new(dir.path());

        let written = seed_store(&store, end(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(written, 24 + 30 + 12 + 12);

        let reader = SeriesReader::new(&store);
        for (granularity, count, _) in seed_plan() {
            assert_eq!(reader.read(granularity).unwrap().len(), count, "{}", granularity);
        }
    }
}
