//! Reduction of one bucket to its representative record

use crate::series_core::SnapshotRecord;

/// Mean of each counter rounded half-up, stamped with the middle sample's timestamp
///
/// `group` must be in chronological order; for even sizes the element at
/// `len / 2` (just after the midpoint) supplies the timestamp.
/// Returns `None` for an empty group.
pub fn representative(group: &[SnapshotRecord]) -> Option<SnapshotRecord> {
    let middle = group.get(group.len() / 2)?;
    let n = group.len() as u128;

    let mean = |field: fn(&SnapshotRecord) -> u64| -> u64 {
        let sum: u128 = group.iter().map(|r| u128::from(field(r))).sum();
        rounded_mean(sum, n)
    };

    Some(SnapshotRecord {
        timestamp: middle.timestamp,
        total: mean(|r| r.total),
        local: mean(|r| r.local),
        remote: mean(|r| r.remote),
        both: mean(|r| r.both),
    })
}

/// `round(sum / n)` with ties rounding up, in exact integer arithmetic
fn rounded_mean(sum: u128, n: u128) -> u64 {
    // The mean of u64 values never exceeds u64::MAX
    ((2 * sum + n) / (2 * n)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(hour: u32, total: u64, local: u64, remote: u64, both: u64) -> SnapshotRecord {
        SnapshotRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, hour, 0, 0).unwrap(),
            total,
            local,
            remote,
            both,
        }
    }

    #[test]
    fn test_two_samples_round_half_up() {
        let group = vec![sample(0, 10, 6, 4, 0), sample(12, 12, 7, 5, 1)];
        let rep = representative(&group).unwrap();

        assert_eq!(rep.total, 11);
        assert_eq!(rep.local, 7);
        assert_eq!(rep.remote, 5);
        assert_eq!(rep.both, 1);
        assert_eq!(rep.timestamp, group[1].timestamp);
    }

    #[test]
    fn test_odd_group_uses_middle_timestamp() {
        let group = vec![sample(0, 1, 1, 0, 0), sample(1, 2, 2, 0, 0), sample(2, 4, 4, 0, 0)];
        let rep = representative(&group).unwrap();

        assert_eq!(rep.timestamp, group[1].timestamp);
        // 7 / 3 = 2.33
        assert_eq!(rep.total, 2);
    }

    #[test]
    fn test_rounding_boundaries() {
        assert_eq!(rounded_mean(5, 2), 3); // 2.5
        assert_eq!(rounded_mean(7, 4), 2); // 1.75
        assert_eq!(rounded_mean(5, 4), 1); // 1.25
        assert_eq!(rounded_mean(0, 3), 0);
        assert_eq!(rounded_mean(u128::from(u64::MAX) * 2, 2), u64::MAX);
    }

    #[test]
    fn test_mean_within_group_range() {
        let totals = [3u64, 9, 4, 17, 8, 8, 1];
        for len in 1..=totals.len() {
            let group: Vec<_> = totals[..len]
                .iter()
                .enumerate()
                .map(|(i, &t)| sample(i as u32, t, 0, 0, 0))
                .collect();
            let rep = representative(&group).unwrap();
            let min = *totals[..len].iter().min().unwrap();
            let max = *totals[..len].iter().max().unwrap();
            assert!(rep.total >= min && rep.total <= max, "len {}: {}", len, rep.total);
        }
    }

    #[test]
    fn test_empty_group() {
        assert!(representative(&[]).is_none());
    }
}
