//! Snapshot records, granularities and the partition row format

use crate::error::{Result, TrendsError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const CSV_HEADER: &str = "timestamp,total,local,remote,both";

/// One point-in-time measurement of registry server counts
///
/// `local`, `remote` and `both` are accumulated independently of `total`;
/// nothing reconciles `total` against `local + remote - both`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub total: u64,
    pub local: u64,
    pub remote: u64,
    pub both: u64,
}

impl SnapshotRecord {
    /// Record with all counters at zero, used when no data exists yet
    pub fn zeroed(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            total: 0,
            local: 0,
            remote: 0,
            both: 0,
        }
    }

    /// Calendar month (`YYYY-MM`) that owns this record at every granularity
    pub fn partition_key(&self) -> String {
        partition_key(&self.timestamp)
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            format_timestamp(&self.timestamp),
            self.total,
            self.local,
            self.remote,
            self.both
        )
    }

    /// Parse one data row; `line` is the 1-based line number used in errors
    pub fn from_csv_row(row: &str, line: usize) -> Result<Self> {
        let malformed = |reason: String| TrendsError::MalformedRecord { line, reason };

        let fields: Vec<&str> = row.trim().split(',').collect();
        if fields.len() != 5 {
            return Err(malformed(format!("expected 5 fields, found {}", fields.len())));
        }

        let timestamp = parse_timestamp(fields[0])
            .ok_or_else(|| malformed(format!("invalid timestamp '{}'", fields[0])))?;

        let count = |idx: usize, name: &str| -> Result<u64> {
            fields[idx]
                .trim()
                .parse::<u64>()
                .map_err(|_| malformed(format!("invalid {} '{}'", name, fields[idx])))
        };

        Ok(Self {
            timestamp,
            total: count(1, "total")?,
            local: count(2, "local")?,
            remote: count(3, "remote")?,
            both: count(4, "both")?,
        })
    }
}

/// Time resolution of a stored series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    /// Raw collection cadence (one row per collection cycle)
    Finest,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Directory name on disk and key in the dashboard document
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Finest => "hourly",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hourly" | "finest" => Some(Granularity::Finest),
            "daily" => Some(Granularity::Daily),
            "weekly" => Some(Granularity::Weekly),
            "monthly" => Some(Granularity::Monthly),
            _ => None,
        }
    }

    pub fn all() -> [Granularity; 4] {
        [
            Granularity::Finest,
            Granularity::Daily,
            Granularity::Weekly,
            Granularity::Monthly,
        ]
    }

    /// Granularities produced by the rollup engine
    pub fn rollups() -> [Granularity; 3] {
        [Granularity::Daily, Granularity::Weekly, Granularity::Monthly]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn partition_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

/// True for `YYYY-MM` strings with a valid month
pub fn is_partition_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    let digits = bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
    digits && matches!(key[5..].parse::<u32>(), Ok(1..=12))
}

/// RFC 3339, UTC, millisecond precision, `Z` suffix
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_row_format() {
        let record = SnapshotRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
            total: 12,
            local: 7,
            remote: 5,
            both: 1,
        };

        assert_eq!(record.to_csv_row(), "2025-09-01T12:00:00.000Z,12,7,5,1");
        assert_eq!(record.partition_key(), "2025-09");
        assert_eq!(SnapshotRecord::from_csv_row(&record.to_csv_row(), 2).unwrap(), record);
    }

    #[test]
    fn test_json_timestamp_matches_csv() {
        let record = SnapshotRecord::from_csv_row("2025-09-01T12:00:00.000Z,12,7,5,1", 2).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["timestamp"], "2025-09-01T12:00:00.000Z");
        assert_eq!(serde_json::from_value::<SnapshotRecord>(value).unwrap(), record);
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let record = SnapshotRecord::from_csv_row("2025-09-01T02:00:00+02:00,1,1,0,0", 2).unwrap();
        assert_eq!(record.timestamp, Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_malformed_rows() {
        for row in [
            "2025-09-01T00:00:00.000Z,1,2,3",
            "yesterday,1,2,3,4",
            "2025-09-01T00:00:00.000Z,1,-2,3,4",
            "2025-09-01T00:00:00.000Z,1,2,3,x",
        ] {
            match SnapshotRecord::from_csv_row(row, 7) {
                Err(TrendsError::MalformedRecord { line, .. }) => assert_eq!(line, 7),
                other => panic!("expected malformed record for {:?}, got {:?}", row, other),
            }
        }
    }

    #[test]
    fn test_partition_keys() {
        assert!(is_partition_key("2025-09"));
        assert!(is_partition_key("1999-12"));
        assert!(!is_partition_key("2025-13"));
        assert!(!is_partition_key("2025-00"));
        assert!(!is_partition_key("2025-9"));
        assert!(!is_partition_key("static-data"));
    }

    #[test]
    fn test_granularity_names() {
        for granularity in Granularity::all() {
            assert_eq!(Granularity::from_str(granularity.as_str()), Some(granularity));
        }
        assert_eq!(Granularity::from_str("finest"), Some(Granularity::Finest));
        assert_eq!(Granularity::from_str("yearly"), None);
    }
}
