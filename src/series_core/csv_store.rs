//! CSV series store - one file per calendar month per granularity
//!
//! Layout: `<root>/<granularity>/<YYYY-MM>.csv`, each file starting with
//! `timestamp,total,local,remote,both`.

use super::record::{is_partition_key, Granularity, SnapshotRecord, CSV_HEADER};
use super::store_backend::{ReadMode, SeriesStore};
use crate::error::{Result, TrendsError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub struct CsvSeriesStore {
    root: PathBuf,
    read_mode: ReadMode,
}

impl CsvSeriesStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            read_mode: ReadMode::Lenient,
        }
    }

    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn partition_path(&self, granularity: Granularity, partition: &str) -> PathBuf {
        self.root
            .join(granularity.as_str())
            .join(format!("{}.csv", partition))
    }

    fn parse_content(&self, content: &[u8], path: &Path) -> Result<Vec<SnapshotRecord>> {
        let mut records = Vec::new();

        for (idx, raw) in content.split(|b| *b == b'\n').enumerate() {
            let parsed = match std::str::from_utf8(raw) {
                Ok(row) => {
                    let row = row.trim();
                    if row.is_empty() || (idx == 0 && row.starts_with("timestamp")) {
                        continue;
                    }
                    SnapshotRecord::from_csv_row(row, idx + 1)
                }
                Err(_) => Err(TrendsError::MalformedRecord {
                    line: idx + 1,
                    reason: "invalid UTF-8".to_string(),
                }),
            };

            match parsed {
                Ok(record) => records.push(record),
                Err(e) if self.read_mode == ReadMode::Lenient => {
                    log::warn!("⚠️  Skipping row in {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }

    /// True when the file is empty or its last byte is a newline
    fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
        if file.metadata()?.len() == 0 {
            return Ok(true);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }
}

impl SeriesStore for CsvSeriesStore {
    fn append(&self, record: &SnapshotRecord, granularity: Granularity) -> Result<()> {
        let path = self.partition_path(granularity, &record.partition_key());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().read(true).append(true).create(true).open(&path)?;

        // Header and first row go out in one write so a new file never holds a bare header
        let mut chunk = String::new();
        if file.metadata()?.len() == 0 {
            chunk.push_str(CSV_HEADER);
            chunk.push('\n');
        } else if !Self::ends_with_newline(&mut file)? {
            // Hand-written files may end without a newline; keep the new row on its own line
            chunk.push('\n');
        }
        chunk.push_str(&record.to_csv_row());
        chunk.push('\n');

        file.write_all(chunk.as_bytes())?;
        file.flush()?;

        log::debug!("Appended snapshot to {}", path.display());
        Ok(())
    }

    fn write(&self, records: &[SnapshotRecord], granularity: Granularity, partition: &str) -> Result<()> {
        if !is_partition_key(partition) {
            return Err(TrendsError::Storage(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid partition key '{}'", partition),
            )));
        }

        let path = self.partition_path(granularity, partition);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 40);
        content.push_str(CSV_HEADER);
        content.push('\n');
        for record in records {
            content.push_str(&record.to_csv_row());
            content.push('\n');
        }

        let tmp_path = path.with_extension("csv.tmp");
        if let Err(e) = fs::write(&tmp_path, content).and_then(|_| fs::rename(&tmp_path, &path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        log::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    fn list_partitions(&self, granularity: Granularity) -> Result<Vec<String>> {
        let dir = self.root.join(granularity.as_str());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut partitions = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if is_partition_key(stem) {
                    partitions.push(stem.to_string());
                }
            }
        }

        partitions.sort();
        Ok(partitions)
    }

    fn read_partition(&self, granularity: Granularity, partition: &str) -> Result<Vec<SnapshotRecord>> {
        let path = self.partition_path(granularity, partition);
        match fs::read(&path) {
            Ok(content) => self.parse_content(&content, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}
