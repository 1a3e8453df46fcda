//! Series Core - partitioned on-disk snapshot series
//!
//! Every granularity is split into calendar-month partitions. The finest
//! series is append-only; rollup series are rewritten whole on every run.

pub mod csv_store;
pub mod reader;
pub mod record;
pub mod store_backend;

pub use csv_store::CsvSeriesStore;
pub use reader::{DashboardData, SeriesReader};
pub use record::{Granularity, SnapshotRecord};
pub use store_backend::{ReadMode, SeriesStore};
