//! Registry Trends - sampling and rollup pipeline for registry server counts
//!
//! ```text
//! RegistrySource (paginated listing) → SnapshotCollector (classify + count)
//!     ↓
//! SeriesStore::append (hourly/<YYYY-MM>.csv)
//!     ↓
//! RollupEngine (daily / weekly / monthly, full rewrite per partition)
//!     ↓
//! SeriesReader → DashboardData (JSON export for the dashboard)
//! ```

pub mod collector_core;
pub mod config;
pub mod error;
pub mod mock_data;
pub mod rollup_core;
pub mod series_core;

pub use error::{Result, TrendsError};
