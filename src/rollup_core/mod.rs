//! Rollup Core - compresses the finest series into coarser granularities
//!
//! ```text
//! hourly/<YYYY-MM>.csv → bucket_key (daily | weekly | monthly)
//!     ↓
//! representative (rounded mean per counter, middle timestamp)
//!     ↓
//! SeriesStore::write (<granularity>/<YYYY-MM>.csv, full replace)
//! ```

pub mod bucket;
pub mod engine;
pub mod reduce;

pub use bucket::bucket_key;
pub use engine::{rollup_records, RollupEngine, RollupSummary};
pub use reduce::representative;
