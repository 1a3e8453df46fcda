//! Collector Core - one snapshot of registry server counts per cycle
//!
//! ```text
//! RegistrySource::fetch_page (cursor loop, bounded retries)
//!     ↓
//! classify (local / remote / both)
//!     ↓
//! SnapshotCounts → SnapshotRecord (stamped with cycle start)
//!     ↓
//! SeriesStore::append (finest granularity)
//! ```

pub mod backoff;
pub mod classifier;
pub mod registry_client;
pub mod snapshot;

pub use classifier::{classify, Classification, ServerEntry};
pub use registry_client::{HttpRegistryClient, PageMetadata, RegistryPage, RegistrySource};
pub use snapshot::{run_collection_cycle, SnapshotCollector, SnapshotCounts};
