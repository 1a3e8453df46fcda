//! Rollup Binary - rebuilds daily, weekly and monthly series
//!
//! Reads every `hourly/<YYYY-MM>.csv` partition and rewrites the matching
//! `daily/`, `weekly/` and `monthly/` partitions from scratch.
//!
//! ## Environment Variables
//!
//! - TRENDS_DATA_DIR - Series store root (default: data)
//! - STRICT_READS - Fail on malformed rows instead of skipping them (default: false)
//! - RUST_LOG - Logging level (optional, default: info)

use registry_trends::config::TrendsConfig;
use registry_trends::rollup_core::RollupEngine;
use registry_trends::series_core::{CsvSeriesStore, ReadMode, SeriesStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = TrendsConfig::from_env()?;
    let read_mode = if config.strict_reads {
        ReadMode::Strict
    } else {
        ReadMode::Lenient
    };
    let store = CsvSeriesStore::new(&config.data_dir).with_read_mode(read_mode);

    log::info!(
        "🚀 Aggregating {} ({} backend, {:?} reads)",
        config.data_dir.display(),
        store.backend_type(),
        read_mode
    );

    if let Err(e) = RollupEngine::new(&store).run() {
        log::error!("❌ Error aggregating data: {}", e);
        return Err(e.into());
    }

    Ok(())
}
