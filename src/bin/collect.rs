//! Collect Binary - one registry snapshot per invocation
//!
//! Pages through the registry listing, classifies every server and appends one
//! row to `<TRENDS_DATA_DIR>/hourly/<YYYY-MM>.csv`. Intended to run on a schedule.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin collect
//! ```
//!
//! ## Environment Variables
//!
//! - REGISTRY_URL - Server listing endpoint
//! - TRENDS_DATA_DIR - Series store root (default: data)
//! - REQUEST_TIMEOUT_SECS, FETCH_MAX_RETRIES, FETCH_RETRY_INITIAL_MS, FETCH_RETRY_MAX_MS
//! - RUST_LOG - Logging level (optional, default: info)

use registry_trends::collector_core::{run_collection_cycle, HttpRegistryClient};
use registry_trends::config::TrendsConfig;
use registry_trends::series_core::{CsvSeriesStore, SeriesStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = TrendsConfig::from_env()?;

    log::info!("🚀 Starting data collection...");
    log::info!("   Registry: {}", config.registry_url);
    log::info!("   Data dir: {}", config.data_dir.display());

    // Captured once so every page of this cycle shares one instant
    let started_at = chrono::Utc::now();

    let client = HttpRegistryClient::from_config(&config)?;
    let store = CsvSeriesStore::new(&config.data_dir);
    log::info!("   Backend: {}", store.backend_type());

    match run_collection_cycle(&client, &store, started_at).await {
        Ok(record) => {
            log::info!("✅ Data collection complete: {}", record.to_csv_row());
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Error collecting data: {}", e);
            Err(e.into())
        }
    }
}
