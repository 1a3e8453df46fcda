//! Export Binary - writes the dashboard JSON document
//!
//! Serialises every granularity plus the latest hourly snapshot to
//! `DASHBOARD_OUTPUT_PATH` (default: `<TRENDS_DATA_DIR>/static-data.json`).

use registry_trends::config::TrendsConfig;
use registry_trends::series_core::{CsvSeriesStore, ReadMode, SeriesReader};

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

    let data = SeriesReader::new(&store)
        .export_dashboard(&config.dashboard_output_path, chrono::Utc::now())
        .map_err(|e| {
            log::error!("❌ Dashboard export failed: {}", e);
            e
        })?;

    log::info!("   Latest: {}", data.latest.to_csv_row());
    Ok(())
}
