//! Mock Data Binary - seeds a data directory for dashboard development
//!
//! Overwrites the current partitions of every granularity with random-walk
//! series ending now. Never point this at production data.
//!
//! ## Environment Variables
//!
//! - TRENDS_DATA_DIR - Series store root (default: data)
//! - MOCK_SEED - Fixed RNG seed for reproducible output (optional)

use rand::rngs::StdRng;
use rand::SeedableRng;
use registry_trends::config::TrendsConfig;
use registry_trends::mock_data::seed_store;
use registry_trends::series_core::CsvSeriesStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = TrendsConfig::from_env()?;
    let store = CsvSeriesStore::new(&config.data_dir);

    let mut rng = match std::env::var("MOCK_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => {
            log::info!("🎲 Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let written = seed_store(&store, chrono::Utc::now(), &mut rng)?;
    log::info!("✅ Mock data generated: {} records in {}", written, config.data_dir.display());
    Ok(())
}
