use anyhow::{Context, Result};
use clap::Parser;
use gcc_core::calculations::ReferenceCatalog;
use gcc_core::data::ProviderConfig;
use gcc_data::{ReferenceDataLoader, default_registry};
use tracing_subscriber::EnvFilter;

/// Load reference data and report what a cost calculation would see.
///
/// The `csv` backend expects a directory with these files:
/// - Real_Estate.csv: Tier, City, Cost_INR_PM
/// - IT_Infra.csv: Tier, City, Cost_INR_PM
/// - Plans.csv: MinHC, MaxHC, Enab_Basic, Enab_Premium, Enab_Advance,
///   Tech_Basic, Tech_Premium, Tech_Advance
///
/// The `toml` backend expects one workbook file with a table array per sheet.
#[derive(Parser, Debug)]
#[command(name = "gcc-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Reference data backend (csv or toml)
    #[arg(short, long, default_value = "csv")]
    backend: String,

    /// Directory (csv) or workbook file (toml) to load
    #[arg(short, long, default_value = "data")]
    location: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = ProviderConfig {
        backend: args.backend,
        location: args.location,
    };

    let provider = default_registry()
        .create(&config)
        .await
        .with_context(|| format!("Failed to open {} source: {}", config.backend, config.location))?;

    let tables = provider
        .get_tables()
        .await
        .with_context(|| format!("Failed to load reference data from: {}", config.location))?;

    println!("Loaded reference data from {}", config.location);
    println!("  Real_Estate rows: {}", tables.real_estate.rows().len());
    println!("  IT_Infra rows:    {}", tables.it_infra.rows().len());
    println!("  Plan brackets:    {}", tables.plan_brackets.len());

    let anomalies = ReferenceDataLoader::anomalies(&tables);
    if anomalies.is_empty() {
        println!("No anomalies found.");
    } else {
        println!("{} anomalies:", anomalies.len());
        for anomaly in &anomalies {
            println!("  - {anomaly}");
        }
    }

    let catalog = ReferenceCatalog::from_tables(&tables);
    for tier in &catalog.tiers {
        let cities = catalog
            .cities_by_tier
            .get(tier)
            .map(|c| c.join(", "))
            .unwrap_or_default();
        println!("{tier}: {cities}");
    }

    Ok(())
}
