use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use gcc_core::calculations::ReferenceCatalog;
use gcc_core::data::ProviderConfig;
use gcc_core::{CostRequestForm, Plan};
use tracing::debug;

use gcc_cli::app::{self, OutputFormat};
use gcc_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly and hourly setup cost estimator for a Global Capability Center.
///
/// Loads the reference sheets from the configured source, then either runs a
/// cost calculation or lists what the sheets contain.
#[derive(Debug, Parser)]
#[command(name = "gcc-estimator", version, about)]
struct Cli {
    /// Reference data backend to use (csv or toml).
    #[arg(long, global = true, default_value = "csv")]
    backend: String,

    /// Reference data location.
    /// For csv this is a directory holding Real_Estate.csv, IT_Infra.csv and
    /// Plans.csv; for toml it is the workbook file.
    #[arg(long, global = true, default_value = "data")]
    data: String,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gcc_data=debug,info`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the setup cost for a headcount, city and plan.
    Calculate(CalculateArgs),

    /// List tiers, cities, average per-seat costs and plan cost ranges.
    Catalog {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Describe what each plan includes.
    Plans {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// Number of seats.
    #[arg(long, allow_hyphen_values = true)]
    headcount: String,

    /// City to look up in the per-seat cost sheets.
    #[arg(long, default_value = "")]
    city: String,

    /// Tier to show in the output. Defaults to the city's tier.
    #[arg(long)]
    tier: Option<String>,

    /// Service plan: Basic, Premium or Advance.
    #[arg(long, default_value = "Basic")]
    plan: String,

    /// Include real-estate cost.
    #[arg(long)]
    real_estate: bool,

    /// Include IT infrastructure cost.
    #[arg(long)]
    it_infra: bool,

    /// Include enabling-functions cost.
    #[arg(long)]
    enabling: bool,

    /// Include technology cost.
    #[arg(long)]
    technology: bool,

    /// Include all four components.
    #[arg(long)]
    all: bool,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Also write the text report into this directory.
    #[arg(long)]
    report_dir: Option<PathBuf>,
}

impl CalculateArgs {
    fn to_form(&self) -> CostRequestForm {
        CostRequestForm {
            headcount: self.headcount.clone(),
            city: self.city.clone(),
            tier: self.tier.clone(),
            plan: self.plan.clone(),
            real_estate: self.all || self.real_estate,
            it_infra: self.all || self.it_infra,
            enabling: self.all || self.enabling,
            technology: self.all || self.technology,
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn calculate(
    config: &ProviderConfig,
    args: &CalculateArgs,
) -> anyhow::Result<()> {
    let form = args.to_form();
    // Reject bad input before touching the data source.
    form.validate().context("Invalid request")?;

    let tables = app::load_tables(config)
        .await
        .with_context(|| format!("Failed to load reference data from {}", config.location))?;
    let result = app::run_calculation(&form, &tables).context("Cost calculation failed")?;
    let report = result.report(Local::now().naive_local());

    match args.format {
        OutputFormat::Text => print!("{}", report.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(dir) = &args.report_dir {
        let path = report
            .write_to_dir(dir)
            .with_context(|| format!("Failed to write report into {}", dir.display()))?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

async fn catalog(
    config: &ProviderConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let tables = app::load_tables(config)
        .await
        .with_context(|| format!("Failed to load reference data from {}", config.location))?;
    let catalog = ReferenceCatalog::from_tables(&tables);

    match format {
        OutputFormat::Text => print!("{}", app::render_catalog(&catalog)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
    }
    Ok(())
}

fn plans(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", app::render_plans()),
        OutputFormat::Json => {
            let details: Vec<_> = Plan::all().iter().map(Plan::details).collect();
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = ProviderConfig {
        backend: cli.backend,
        location: cli.data,
    };
    debug!(?config, "starting");

    match &cli.command {
        Command::Calculate(args) => calculate(&config, args).await,
        Command::Catalog { format } => catalog(&config, *format).await,
        Command::Plans { format } => plans(*format),
    }
}
