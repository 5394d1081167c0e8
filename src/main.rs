use analytics::MarketIntelligence;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use core_types::{HeatmapSnapshot, MarketDataBundle, RateDataPoint, RouteRate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

mod render;

/// The main entry point for the market intelligence tool.
fn main() -> anyhow::Result<()> {
    // Load MARKET_INTEL__* overrides from a .env file if one is present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    // Held until exit so the file appender flushes.
    let _log_guard = configuration::init_tracing(&config.logging).context("Failed to initialise logging")?;

    let engine = MarketIntelligence::new(config.analytics).context("Invalid analytics parameters")?;

    // Execute the appropriate command
    match cli.command {
        Commands::MarketShare(args) => {
            let input: MarketDataBundle = read_input(&args.input)?;
            tracing::info!(
                own = input.own_fixtures.len(),
                market = input.market_fixtures.len(),
                "Calculating market share."
            );
            let result = engine.market_share(&input.own_fixtures, &input.market_fixtures);
            emit(cli.format, &result, render::market_share)
        }
        Commands::TurningPoints(args) => {
            let input: Vec<RateDataPoint> = read_input(&args.input)?;
            tracing::info!(points = input.len(), "Detecting market turning points.");
            let result = engine.turning_points(&input);
            emit(cli.format, &result, render::turning_points)
        }
        Commands::Tonnage(args) => {
            let input: Vec<HeatmapSnapshot> = read_input(&args.input)?;
            tracing::info!(snapshots = input.len(), "Calculating tonnage balance.");
            let result = engine.tonnage_balance(&input);
            emit(cli.format, &result, render::tonnage)
        }
        Commands::Arbitrage(args) => {
            let input: Vec<RouteRate> = read_input(&args.input)?;
            tracing::info!(rates = input.len(), "Scanning for arbitrage opportunities.");
            let result = engine.arbitrage(&input);
            emit(cli.format, &result, render::arbitrage)
        }
        Commands::Report(args) => {
            let bundle: MarketDataBundle = read_input(&args.input)?;
            let report = engine.full_report(&bundle);
            emit(cli.format, &report, render::report)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Market share, turning points, tonnage balance and arbitrage analytics for freight markets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for results written to stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Own fixture share of the market. Input: {"ownFixtures": [...], "marketFixtures": [...]}.
    MarketShare(InputArgs),
    /// Technical turning-point signals. Input: [{"date": ..., "value": ...}, ...].
    TurningPoints(InputArgs),
    /// Regional supply/demand balance. Input: [{"region", "supply", "demand", "period"}, ...].
    Tonnage(InputArgs),
    /// Rate differentials, triangulations and ballast bonuses. Input: [{"route", "rate", "vesselType"}, ...].
    Arbitrage(InputArgs),
    /// All four analyses over one bundle with ownFixtures, marketFixtures, rateData, heatmap and routeRates.
    Report(InputArgs),
}

#[derive(Parser)]
struct InputArgs {
    /// JSON file holding the input records.
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

// ==============================================================================
// Input / Output
// ==============================================================================

fn read_input<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse input file {}", path.display()))
}

fn emit<T: Serialize>(format: OutputFormat, result: &T, table: fn(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
            println!("{json}");
        }
        OutputFormat::Table => println!("{}", table(result)),
    }
    Ok(())
}
