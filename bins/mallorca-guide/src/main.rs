//! Mallorca guide CLI
//!
//! Distances, region checks, nearby search and catalog browsing over the
//! built-in Mallorca dataset or a JSON snapshot.

use clap::{Parser, Subcommand, ValueEnum};
use mallorca_catalog::PoiKind;
use mallorca_core::config::Config;
use mallorca_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod output;

use commands::list::ListArgs;
use commands::{distance, list, nearby, region, seed, show};
use context::AppContext;

#[derive(Parser)]
#[command(name = "mallorca-guide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .mallorca-guide.toml discovery)
    #[arg(long, global = true, env = "MALLORCA_GUIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog snapshot to read instead of the built-in dataset
    #[arg(long, global = true, env = "MALLORCA_GUIDE_DATA")]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv) and print query metrics
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Catalog tables addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    #[value(alias = "beaches")]
    Beach,
    #[value(alias = "restaurants")]
    Restaurant,
    #[value(alias = "monument", alias = "monuments")]
    Heritage,
    #[value(alias = "markets")]
    Market,
    #[value(alias = "dishes", alias = "food")]
    Dish,
    #[value(alias = "zones")]
    Zone,
    #[value(alias = "localities")]
    Locality,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points, in kilometres
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },

    /// Check whether a point lies inside the Mallorca bounding box
    #[command(allow_negative_numbers = true)]
    InRegion { lat: f64, lon: f64 },

    /// Points of interest near a location, closest first
    #[command(allow_negative_numbers = true)]
    Nearby {
        #[arg(long)]
        lat: f64,

        #[arg(long)]
        lon: f64,

        /// Search radius in km (config default when omitted)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Maximum results (config default when omitted)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Restrict to one kind (beach, restaurant, heritage, market, dish)
        #[arg(short, long)]
        kind: Option<PoiKind>,
    },

    /// List catalog entries with attribute filters and optional distances
    List(ListArgs),

    /// Show one catalog entry
    Show { kind: EntityKind, id: i64 },

    /// Write the built-in dataset to a snapshot file
    Seed { output: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let code = e
                .downcast_ref::<mallorca_core::Error>()
                .map_or(mallorca_core::error::exit_codes::FAILURE, mallorca_core::Error::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = TelemetryConfig::from(&config.schema.logging)
        .with_verbosity(cli.verbose)
        .with_ansi(std::io::stderr().is_terminal());
    mallorca_telemetry::init_with_config(telemetry)?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let open = || AppContext::open(&config, cli.data.as_deref(), cli.json);

    let result = match cli.command {
        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            distance::run(lat1, lon1, lat2, lon2, cli.json)
        }
        Commands::InRegion { lat, lon } => region::run(lat, lon, cli.json),
        Commands::Nearby { lat, lon, radius, limit, kind } => {
            nearby::run(&open()?, lat, lon, radius, limit, kind)
        }
        Commands::List(args) => list::run(&open()?, &args),
        Commands::Show { kind, id } => show::run(&open()?, kind, id),
        Commands::Seed { output } => seed::run(&output, cli.json),
    };

    if cli.verbose > 0 {
        output::print_metrics();
    }
    result
}
