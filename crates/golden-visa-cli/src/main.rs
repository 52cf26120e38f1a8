mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::route::RouteArgs;
use commands::schedule::ScheduleArgs;
use commands::tiers::TiersArgs;

/// Greece Golden Visa cost calculator
#[derive(Parser)]
#[command(
    name = "gvc",
    version,
    about = "Greece Golden Visa cost calculator",
    long_about = "Itemises the full cost of a Greece Golden Visa application: property \
                  acquisition fees, residence permit fees and additional services, with \
                  decimal precision and a proportional chart breakdown."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. warn, debug)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the itemised cost breakdown
    Calculate(CalculateArgs),
    /// List investment tiers and their minimum prices
    Tiers(TiersArgs),
    /// Resolve a request path to a locale, redirect or not-found
    Route(RouteArgs),
    /// Print or validate a fee schedule
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Tiers(args) => commands::tiers::run_tiers(args),
        Commands::Route(args) => commands::route::run_route(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("gvc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
