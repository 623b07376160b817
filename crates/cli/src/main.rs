use clap::{Parser, Subcommand};

mod commands;

use commands::{CheckArgs, DetectArgs, TrendArgs};

#[derive(Parser)]
#[command(name = "divergence")]
#[command(about = "Price/indicator divergence detection", long_about = None)]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect divergences in an aligned price/indicator series
    Detect(DetectArgs),
    /// Print the per-sample trend flags of both series
    Trend(TrendArgs),
    /// Check one index pair against the line-cross validator and filters
    Check(CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            // stdout carries the report
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Trend(args) => commands::trend::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}
