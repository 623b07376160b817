//! CLI command to detect price/indicator divergences in a series file.

use super::SeriesArgs;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Args, ValueEnum};
use divergence_core::{DivergenceEvent, OutputFormat};
use divergence_signals::{detect_divergences_with, DetectorOptions};

/// Arguments for the detect command.
#[derive(Args, Debug)]
pub struct DetectArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Output format (overrides output.format from config)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Scan candidate pairs on a worker pool
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Runs detection and prints the result list.
pub fn run(args: DetectArgs) -> Result<()> {
    let config = args.series.load_config()?;
    let series = args.series.load_series(&config)?;

    let options = DetectorOptions {
        parallel: args.parallel || config.detector.parallel,
    };
    let divergences = detect_divergences_with(&series.prices, &series.indicator, &options)?;

    let events: Vec<DivergenceEvent> = divergences
        .iter()
        .map(|d| DivergenceEvent::from_divergence(d, &series.timestamps))
        .collect();

    let format = args.format.map_or(config.output.format, OutputFormat::from);
    println!("{}", render(format, &events)?);
    Ok(())
}

/// Renders events in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(format: OutputFormat, events: &[DivergenceEvent]) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
        OutputFormat::Table => Ok(render_table(events)),
    }
}

fn render_table(events: &[DivergenceEvent]) -> String {
    if events.is_empty() {
        return "No divergences found".to_string();
    }

    let mut out = format!(
        "{:<8} {:<9} {:>6} {:>6}  {:<25} {:<25} {:<6}\n",
        "KIND", "CLASS", "FROM", "TO", "FROM_TS", "TO_TS", "SIGNAL"
    );
    for event in events {
        out.push_str(&format!(
            "{:<8} {:<9} {:>6} {:>6}  {:<25} {:<25} {:<6}\n",
            event.kind.to_string(),
            event.class.to_string(),
            event.index_from,
            event.index_to,
            format_timestamp(event.from_timestamp),
            format_timestamp(event.to_timestamp),
            format!("{:?}", event.direction).to_lowercase(),
        ));
    }
    out.push_str(&format!("{} divergence(s)", events.len()));
    out
}

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
