//! CLI command to print per-sample trend flags.

use super::SeriesArgs;
use anyhow::Result;
use clap::Args;
use divergence_core::Trend;
use divergence_signals::DivergenceDetector;

/// Arguments for the trend command.
#[derive(Args, Debug)]
pub struct TrendArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

pub fn run(args: TrendArgs) -> Result<()> {
    let config = args.series.load_config()?;
    let series = args.series.load_series(&config)?;
    let detector = DivergenceDetector::new(&series.prices, &series.indicator)?;

    println!("{}", render(&detector));
    Ok(())
}

pub fn render(detector: &DivergenceDetector) -> String {
    let mut out = format!(
        "{:>6}  {:>16} {:<7}  {:>16} {:<7}\n",
        "INDEX", "PRICE", "TREND", "INDICATOR", "TREND"
    );
    let rows = detector
        .prices()
        .iter()
        .zip(detector.indicator())
        .zip(detector.price_trend().iter().zip(detector.indicator_trend()))
        .enumerate();

    for (i, ((price, indicator), (price_trend, indicator_trend))) in rows {
        let indicator = indicator.map_or_else(|| "-".to_string(), |v| v.normalize().to_string());
        out.push_str(&format!(
            "{:>6}  {:>16} {:<7}  {:>16} {:<7}\n",
            i,
            price.normalize().to_string(),
            label(*price_trend),
            indicator,
            label(*indicator_trend),
        ));
    }
    out.trim_end().to_string()
}

fn label(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "up",
        Trend::Down => "down",
        Trend::Unknown => "?",
    }
}
