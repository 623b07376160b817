//! CLI command to run the cross validator and filters on one index pair.

use super::SeriesArgs;
use anyhow::{bail, Result};
use clap::Args;
use divergence_signals::scanner::{evaluate, Rejection};
use divergence_signals::{
    indicator_line_crossed, price_line_crossed, DivergenceDetector, ScanDirection,
};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Start index of the pair
    #[arg(long)]
    pub from: usize,

    /// End index of the pair
    #[arg(long)]
    pub to: usize,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let config = args.series.load_config()?;
    let series = args.series.load_series(&config)?;
    let detector = DivergenceDetector::new(&series.prices, &series.indicator)?;

    if args.from >= args.to {
        bail!("--from ({}) must be less than --to ({})", args.from, args.to);
    }
    if args.to >= detector.len() {
        bail!(
            "--to ({}) is out of range for a series of {} samples",
            args.to,
            detector.len()
        );
    }

    println!("{}", render(&detector, args.from, args.to));
    Ok(())
}

/// One block per scan direction: line cross flags, then the pair verdict.
pub fn render(detector: &DivergenceDetector, from: usize, to: usize) -> String {
    let mut out = format!("pair [{from} -> {to}]\n");
    for direction in ScanDirection::ALL {
        let price = price_line_crossed(detector.prices(), from, to, direction);
        let indicator = indicator_line_crossed(detector.indicator(), from, to, direction);
        out.push_str(&format!(
            "{:<8} price_crossed={price} indicator_crossed={indicator} verdict={}\n",
            direction_label(direction),
            verdict(evaluate(detector, direction, from, to)),
        ));
    }
    out.trim_end().to_string()
}

fn direction_label(direction: ScanDirection) -> &'static str {
    match direction {
        ScanDirection::Increase => "increase",
        ScanDirection::Decrease => "decrease",
    }
}

fn verdict(outcome: std::result::Result<divergence_core::Divergence, Rejection>) -> String {
    match outcome {
        Ok(divergence) => format!("{} {}", divergence.kind, divergence.class),
        Err(rejection) => {
            let reason = match rejection {
                Rejection::PriceTrend => "not-price-extrema",
                Rejection::ZeroCross => "zero-cross",
                Rejection::SameDirection => "same-direction",
                Rejection::PriceLineCrossed => "price-line-crossed",
                Rejection::IndicatorLineCrossed => "indicator-line-crossed",
                Rejection::Unclassified => "unclassified",
            };
            format!("rejected:{reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn detector() -> DivergenceDetector {
        let prices = [dec!(95), dec!(100), dec!(97), dec!(99), dec!(96), dec!(110)];
        let indicator: Vec<Option<Decimal>> =
            [dec!(70), dec!(80), dec!(72), dec!(74), dec!(65), dec!(75)]
                .into_iter()
                .map(Some)
                .collect();
        DivergenceDetector::new(&prices, &indicator).unwrap()
    }

    #[test]
    fn test_render_accepted_pair() {
        let rendered = render(&detector(), 1, 5);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "pair [1 -> 5]");
        assert!(lines[1].starts_with("increase"));
        assert!(lines[1].contains("price_crossed=false"));
        assert!(lines[1].contains("indicator_crossed=false"));
        assert!(lines[1].ends_with("verdict=bearish classic"));
    }

    #[test]
    fn test_render_rejected_direction() {
        let rendered = render(&detector(), 1, 5);
        let decrease = rendered.lines().nth(2).unwrap();

        assert!(decrease.starts_with("decrease"));
        assert!(decrease.contains("price_crossed=true"));
        assert!(decrease.ends_with("verdict=rejected:not-price-extrema"));
    }
}
