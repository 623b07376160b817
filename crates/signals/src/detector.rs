//! Divergence detector over one aligned price/indicator pair.
//!
//! The detector normalizes its inputs and derives the trend flags and
//! extremum indices once. Those caches are read-only afterwards, so any
//! number of scans (or parallel workers) can share one detector.

use crate::assembler::assemble;
use crate::direction::ScanDirection;
use crate::extrema::{ExtremumIndices, ExtremumSet};
use crate::geometry::{indicator_line_crossed, price_line_crossed};
use crate::scanner;
use crate::trend::{classify_dense_trends, classify_trends};
use divergence_core::numeric::normalize;
use divergence_core::{DetectorConfig, Divergence, DivergenceError, DivergenceKind, Result, Trend};
use rust_decimal::Decimal;

/// Runtime switches for a detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Scan outer indices on the rayon pool (`parallel` feature only).
    pub parallel: bool,
}

impl From<&DetectorConfig> for DetectorOptions {
    fn from(config: &DetectorConfig) -> Self {
        Self {
            parallel: config.parallel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DivergenceDetector {
    prices: Vec<Decimal>,
    indicator: Vec<Option<Decimal>>,
    price_trend: Vec<Trend>,
    indicator_trend: Vec<Trend>,
    price_extrema: ExtremumSet,
    indicator_extrema: ExtremumIndices,
}

impl DivergenceDetector {
    /// Prepares a detector for two index-aligned arrays.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the price series is empty or the lengths
    /// differ.
    pub fn new(prices: &[Decimal], indicator: &[Option<Decimal>]) -> Result<Self> {
        if prices.len() != indicator.len() {
            return Err(DivergenceError::length_mismatch(prices.len(), indicator.len()));
        }
        if prices.is_empty() {
            return Err(DivergenceError::empty_input());
        }

        let prices: Vec<Decimal> = prices.iter().copied().map(normalize).collect();
        let indicator: Vec<Option<Decimal>> =
            indicator.iter().map(|v| v.map(normalize)).collect();

        let price_trend = classify_dense_trends(&prices);
        let indicator_trend = classify_trends(&indicator);

        Ok(Self {
            price_extrema: ExtremumSet::from_trends(&price_trend),
            indicator_extrema: ExtremumIndices::from_trends(&indicator_trend),
            prices,
            indicator,
            price_trend,
            indicator_trend,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Normalized prices.
    #[must_use]
    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Normalized indicator values.
    #[must_use]
    pub fn indicator(&self) -> &[Option<Decimal>] {
        &self.indicator
    }

    #[must_use]
    pub fn price_trend(&self) -> &[Trend] {
        &self.price_trend
    }

    #[must_use]
    pub fn indicator_trend(&self) -> &[Trend] {
        &self.indicator_trend
    }

    #[must_use]
    pub fn price_extrema(&self) -> &ExtremumSet {
        &self.price_extrema
    }

    #[must_use]
    pub fn indicator_extrema(&self) -> &ExtremumIndices {
        &self.indicator_extrema
    }

    /// True if either the price or the indicator line between `from` and `to`
    /// is breached in `direction`.
    #[must_use]
    pub fn crosses(&self, from: usize, to: usize, direction: ScanDirection) -> bool {
        price_line_crossed(&self.prices, from, to, direction)
            || indicator_line_crossed(&self.indicator, from, to, direction)
    }

    /// Divergences from one scan direction, unsorted.
    #[must_use]
    pub fn scan(&self, direction: ScanDirection) -> Vec<Divergence> {
        scanner::scan(self, direction)
    }

    /// All divergences, sorted by `(index_to, index_from)`.
    #[must_use]
    pub fn detect(&self) -> Vec<Divergence> {
        self.detect_with(&DetectorOptions::default())
    }

    #[must_use]
    pub fn detect_with(&self, options: &DetectorOptions) -> Vec<Divergence> {
        let (bearish, bullish) = self.scan_both(options.parallel);
        let divergences = assemble(bearish, bullish);

        let bearish_count = divergences
            .iter()
            .filter(|d| d.kind == DivergenceKind::Bearish)
            .count();
        tracing::info!(
            samples = self.len(),
            price_highs = self.price_extrema.len(ScanDirection::Increase),
            price_lows = self.price_extrema.len(ScanDirection::Decrease),
            bearish = bearish_count,
            bullish = divergences.len() - bearish_count,
            "divergence scan complete"
        );

        divergences
    }

    #[cfg(feature = "parallel")]
    fn scan_both(&self, parallel: bool) -> (Vec<Divergence>, Vec<Divergence>) {
        if parallel {
            rayon::join(
                || scanner::par_scan(self, ScanDirection::Increase),
                || scanner::par_scan(self, ScanDirection::Decrease),
            )
        } else {
            (
                self.scan(ScanDirection::Increase),
                self.scan(ScanDirection::Decrease),
            )
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_both(&self, parallel: bool) -> (Vec<Divergence>, Vec<Divergence>) {
        if parallel {
            tracing::debug!("parallel scan requested but the `parallel` feature is off");
        }
        (
            self.scan(ScanDirection::Increase),
            self.scan(ScanDirection::Decrease),
        )
    }
}

/// Detects divergences between a price series and an indicator series.
///
/// # Errors
///
/// Returns `InvalidInput` for empty input or mismatched lengths.
pub fn detect_divergences(
    prices: &[Decimal],
    indicator: &[Option<Decimal>],
) -> Result<Vec<Divergence>> {
    detect_divergences_with(prices, indicator, &DetectorOptions::default())
}

/// [`detect_divergences`] with explicit options.
///
/// # Errors
///
/// Returns `InvalidInput` for empty input or mismatched lengths.
pub fn detect_divergences_with(
    prices: &[Decimal],
    indicator: &[Option<Decimal>],
    options: &DetectorOptions,
) -> Result<Vec<Divergence>> {
    let detector = DivergenceDetector::new(prices, indicator)?;
    Ok(detector.detect_with(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_input_rejected() {
        let err = DivergenceDetector::new(&[], &[]).unwrap_err();
        assert_eq!(err, DivergenceError::empty_input());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = detect_divergences(&[dec!(1), dec!(2)], &[Some(dec!(1))]).unwrap_err();
        assert_eq!(err, DivergenceError::length_mismatch(2, 1));
    }

    #[test]
    fn test_single_sample_is_empty() {
        let result = detect_divergences(&[dec!(100)], &[Some(dec!(50))]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_inputs_are_normalized() {
        let detector = DivergenceDetector::new(
            &[dec!(1.000000000049), dec!(2)],
            &[None, Some(dec!(0.123456789012))],
        )
        .unwrap();
        assert_eq!(detector.prices()[0], dec!(1.0000000000));
        assert_eq!(detector.indicator()[1], Some(dec!(0.1234567890)));
    }

    #[test]
    fn test_trend_cache() {
        let detector = DivergenceDetector::new(
            &[dec!(10), dec!(11), dec!(11), dec!(9)],
            &[None, Some(dec!(5)), Some(dec!(4)), Some(dec!(4))],
        )
        .unwrap();
        assert_eq!(
            detector.price_trend(),
            &[Trend::Unknown, Trend::Up, Trend::Up, Trend::Down]
        );
        assert_eq!(
            detector.indicator_trend(),
            &[Trend::Unknown, Trend::Unknown, Trend::Down, Trend::Up]
        );
        assert_eq!(detector.indicator_extrema().indices(ScanDirection::Decrease), &[2]);
    }

    #[test]
    fn test_options_from_config() {
        let config = DetectorConfig { parallel: true };
        assert!(DetectorOptions::from(&config).parallel);
    }

    #[test]
    fn test_parallel_request_matches_sequential() {
        let prices = [dec!(95), dec!(100), dec!(97), dec!(99), dec!(96), dec!(110)];
        let indicator: Vec<Option<Decimal>> =
            [dec!(70), dec!(80), dec!(72), dec!(74), dec!(65), dec!(75)]
                .into_iter()
                .map(Some)
                .collect();

        let sequential = detect_divergences(&prices, &indicator).unwrap();
        let options = DetectorOptions { parallel: true };
        let parallel = detect_divergences_with(&prices, &indicator, &options).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 1);
    }
}
