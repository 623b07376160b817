//! Candidate pair scan.
//!
//! Walks ordered pairs of same-direction indicator extrema and keeps those
//! that survive every rejection filter, classifying the survivors.

use crate::classifier::{classify, Endpoints};
use crate::detector::DivergenceDetector;
use crate::direction::{Movement, ScanDirection};
use crate::geometry::{indicator_line_crossed, price_line_crossed, sign_flips};
use divergence_core::Divergence;

/// Why a candidate pair was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// An endpoint is not a same-direction price extremum.
    PriceTrend,
    /// The indicator changes sign between the endpoints.
    ZeroCross,
    /// Price and indicator moved the same way.
    SameDirection,
    PriceLineCrossed,
    IndicatorLineCrossed,
    /// Survived the filters but matched no divergence class.
    Unclassified,
}

/// Runs every filter on `(from, to)` and classifies a survivor.
///
/// # Errors
///
/// Returns the first [`Rejection`] the pair hits.
pub fn evaluate(
    detector: &DivergenceDetector,
    direction: ScanDirection,
    from: usize,
    to: usize,
) -> Result<Divergence, Rejection> {
    let price_extrema = detector.price_extrema();
    if !price_extrema.contains(direction, from) || !price_extrema.contains(direction, to) {
        return Err(Rejection::PriceTrend);
    }

    let prices = detector.prices();
    let indicator = detector.indicator();
    if sign_flips(indicator, from, to) {
        return Err(Rejection::ZeroCross);
    }

    // Both endpoints are indicator extrema, so their values are present
    let (Some(indicator_from), Some(indicator_to)) = (indicator[from], indicator[to]) else {
        return Err(Rejection::ZeroCross);
    };
    let points = Endpoints {
        price_from: prices[from],
        price_to: prices[to],
        indicator_from,
        indicator_to,
    };

    if Movement::between(points.price_from, points.price_to)
        == Movement::between(points.indicator_from, points.indicator_to)
    {
        return Err(Rejection::SameDirection);
    }
    if price_line_crossed(prices, from, to, direction) {
        return Err(Rejection::PriceLineCrossed);
    }
    if indicator_line_crossed(indicator, from, to, direction) {
        return Err(Rejection::IndicatorLineCrossed);
    }

    classify(direction, &points)
        .map(|class| Divergence::new(direction.kind(), class, from, to))
        .ok_or(Rejection::Unclassified)
}

/// All divergences found in one scan direction, in scan order.
#[must_use]
pub fn scan(detector: &DivergenceDetector, direction: ScanDirection) -> Vec<Divergence> {
    let candidates = detector.indicator_extrema().indices(direction);
    candidates
        .iter()
        .enumerate()
        .flat_map(|(pos, &from)| scan_from(detector, direction, from, &candidates[pos + 1..]))
        .collect()
}

/// Same as [`scan`], with each outer index handled by the rayon pool.
#[cfg(feature = "parallel")]
#[must_use]
pub fn par_scan(detector: &DivergenceDetector, direction: ScanDirection) -> Vec<Divergence> {
    use rayon::prelude::*;

    let candidates = detector.indicator_extrema().indices(direction);
    candidates
        .par_iter()
        .enumerate()
        .flat_map_iter(|(pos, &from)| scan_from(detector, direction, from, &candidates[pos + 1..]))
        .collect()
}

fn scan_from(
    detector: &DivergenceDetector,
    direction: ScanDirection,
    from: usize,
    later: &[usize],
) -> Vec<Divergence> {
    later
        .iter()
        .filter_map(|&to| match evaluate(detector, direction, from, to) {
            Ok(divergence) => {
                tracing::debug!(
                    from,
                    to,
                    kind = %divergence.kind,
                    class = %divergence.class,
                    "divergence accepted"
                );
                Some(divergence)
            }
            Err(reason) => {
                tracing::trace!(from, to, ?direction, ?reason, "candidate rejected");
                None
            }
        })
        .collect()
}
