//! Divergence subtype classification.
//!
//! Deviations are percentages of the endpoint with the larger magnitude, so
//! they stay meaningful for negative prices and below the zero line.

use crate::direction::ScanDirection;
use divergence_core::numeric;
use divergence_core::DivergenceClass;
use rust_decimal::Decimal;

/// Deviation (in percent) separating a classic move from an extended one.
pub const DEVIATION_THRESHOLD_PCT: Decimal = Decimal::ONE;

/// Endpoint values of a surviving candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub price_from: Decimal,
    pub price_to: Decimal,
    pub indicator_from: Decimal,
    pub indicator_to: Decimal,
}

impl Endpoints {
    /// `|price_to - price_from| / max(|price_to|, |price_from|) * 100`.
    #[must_use]
    pub fn price_deviation_pct(&self) -> Option<Decimal> {
        numeric::deviation_pct(
            self.price_from,
            self.price_to,
            self.price_from.abs().max(self.price_to.abs()),
        )
    }

    /// `|indicator_to - indicator_from| / max(|indicator_to|, |indicator_from|) * 100`.
    #[must_use]
    pub fn indicator_deviation_pct(&self) -> Option<Decimal> {
        numeric::deviation_pct(
            self.indicator_from,
            self.indicator_to,
            self.indicator_from.abs().max(self.indicator_to.abs()),
        )
    }
}

/// Classifies a candidate, or `None` to discard it.
///
/// For a bearish (`Increase`) scan, with `d` the price deviation:
/// - Classic: `d > 1%`, price higher and indicator lower; or price higher
///   with the indicator within 1% of its prior value.
/// - Extended: `d <= 1%` and indicator lower.
/// - Hidden: price lower and indicator higher.
///
/// The bullish (`Decrease`) scan mirrors every comparison. An undefined
/// deviation fails the predicate that needs it.
#[must_use]
pub fn classify(direction: ScanDirection, points: &Endpoints) -> Option<DivergenceClass> {
    let price_deviation = points.price_deviation_pct();
    let indicator_deviation = points.indicator_deviation_pct();

    let price_beyond = direction.exceeds(points.price_to, points.price_from);
    let price_short = direction.exceeds(points.price_from, points.price_to);
    let indicator_beyond = direction.exceeds(points.indicator_to, points.indicator_from);
    let indicator_short = direction.exceeds(points.indicator_from, points.indicator_to);

    let price_moved = price_deviation.is_some_and(|d| d > DEVIATION_THRESHOLD_PCT);
    let price_held = price_deviation.is_some_and(|d| d <= DEVIATION_THRESHOLD_PCT);
    let indicator_held = indicator_deviation.is_some_and(|d| d <= DEVIATION_THRESHOLD_PCT);

    if (price_moved && price_beyond && indicator_short) || (price_beyond && indicator_held) {
        Some(DivergenceClass::Classic)
    } else if price_held && indicator_short {
        Some(DivergenceClass::Extended)
    } else if price_short && indicator_beyond {
        Some(DivergenceClass::Hidden)
    } else {
        None
    }
}
