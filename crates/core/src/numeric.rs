//! Decimal arithmetic policy shared by the detector.
//!
//! Every value that takes part in a comparison is normalized to [`SCALE`]
//! fractional digits with round-half-up. Intermediate geometry (hypotenuse,
//! scale ratios) keeps full `Decimal` precision so that square-root rounding
//! disappears in the final normalization.
//!
//! Operations that can be undefined (zero divisor, negative radicand,
//! overflow) return `None`. Callers recover from `None` locally.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept for compared values.
pub const SCALE: u32 = 10;

/// Rounds to [`SCALE`] digits, ties away from zero.
#[must_use]
pub fn normalize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Division that is undefined for a zero divisor.
#[must_use]
pub fn checked_div(numerator: Decimal, divisor: Decimal) -> Option<Decimal> {
    if divisor.is_zero() {
        return None;
    }
    numerator.checked_div(divisor)
}

/// Square root that is undefined for negative input.
#[must_use]
pub fn checked_sqrt(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    value.sqrt()
}

/// Squares a value, `None` on overflow.
#[must_use]
pub fn checked_square(value: Decimal) -> Option<Decimal> {
    value.checked_mul(value)
}

/// `sqrt(run² + rise²)`.
#[must_use]
pub fn hypotenuse(run: Decimal, rise: Decimal) -> Option<Decimal> {
    let sum = checked_square(run)?.checked_add(checked_square(rise)?)?;
    checked_sqrt(sum)
}

/// Percentage distance between two values relative to `base`.
///
/// Returns `|to - from| / base * 100`, normalized. Undefined when `base`
/// is zero.
#[must_use]
pub fn deviation_pct(from: Decimal, to: Decimal, base: Decimal) -> Option<Decimal> {
    let ratio = checked_div(to.checked_sub(from)?.abs(), base)?;
    ratio.checked_mul(Decimal::ONE_HUNDRED).map(normalize)
}

/// Which side of the zero line a value sits on.
///
/// Zero belongs to the non-negative side: touching the zero line is not a
/// crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Negative,
    NonNegative,
}

impl Sign {
    #[must_use]
    pub fn of(value: Decimal) -> Self {
        if value < Decimal::ZERO {
            Self::Negative
        } else {
            Self::NonNegative
        }
    }
}
