//! Geometric cross validation.
//!
//! A candidate pair `(from, to)` is only a divergence if no sample strictly
//! between the endpoints breaches the straight line joining them. For a
//! bearish scan a breach means a sample above the line, for a bullish scan a
//! sample below it.
//!
//! The line value at an intermediate index is recovered by scaling the
//! triangle spanned by the endpoints (similar triangles). Samples that sit on
//! the safe side of both endpoints, or beyond both, are decided without
//! interpolation.

use crate::direction::ScanDirection;
use divergence_core::numeric::{self, Sign};
use rust_decimal::Decimal;

/// Right triangle spanned by two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Index distance.
    pub run: Decimal,
    /// Absolute value difference.
    pub rise: Decimal,
    pub hypotenuse: Decimal,
}

impl Triangle {
    /// Returns `None` if the hypotenuse overflows.
    #[must_use]
    pub fn new(run: Decimal, rise: Decimal) -> Option<Self> {
        Some(Self {
            run,
            rise,
            hypotenuse: numeric::hypotenuse(run, rise)?,
        })
    }

    /// Similar triangle sharing the same slope with the given run.
    ///
    /// `None` when the scale ratio or the remaining leg is undefined.
    #[must_use]
    pub fn scaled_to(&self, sub_run: Decimal) -> Option<Self> {
        let ratio = numeric::checked_div(self.run, sub_run)?;
        let hypotenuse = numeric::checked_div(self.hypotenuse, ratio)?;
        let radicand =
            numeric::checked_square(hypotenuse)?.checked_sub(numeric::checked_square(sub_run)?)?;
        let rise = numeric::checked_sqrt(radicand)?;
        Some(Self {
            run: sub_run,
            rise,
            hypotenuse,
        })
    }
}

/// True if an intermediate price breaches the line between `from` and `to`.
///
/// Indices outside the series count as crossed.
#[must_use]
pub fn price_line_crossed(
    prices: &[Decimal],
    from: usize,
    to: usize,
    direction: ScanDirection,
) -> bool {
    line_crossed(|i| prices.get(i).copied(), from, to, direction)
}

/// True if the indicator line between `from` and `to` is breached.
///
/// Any intermediate sample on the other side of the zero line counts as a
/// cross before geometry is considered. Absent values count as a cross.
#[must_use]
pub fn indicator_line_crossed(
    indicator: &[Option<Decimal>],
    from: usize,
    to: usize,
    direction: ScanDirection,
) -> bool {
    let value_at = |i: usize| indicator.get(i).copied().flatten();

    let Some(start) = value_at(from) else {
        return true;
    };
    let plane = Sign::of(start);
    for mid in from.saturating_add(1)..to {
        match value_at(mid) {
            Some(value) if Sign::of(value) == plane => {}
            _ => return true,
        }
    }

    line_crossed(value_at, from, to, direction)
}

/// True if the sign of the indicator changes anywhere in `from..=to`.
#[must_use]
pub fn sign_flips(indicator: &[Option<Decimal>], from: usize, to: usize) -> bool {
    let Some(Some(start)) = indicator.get(from).copied() else {
        return true;
    };
    let plane = Sign::of(start);
    (from..=to).any(|i| match indicator.get(i).copied().flatten() {
        Some(value) => Sign::of(value) != plane,
        None => true,
    })
}

fn line_crossed<F>(value_at: F, from: usize, to: usize, direction: ScanDirection) -> bool
where
    F: Fn(usize) -> Option<Decimal>,
{
    if from >= to {
        return true;
    }
    let (Some(start), Some(end)) = (value_at(from), value_at(to)) else {
        return true;
    };

    let outer = end
        .checked_sub(start)
        .and_then(|rise| Triangle::new(Decimal::from(to - from), rise.abs()));

    for mid in from + 1..to {
        let Some(value) = value_at(mid) else {
            return true;
        };

        match (direction.exceeds(value, start), direction.exceeds(value, end)) {
            (false, false) => {}
            (true, true) => return true,
            _ => {
                let line = outer.and_then(|t| line_value(&t, start, end, mid - from));
                match line {
                    Some(line) if direction.exceeds(value, line) => return true,
                    Some(_) => {}
                    None => {
                        tracing::warn!(from, to, mid, "line value undefined, sample skipped");
                    }
                }
            }
        }
    }

    false
}

/// Value of the line from `start` to `end` at `offset` samples past `start`.
fn line_value(outer: &Triangle, start: Decimal, end: Decimal, offset: usize) -> Option<Decimal> {
    let inner = outer.scaled_to(Decimal::from(offset))?;
    let value = if end >= start {
        start.checked_add(inner.rise)?
    } else {
        start.checked_sub(inner.rise)?
    };
    Some(numeric::normalize(value))
}
