//! Scan direction and pairwise movement.
//!
//! Bearish and bullish scans are mirror images. [`ScanDirection`] carries the
//! one comparison that differs so both scans share a single code path.

use divergence_core::{DivergenceKind, Trend};
use rust_decimal::Decimal;

/// Which extremum lists a scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanDirection {
    /// Indices where price and indicator rose; yields bearish divergences.
    Increase,
    /// Indices where price and indicator fell; yields bullish divergences.
    Decrease,
}

impl ScanDirection {
    pub const ALL: [Self; 2] = [Self::Increase, Self::Decrease];

    /// True if `value` lies strictly beyond `reference` in this direction.
    #[must_use]
    pub fn exceeds(self, value: Decimal, reference: Decimal) -> bool {
        match self {
            Self::Increase => value > reference,
            Self::Decrease => value < reference,
        }
    }

    /// Trend an endpoint must carry to be a candidate.
    #[must_use]
    pub const fn trend(self) -> Trend {
        match self {
            Self::Increase => Trend::Up,
            Self::Decrease => Trend::Down,
        }
    }

    /// Kind of divergence this scan produces.
    #[must_use]
    pub const fn kind(self) -> DivergenceKind {
        match self {
            Self::Increase => DivergenceKind::Bearish,
            Self::Decrease => DivergenceKind::Bullish,
        }
    }
}

/// Net movement between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Rising,
    Falling,
    Flat,
}

impl Movement {
    #[must_use]
    pub fn between(from: Decimal, to: Decimal) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Self::Rising,
            std::cmp::Ordering::Less => Self::Falling,
            std::cmp::Ordering::Equal => Self::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exceeds_is_strict() {
        assert!(ScanDirection::Increase.exceeds(dec!(2), dec!(1)));
        assert!(!ScanDirection::Increase.exceeds(dec!(1), dec!(1)));
        assert!(ScanDirection::Decrease.exceeds(dec!(1), dec!(2)));
        assert!(!ScanDirection::Decrease.exceeds(dec!(2), dec!(2)));
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(ScanDirection::Increase.kind(), DivergenceKind::Bearish);
        assert_eq!(ScanDirection::Decrease.kind(), DivergenceKind::Bullish);
        assert_eq!(ScanDirection::Increase.trend(), Trend::Up);
        assert_eq!(ScanDirection::Decrease.trend(), Trend::Down);
    }

    #[test]
    fn test_movement_ignores_scale() {
        assert_eq!(Movement::between(dec!(1.0), dec!(1.00)), Movement::Flat);
        assert_eq!(Movement::between(dec!(1), dec!(2)), Movement::Rising);
        assert_eq!(Movement::between(dec!(-1), dec!(-2)), Movement::Falling);
    }
}
