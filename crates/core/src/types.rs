use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a single sample relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    /// No predecessor, or one of the two values is absent.
    Unknown,
}

/// Which way a divergence points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DivergenceKind {
    /// Price rising against a weakening indicator.
    Bearish,
    /// Price falling against a strengthening indicator.
    Bullish,
}

impl DivergenceKind {
    /// Trade direction a caller would take on this divergence.
    #[must_use]
    pub const fn signal_direction(self) -> crate::events::SignalDirection {
        match self {
            Self::Bearish => crate::events::SignalDirection::Short,
            Self::Bullish => crate::events::SignalDirection::Long,
        }
    }
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearish => write!(f, "bearish"),
            Self::Bullish => write!(f, "bullish"),
        }
    }
}

/// Subtype of a divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DivergenceClass {
    /// Price makes a new extreme the indicator does not confirm.
    Classic,
    /// Price revisits its prior level (within 1%) while the indicator diverges.
    Extended,
    /// Price makes a shallower move while the indicator moves further.
    Hidden,
}

impl fmt::Display for DivergenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Extended => write!(f, "extended"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

/// A detected divergence between two sample indices.
///
/// `index_from < index_to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Divergence {
    pub kind: DivergenceKind,
    pub class: DivergenceClass,
    pub index_from: usize,
    pub index_to: usize,
}

impl Divergence {
    #[must_use]
    pub const fn new(
        kind: DivergenceKind,
        class: DivergenceClass,
        index_from: usize,
        index_to: usize,
    ) -> Self {
        Self {
            kind,
            class,
            index_from,
            index_to,
        }
    }

    /// Ordering used for result lists: end index first, then start index.
    #[must_use]
    pub const fn sort_key(&self) -> (usize, usize) {
        (self.index_to, self.index_from)
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{} -> {}]",
            self.kind, self.class, self.index_from, self.index_to
        )
    }
}
