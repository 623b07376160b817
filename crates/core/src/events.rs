use crate::types::{Divergence, DivergenceClass, DivergenceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalDirection {
    Long,
    Short,
}

/// A divergence placed on the series timeline, ready for a caller to act on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DivergenceEvent {
    pub kind: DivergenceKind,
    pub class: DivergenceClass,
    pub direction: SignalDirection,
    pub index_from: usize,
    pub index_to: usize,
    pub from_timestamp: Option<DateTime<Utc>>,
    pub to_timestamp: Option<DateTime<Utc>>,
}

impl DivergenceEvent {
    /// Attaches timestamps looked up by index; out-of-range indices give `None`.
    #[must_use]
    pub fn from_divergence(divergence: &Divergence, timestamps: &[Option<DateTime<Utc>>]) -> Self {
        let lookup = |index: usize| timestamps.get(index).copied().flatten();
        Self {
            kind: divergence.kind,
            class: divergence.class,
            direction: divergence.kind.signal_direction(),
            index_from: divergence.index_from,
            index_to: divergence.index_to,
            from_timestamp: lookup(divergence.index_from),
            to_timestamp: lookup(divergence.index_to),
        }
    }
}
