//! Indices grouped by trend direction.
//!
//! Indicator extrema are kept as ordered lists because the scanner iterates
//! them. Price extrema are only ever membership-tested, so they live in sets.

use crate::direction::ScanDirection;
use divergence_core::Trend;
use std::collections::HashSet;

/// Ordered indices whose trend is `Up` or `Down`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtremumIndices {
    pub up: Vec<usize>,
    pub down: Vec<usize>,
}

impl ExtremumIndices {
    #[must_use]
    pub fn from_trends(trends: &[Trend]) -> Self {
        let mut indices = Self::default();
        for (i, trend) in trends.iter().enumerate() {
            match trend {
                Trend::Up => indices.up.push(i),
                Trend::Down => indices.down.push(i),
                Trend::Unknown => {}
            }
        }
        indices
    }

    #[must_use]
    pub fn indices(&self, direction: ScanDirection) -> &[usize] {
        match direction {
            ScanDirection::Increase => &self.up,
            ScanDirection::Decrease => &self.down,
        }
    }
}

/// Index sets for O(1) membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtremumSet {
    up: HashSet<usize>,
    down: HashSet<usize>,
}

impl ExtremumSet {
    #[must_use]
    pub fn from_trends(trends: &[Trend]) -> Self {
        let ExtremumIndices { up, down } = ExtremumIndices::from_trends(trends);
        Self {
            up: up.into_iter().collect(),
            down: down.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, direction: ScanDirection, index: usize) -> bool {
        match direction {
            ScanDirection::Increase => self.up.contains(&index),
            ScanDirection::Decrease => self.down.contains(&index),
        }
    }

    #[must_use]
    pub fn len(&self, direction: ScanDirection) -> usize {
        match direction {
            ScanDirection::Increase => self.up.len(),
            ScanDirection::Decrease => self.down.len(),
        }
    }
}
