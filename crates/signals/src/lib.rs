//! Price/indicator divergence detection.
//!
//! Pipeline: trend flags → extremum indices → candidate pair scan (filtered
//! by the geometric cross validator) → classification → sorted result list.

pub mod assembler;
pub mod classifier;
pub mod detector;
pub mod direction;
pub mod extrema;
pub mod geometry;
pub mod scanner;
pub mod trend;

pub use classifier::{classify, Endpoints, DEVIATION_THRESHOLD_PCT};
pub use detector::{
    detect_divergences, detect_divergences_with, DetectorOptions, DivergenceDetector,
};
pub use direction::{Movement, ScanDirection};
pub use extrema::{ExtremumIndices, ExtremumSet};
pub use geometry::{indicator_line_crossed, price_line_crossed, sign_flips, Triangle};
pub use scanner::Rejection;
pub use trend::{classify_dense_trends, classify_trends, trend_between};

pub use divergence_core::{Divergence, DivergenceClass, DivergenceError, DivergenceKind, Trend};
