pub mod config;
pub mod config_loader;
pub mod error;
pub mod events;
pub mod numeric;
pub mod series;
pub mod types;

pub use config::{AppConfig, DetectorConfig, InputConfig, OutputConfig, OutputFormat};
pub use config_loader::ConfigLoader;
pub use error::{DivergenceError, Result};
pub use events::{DivergenceEvent, SignalDirection};
pub use numeric::{Sign, SCALE};
pub use series::AlignedSeries;
pub use types::{Divergence, DivergenceClass, DivergenceKind, Trend};
