//! CLI commands for divergence detection.

pub mod check;
pub mod detect;
pub mod trend;

pub use check::CheckArgs;
pub use detect::DetectArgs;
pub use trend::TrendArgs;

use anyhow::{Context, Result};
use clap::Args;
use divergence_core::{AlignedSeries, AppConfig, ConfigLoader};
use std::path::PathBuf;
use tracing::debug;

/// Arguments shared by every command that reads a series.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Aligned series CSV (timestamp, close, indicator columns by default)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Config file path (defaults to config/Config.toml when present)
    #[arg(short, long, env = "DIVERGENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Config profile overlay (config/Config.{profile}.toml)
    #[arg(long)]
    pub profile: Option<String>,
}

impl SeriesArgs {
    /// Resolves the configuration for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or is invalid.
    pub fn load_config(&self) -> Result<AppConfig> {
        debug!(config = ?self.config, profile = ?self.profile, "Resolving configuration");
        match (&self.config, &self.profile) {
            (Some(path), _) => ConfigLoader::load_from(path),
            (None, Some(profile)) => ConfigLoader::load_with_profile(profile),
            (None, None) => ConfigLoader::load(),
        }
    }

    /// Loads the series named by `--data` using the configured columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_series(&self, config: &AppConfig) -> Result<AlignedSeries> {
        AlignedSeries::from_csv(&self.data, &config.input)
            .with_context(|| format!("failed to load series from {}", self.data.display()))
    }
}
