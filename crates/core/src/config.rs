use crate::error::{DivergenceError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Split the candidate scan across a worker pool. Only honored when the
    /// signals crate is built with its `parallel` feature.
    pub parallel: bool,
}

/// Column layout of the aligned series CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub timestamp_column: String,
    pub price_column: String,
    pub indicator_column: String,
    pub has_timestamps: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "timestamp".to_string(),
            price_column: "close".to_string(),
            indicator_column: "indicator".to_string(),
            has_timestamps: true,
        }
    }
}

impl AppConfig {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `DivergenceError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let input = &self.input;
        if input.price_column.trim().is_empty() {
            return Err(DivergenceError::Config("input.price_column is empty".to_string()));
        }
        if input.indicator_column.trim().is_empty() {
            return Err(DivergenceError::Config(
                "input.indicator_column is empty".to_string(),
            ));
        }
        if input.has_timestamps && input.timestamp_column.trim().is_empty() {
            return Err(DivergenceError::Config(
                "input.timestamp_column is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.detector.parallel);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.input.price_column, "close");
    }

    #[test]
    fn test_empty_price_column_rejected() {
        let mut config = AppConfig::default();
        config.input.price_column = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(DivergenceError::Config("input.price_column is empty".to_string()))
        );
    }

    #[test]
    fn test_timestamp_column_ignored_without_timestamps() {
        let mut config = AppConfig::default();
        config.input.has_timestamps = false;
        config.input.timestamp_column = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_deserializes_lowercase() {
        let output: OutputConfig = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(output.format, OutputFormat::Json);
    }
}
