//! Index-aligned price and indicator arrays.
//!
//! A series file is a headed CSV with one row per tick. The price column is
//! mandatory on every row. An empty indicator cell (or `NaN` / `null`) marks a
//! warm-up sample with no indicator value.

use crate::config::InputConfig;
use crate::error::{DivergenceError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedSeries {
    pub timestamps: Vec<Option<DateTime<Utc>>>,
    pub prices: Vec<Decimal>,
    pub indicator: Vec<Option<Decimal>>,
}

impl AlignedSeries {
    /// Builds a series without timestamps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the two arrays differ in length.
    pub fn new(prices: Vec<Decimal>, indicator: Vec<Option<Decimal>>) -> Result<Self> {
        if prices.len() != indicator.len() {
            return Err(DivergenceError::length_mismatch(prices.len(), indicator.len()));
        }
        Ok(Self {
            timestamps: vec![None; prices.len()],
            prices,
            indicator,
        })
    }

    /// Loads a series from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `Series` if the file cannot be opened, a configured column is
    /// missing, or a row holds an unparsable value.
    pub fn from_csv(path: impl AsRef<Path>, input: &InputConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| DivergenceError::Series(format!("{}: {e}", path.display())))?;
        let series = Self::from_reader(file, input)?;
        tracing::info!(
            path = %path.display(),
            samples = series.len(),
            "loaded aligned series"
        );
        Ok(series)
    }

    /// Loads a series from any CSV source.
    ///
    /// # Errors
    ///
    /// See [`AlignedSeries::from_csv`].
    pub fn from_reader<R: Read>(reader: R, input: &InputConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| DivergenceError::Series(format!("unreadable header: {e}")))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DivergenceError::Series(format!("missing column '{name}'")))
        };
        let price_idx = column(&input.price_column)?;
        let indicator_idx = column(&input.indicator_column)?;
        let timestamp_idx = if input.has_timestamps {
            Some(column(&input.timestamp_column)?)
        } else {
            None
        };

        let mut series = Self::default();
        for (row, record) in reader.records().enumerate() {
            // Header is line 1
            let line = row + 2;
            let record =
                record.map_err(|e| DivergenceError::Series(format!("line {line}: {e}")))?;

            let price_cell = record.get(price_idx).unwrap_or_default();
            let price = Decimal::from_str(price_cell).map_err(|e| {
                DivergenceError::Series(format!("line {line}: invalid price '{price_cell}': {e}"))
            })?;

            let indicator = parse_optional(record.get(indicator_idx).unwrap_or_default())
                .map_err(|e| {
                    DivergenceError::Series(format!("line {line}: invalid indicator: {e}"))
                })?;

            let timestamp = match timestamp_idx {
                Some(idx) => {
                    let cell = record.get(idx).unwrap_or_default();
                    let parsed = DateTime::parse_from_rfc3339(cell).map_err(|e| {
                        DivergenceError::Series(format!(
                            "line {line}: invalid timestamp '{cell}': {e}"
                        ))
                    })?;
                    Some(parsed.with_timezone(&Utc))
                }
                None => None,
            };

            series.timestamps.push(timestamp);
            series.prices.push(price);
            series.indicator.push(indicator);
        }

        Ok(series)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn parse_optional(cell: &str) -> std::result::Result<Option<Decimal>, String> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    Decimal::from_str(cell)
        .map(Some)
        .map_err(|e| format!("'{cell}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn no_timestamps() -> InputConfig {
        InputConfig {
            has_timestamps: false,
            ..InputConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = AlignedSeries::new(vec![dec!(1), dec!(2)], vec![Some(dec!(1))]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_reader_with_warm_up_gaps() {
        let csv = "close,indicator\n100,\n101,NaN\n102.5,55.25\n";
        let series = AlignedSeries::from_reader(csv.as_bytes(), &no_timestamps()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.prices, vec![dec!(100), dec!(101), dec!(102.5)]);
        assert_eq!(series.indicator, vec![None, None, Some(dec!(55.25))]);
        assert_eq!(series.timestamps, vec![None, None, None]);
    }

    #[test]
    fn test_reader_parses_timestamps() {
        let csv = "timestamp,close,indicator\n\
                   2025-01-01T00:00:00Z,100,40\n\
                   2025-01-01T00:01:00Z,101,41\n";
        let series = AlignedSeries::from_reader(csv.as_bytes(), &InputConfig::default()).unwrap();

        assert_eq!(series.len(), 2);
        let first = series.timestamps[0].unwrap();
        assert_eq!(first.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_reader_missing_column() {
        let csv = "close,rsi\n100,40\n";
        let err = AlignedSeries::from_reader(csv.as_bytes(), &no_timestamps()).unwrap_err();
        assert_eq!(err, DivergenceError::Series("missing column 'indicator'".to_string()));
    }

    #[test]
    fn test_reader_invalid_price_names_line() {
        let csv = "close,indicator\n100,1\nabc,2\n";
        let err = AlignedSeries::from_reader(csv.as_bytes(), &no_timestamps()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got {err}");
    }

    #[test]
    fn test_from_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "close,indicator").unwrap();
        writeln!(file, "10,-1.5").unwrap();
        writeln!(file, "11,-1.25").unwrap();

        let series = AlignedSeries::from_csv(file.path(), &no_timestamps()).unwrap();
        assert_eq!(series.indicator, vec![Some(dec!(-1.5)), Some(dec!(-1.25))]);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let err = AlignedSeries::from_csv("no/such/file.csv", &no_timestamps()).unwrap_err();
        assert!(matches!(err, DivergenceError::Series(_)));
    }
}
