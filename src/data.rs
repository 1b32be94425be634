//! Loading input records and writing indicator output
//!
//! Fundamentals and quotations arrive as JSON arrays of objects or as CSV with
//! a header row. Field names follow the record types: `ticker`,
//! `returnOnInvestedCapital`, `priceToEarnings`, `cagr` for fundamentals and
//! `ticker`, `close`, `volume` for quotations. Quotation rows must already be
//! in chronological order per ticker.

use crate::error::{Result, ScreenerError};
use crate::records::{Fundamental, QuotationRecord, RankedIndicator};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Parse a JSON array of fundamentals
pub fn fundamentals_from_json(json: &str) -> Result<Vec<Fundamental>> {
    records_from_json(json, "fundamentals")
}

/// Parse a JSON array of quotations
pub fn quotations_from_json(json: &str) -> Result<Vec<QuotationRecord>> {
    records_from_json(json, "quotations")
}

/// Parse fundamentals CSV with a header row
pub fn fundamentals_from_csv<R: Read>(reader: R) -> Result<Vec<Fundamental>> {
    records_from_csv(reader, "fundamentals")
}

/// Parse quotations CSV with a header row
pub fn quotations_from_csv<R: Read>(reader: R) -> Result<Vec<QuotationRecord>> {
    records_from_csv(reader, "quotations")
}

/// Load fundamentals from a `.json` or `.csv` file
pub fn load_fundamentals(path: impl AsRef<Path>) -> Result<Vec<Fundamental>> {
    let path = path.as_ref();
    let records = match Format::from_path(path)? {
        Format::Json => fundamentals_from_json(&fs::read_to_string(path)?)?,
        Format::Csv => fundamentals_from_csv(File::open(path)?)?,
    };
    log::debug!("Loaded {} fundamentals from {}", records.len(), path.display());
    Ok(records)
}

/// Load quotations from a `.json` or `.csv` file
pub fn load_quotations(path: impl AsRef<Path>) -> Result<Vec<QuotationRecord>> {
    let path = path.as_ref();
    let records = match Format::from_path(path)? {
        Format::Json => quotations_from_json(&fs::read_to_string(path)?)?,
        Format::Csv => quotations_from_csv(File::open(path)?)?,
    };
    log::debug!("Loaded {} quotations from {}", records.len(), path.display());
    Ok(records)
}

/// Serialize indicators as a JSON array
pub fn indicators_to_json(indicators: &[RankedIndicator], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(indicators)?
    } else {
        serde_json::to_string(indicators)?
    };
    Ok(json)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Csv,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("csv") => Ok(Format::Csv),
            _ => Err(ScreenerError::DataError(format!(
                "Unsupported input format for {}, expected .json or .csv",
                path.display()
            ))),
        }
    }
}

fn records_from_json<T: DeserializeOwned>(json: &str, kind: &str) -> Result<Vec<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value)
                .map_err(|e| ScreenerError::SchemaError(format!("{}[{}]: {}", kind, i, e)))
        })
        .collect()
}

fn records_from_csv<T: DeserializeOwned, R: Read>(reader: R, kind: &str) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: T = result.map_err(|e| {
            if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) {
                ScreenerError::SchemaError(format!("{} row {}: {}", kind, i + 1, e))
            } else {
                ScreenerError::from(e)
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    #[test]
    fn test_fundamentals_json() {
        let records = fundamentals_from_json(
            r#"[{"ticker":"VALE3","returnOnInvestedCapital":0.18,"priceToEarnings":6.2,"cagr":0.09}]"#,
        )
        .unwrap();
        assert_eq!(records, vec![Fundamental::new("VALE3", 0.18, 6.2, 0.09)]);
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let err = fundamentals_from_json(
            r#"[{"ticker":"A","returnOnInvestedCapital":0.1,"priceToEarnings":5.0,"cagr":0.1},
                {"ticker":"B","returnOnInvestedCapital":0.1,"cagr":0.1}]"#,
        )
        .unwrap_err();
        match err {
            ScreenerError::SchemaError(msg) => {
                assert!(msg.contains("fundamentals[1]"));
                assert!(msg.contains("priceToEarnings"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_number_is_schema_error() {
        let err = quotations_from_json(r#"[{"ticker":"A","close":null,"volume":1.0}]"#).unwrap_err();
        assert!(matches!(err, ScreenerError::SchemaError(_)));
    }

    #[test]
    fn test_not_an_array() {
        let err = quotations_from_json(r#"{"ticker":"A"}"#).unwrap_err();
        assert!(matches!(err, ScreenerError::SerdeError(_)));
    }

    #[test]
    fn test_quotations_csv() {
        let csv = "ticker,close,volume\nA,10.5,1000\nA,10.7,1200\nB,3.0,50\n";
        let records = quotations_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], QuotationRecord::new("A", 10.7, 1200.0));
    }

    #[test]
    fn test_csv_empty_cell_is_schema_error() {
        let csv = "ticker,returnOnInvestedCapital,priceToEarnings,cagr\nA,0.1,,0.2\n";
        let err = fundamentals_from_csv(csv.as_bytes()).unwrap_err();
        match err {
            ScreenerError::SchemaError(msg) => assert!(msg.contains("fundamentals row 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_extension() {
        let err = load_quotations("quotes.parquet").unwrap_err();
        assert!(matches!(err, ScreenerError::DataError(_)));
    }

    #[test]
    fn test_indicators_json() {
        let rows = vec![
            RankedIndicator::ranked("A", 0, Some(Trend::Up)),
            RankedIndicator::market("IBOV", None),
        ];
        assert_eq!(
            indicators_to_json(&rows, false).unwrap(),
            r#"[{"ticker":"A","rank":0,"trend":1},{"ticker":"IBOV","rank":null}]"#
        );
    }
}
