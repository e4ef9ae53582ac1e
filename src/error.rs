//! Error types.
//!
//! Data-quality problems never show up here: a bad cell becomes an
//! `AlertState` (`Unknown` / `FormatError`). These errors cover the
//! caller's own inputs (configuration, data source, view parameters).

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration loading / validation failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Failure reported by a data source while reading a worksheet.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worksheet {worksheet} is not valid JSON rows: {source}")]
    Parse {
        worksheet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("worksheet {0} not found")]
    SheetMissing(String),

    /// Escape hatch for host-provided sources (HTTP, spreadsheet APIs, ...).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Invalid view parameters passed by the presentation layer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("at most {max} agents can be compared, got {got}")]
    TooManySelections { max: usize, got: usize },

    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}
