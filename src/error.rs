//! Error taxonomy for the comparison engine
//!
//! Every failure here is a deterministic input or configuration defect.
//! Nothing is retried; errors surface to the caller before any report
//! is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by corpus loading, configuration, and the analyzers
#[derive(Error, Debug)]
pub enum CompareError {
    #[error(
        "Input alignment error: {left} has {left_len} entries but {right} has {right_len}"
    )]
    InputAlignment {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    #[error("Unsupported metric: {0} (expected accuracy, pearson, bleu or bleu_detok)")]
    UnsupportedMetric(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed frequency file at line {line}: {content:?} (expected token<TAB>count)")]
    MalformedFrequencyFile { line: usize, content: String },

    #[error("Malformed record {index} for metric {metric}: {reason}")]
    MalformedRecord {
        index: usize,
        metric: &'static str,
        reason: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
