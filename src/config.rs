//! Configuration for n-gram attribution, bucket analysis, and bootstrap tests
//!
//! Defaults match the command-line defaults. A TOML file can supply any
//! subset of the fields; flags given on the command line take precedence.

use crate::bootstrap::Metric;
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default frequency-bucket upper bounds
pub const DEFAULT_BUCKETS: [u64; 8] = [1, 2, 3, 4, 5, 10, 100, 1000];

/// Analysis configuration
///
/// # Example
/// ```
/// use compare_mt::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.alpha, 1.0);
/// assert_eq!(config.max_order, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Additive smoothing constant for attribution scores (must be > 0)
    ///
    /// Larger values pull rare n-grams toward 0.5, so the extremes of the
    /// ranking are dominated by frequent n-grams.
    pub alpha: f64,

    /// Maximum n-gram length considered
    pub max_order: usize,

    /// Number of ranked entries shown from each end of a ranking
    pub print_size: usize,

    /// Metric used by the bootstrap test
    pub eval_type: Metric,

    /// Bootstrap iteration count
    pub num_samples: usize,

    /// Fraction of the corpus drawn per iteration, in (0, 1]
    pub sample_ratio: f64,

    /// Ascending frequency-bucket upper bounds
    pub buckets: Vec<u64>,

    /// Seed for the resampling generator (entropy-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_order: 4,
            print_size: 50,
            eval_type: Metric::Accuracy,
            num_samples: 10_000,
            sample_ratio: 0.5,
            buckets: DEFAULT_BUCKETS.to_vec(),
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        validate_max_order(self.max_order)?;

        if self.num_samples == 0 {
            return Err(CompareError::Configuration(
                "num_samples must be positive, got 0".to_string(),
            ));
        }

        validate_sample_ratio(self.sample_ratio)?;
        validate_buckets(&self.buckets)
    }
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(CompareError::Configuration(format!(
            "alpha must be a positive finite number, got {alpha}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_max_order(max_order: usize) -> Result<()> {
    if max_order == 0 {
        return Err(CompareError::Configuration(
            "max_order must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_sample_ratio(sample_ratio: f64) -> Result<()> {
    if !(sample_ratio > 0.0 && sample_ratio <= 1.0) {
        return Err(CompareError::Configuration(format!(
            "sample_ratio must be in (0, 1], got {sample_ratio}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_buckets(bounds: &[u64]) -> Result<()> {
    if bounds.first() == Some(&0) {
        return Err(CompareError::Configuration(
            "bucket bounds must be positive (the first bucket starts at 0)".to_string(),
        ));
    }
    if let Some(pair) = bounds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(CompareError::Configuration(format!(
            "bucket bounds must be strictly ascending, got {} before {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Parse a comma-separated bucket list such as `1,2,5,10`
pub fn parse_buckets(spec: &str) -> Result<Vec<u64>> {
    let bounds = spec
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| {
                CompareError::Configuration(format!("invalid bucket bound: {part:?}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    validate_buckets(&bounds)?;
    Ok(bounds)
}
