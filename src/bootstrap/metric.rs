// Pluggable evaluation measures for the bootstrap test
//
// `Metric` is the closed set of names a caller can select. Each variant is
// backed by an `EvalMeasure` implementation that owns both its record
// preprocessing and its corpus-level score, so records never need runtime
// type inspection.

use crate::bootstrap::bleu::{corpus_bleu, detok_bleu};
use crate::corpus::tokenize_line;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Evaluation metric selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    /// Fraction of exactly matching labels
    Accuracy,
    /// Pearson correlation of float values
    Pearson,
    /// Corpus BLEU over whitespace-tokenized text
    Bleu,
    /// Corpus BLEU over raw text with internal tokenization, in [0, 1]
    BleuDetok,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Accuracy,
        Metric::Pearson,
        Metric::Bleu,
        Metric::BleuDetok,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Accuracy => Accuracy::NAME,
            Metric::Pearson => Pearson::NAME,
            Metric::Bleu => Bleu::NAME,
            Metric::BleuDetok => BleuDetok::NAME,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "accuracy" | "acc" => Ok(Metric::Accuracy),
            "pearson" => Ok(Metric::Pearson),
            "bleu" => Ok(Metric::Bleu),
            "bleu_detok" => Ok(Metric::BleuDetok),
            other => Err(CompareError::UnsupportedMetric(other.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = CompareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.name().to_string()
    }
}

/// A corpus-level measure over aligned gold and system records
pub trait EvalMeasure {
    /// Preprocessed form of one line
    type Record: Clone;

    const NAME: &'static str;

    /// Turn one raw line into a record, or explain why it can't be
    fn preprocess(&self, raw: &str) -> Result<Self::Record, String>;

    /// Score system records against gold records of the same length
    fn score(&self, gold: &[Self::Record], system: &[Self::Record]) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl EvalMeasure for Accuracy {
    type Record = String;
    const NAME: &'static str = "accuracy";

    fn preprocess(&self, raw: &str) -> Result<String, String> {
        Ok(raw.trim().to_string())
    }

    fn score(&self, gold: &[String], system: &[String]) -> f64 {
        let correct = gold.iter().zip(system).filter(|(g, s)| g == s).count();
        correct as f64 / gold.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl EvalMeasure for Pearson {
    type Record = f64;
    const NAME: &'static str = "pearson";

    fn preprocess(&self, raw: &str) -> Result<f64, String> {
        let trimmed = raw.trim();
        trimmed
            .parse::<f64>()
            .map_err(|e| format!("{trimmed:?} is not a number: {e}"))
    }

    /// NaN when either side has zero variance
    fn score(&self, gold: &[f64], system: &[f64]) -> f64 {
        pearson_correlation(gold, system)
    }
}

/// Pearson correlation coefficient, clipped to [-1, 1]
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bleu;

impl EvalMeasure for Bleu {
    type Record = Vec<String>;
    const NAME: &'static str = "bleu";

    fn preprocess(&self, raw: &str) -> Result<Vec<String>, String> {
        Ok(tokenize_line(raw))
    }

    fn score(&self, gold: &[Vec<String>], system: &[Vec<String>]) -> f64 {
        corpus_bleu(gold, system)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BleuDetok;

impl EvalMeasure for BleuDetok {
    type Record = String;
    const NAME: &'static str = "bleu_detok";

    fn preprocess(&self, raw: &str) -> Result<String, String> {
        Ok(raw.trim().to_string())
    }

    fn score(&self, gold: &[String], system: &[String]) -> f64 {
        detok_bleu(gold, system) / 100.0
    }
}
