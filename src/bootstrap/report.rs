// Significance report built from a bootstrap outcome

use crate::bootstrap::metric::Metric;
use crate::bootstrap::paired::BootstrapOutcome;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Lower and upper quantiles of the reported confidence interval
pub const CONFIDENCE_BOUNDS: (f64, f64) = (0.025, 0.975);

/// Which system (if any) won more resampling iterations
///
/// `p_value` is `1 - win_ratio` of the winner. It is a resampling heuristic,
/// not a calibrated hypothesis-test p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "superior", rename_all = "snake_case")]
pub enum Verdict {
    SystemA { p_value: f64 },
    SystemB { p_value: f64 },
    NoDifference,
}

/// Descriptive statistics of one system's resampled scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub mean: f64,
    pub median: f64,
    /// Element at index floor(len * 0.025) of the sorted scores
    pub ci_low: f64,
    /// Element at index floor(len * 0.975) of the sorted scores
    pub ci_high: f64,
}

/// Ascending order with NaN after every number
pub fn cmp_nan_last(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(b),
    }
}

/// Index of a quantile in a sorted list, without interpolation
pub fn quantile_index(len: usize, quantile: f64) -> usize {
    (len as f64 * quantile) as usize
}

impl ScoreSummary {
    /// Summarize an ascending, non-empty score list
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let len = sorted.len();
        let mean = sorted.iter().sum::<f64>() / len as f64;
        let median = if len % 2 == 1 {
            sorted[len / 2]
        } else {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        };

        Self {
            mean,
            median,
            ci_low: sorted[quantile_index(len, CONFIDENCE_BOUNDS.0)],
            ci_high: sorted[quantile_index(len, CONFIDENCE_BOUNDS.1)],
        }
    }
}

/// Result of a paired bootstrap significance test
#[derive(Debug, Clone, Serialize)]
pub struct SignificanceReport {
    pub metric: Metric,
    pub num_samples: usize,
    pub sample_size: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub ties: usize,
    pub win_ratio_a: f64,
    pub win_ratio_b: f64,
    pub tie_ratio: f64,
    pub verdict: Verdict,
    pub sys1: ScoreSummary,
    pub sys2: ScoreSummary,
    /// sys1 scores, sorted ascending
    pub scores_a: Vec<f64>,
    /// sys2 scores, sorted ascending
    pub scores_b: Vec<f64>,
}

impl SignificanceReport {
    /// Tally win ratios, pick the verdict, and summarize both score lists
    pub fn from_outcome(metric: Metric, outcome: BootstrapOutcome) -> Self {
        let num_samples = outcome.num_samples();
        let total = num_samples as f64;
        let win_ratio_a = outcome.wins_a as f64 / total;
        let win_ratio_b = outcome.wins_b as f64 / total;
        let tie_ratio = outcome.ties as f64 / total;

        let verdict = if win_ratio_a > win_ratio_b {
            Verdict::SystemA {
                p_value: 1.0 - win_ratio_a,
            }
        } else if win_ratio_b > win_ratio_a {
            Verdict::SystemB {
                p_value: 1.0 - win_ratio_b,
            }
        } else {
            Verdict::NoDifference
        };

        let mut scores_a = outcome.scores_a;
        let mut scores_b = outcome.scores_b;
        scores_a.sort_by(cmp_nan_last);
        scores_b.sort_by(cmp_nan_last);

        Self {
            metric,
            num_samples,
            sample_size: outcome.sample_size,
            wins_a: outcome.wins_a,
            wins_b: outcome.wins_b,
            ties: outcome.ties,
            win_ratio_a,
            win_ratio_b,
            tie_ratio,
            verdict,
            sys1: ScoreSummary::from_sorted(&scores_a),
            sys2: ScoreSummary::from_sorted(&scores_b),
            scores_a,
            scores_b,
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(
            report,
            "Win ratio: sys1={:.3}, sys2={:.3}, tie={:.3}",
            self.win_ratio_a, self.win_ratio_b, self.tie_ratio
        );
        match self.verdict {
            Verdict::SystemA { p_value } => {
                let _ = writeln!(report, "(sys1 is superior with p value p={p_value:.3})");
            }
            Verdict::SystemB { p_value } => {
                let _ = writeln!(report, "(sys2 is superior with p value p={p_value:.3})");
            }
            Verdict::NoDifference => {
                let _ = writeln!(report, "(no significant difference between sys1 and sys2)");
            }
        }
        let _ = writeln!(report);

        for (name, summary) in [("sys1", &self.sys1), ("sys2", &self.sys2)] {
            let _ = writeln!(
                report,
                "{} mean={:.3}, median={:.3}, 95% confidence interval=[{:.3}, {:.3}]",
                name, summary.mean, summary.median, summary.ci_low, summary.ci_high
            );
        }

        report
    }
}
