use crate::config::validate_buckets;
use crate::corpus::{ensure_aligned, Sentence};
use crate::error::Result;
use crate::frequency::table::FrequencyTable;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write as _;

/// Matched, reference, and output token totals of one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketStat {
    pub matched: u64,
    pub ref_total: u64,
    pub out_total: u64,
}

impl BucketStat {
    pub fn recall(&self) -> f64 {
        if self.ref_total == 0 {
            0.0
        } else {
            self.matched as f64 / self.ref_total as f64
        }
    }

    pub fn precision(&self) -> f64 {
        if self.out_total == 0 {
            0.0
        } else {
            self.matched as f64 / self.out_total as f64
        }
    }

    /// Harmonic mean of precision and recall (0 when nothing matched)
    pub fn f_measure(&self) -> f64 {
        if self.matched == 0 {
            return 0.0;
        }
        let (p, r) = (self.precision(), self.recall());
        2.0 * p * r / (p + r)
    }
}

/// One row of the bucketed F-measure table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketRow {
    pub label: String,
    /// Inclusive lower frequency bound
    pub lower: u64,
    /// Exclusive upper frequency bound (None for the open-ended bucket)
    pub upper: Option<u64>,
    pub stat: BucketStat,
    pub recall: f64,
    pub precision: f64,
    pub f_measure: f64,
}

/// Word-level F-measure per frequency bucket
#[derive(Debug, Clone, Serialize)]
pub struct BucketAnalysis {
    pub rows: Vec<BucketRow>,
}

impl BucketAnalysis {
    /// Total matched tokens across all buckets
    pub fn total_matched(&self) -> u64 {
        self.rows.iter().map(|row| row.stat.matched).sum()
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "--- word F-measure by frequency bucket");
        let _ = writeln!(report, "freq\tf-meas\trecall\tprecision");
        for row in &self.rows {
            let _ = writeln!(
                report,
                "{}\t{:.4}\t{:.4}\t{:.4}",
                row.label, row.f_measure, row.recall, row.precision
            );
        }
        report
    }
}

/// Human-readable labels for the buckets of `bounds`
///
/// `[lo, hi)` is labelled `lo` when it holds a single value and `lo-(hi-1)`
/// otherwise; the open-ended last bucket is `last+`.
///
/// # Example
/// ```
/// use compare_mt::frequency::bucket_labels;
///
/// assert_eq!(bucket_labels(&[1, 3, 10]), vec!["0", "1-2", "3-9", "10+"]);
/// ```
pub fn bucket_labels(bounds: &[u64]) -> Vec<String> {
    let mut labels = Vec::with_capacity(bounds.len() + 1);
    let mut lower = 0;

    for &upper in bounds {
        if upper - 1 == lower {
            labels.push(lower.to_string());
        } else {
            labels.push(format!("{}-{}", lower, upper - 1));
        }
        lower = upper;
    }
    labels.push(format!("{lower}+"));

    labels
}

/// Index of the first bucket whose upper bound exceeds `freq`
pub fn bucket_index(bounds: &[u64], freq: u64) -> usize {
    bounds.partition_point(|&upper| upper <= freq)
}

fn sentence_counts(sentence: &[String]) -> IndexMap<&str, u64> {
    let mut counts = IndexMap::new();
    for token in sentence {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Compute recall, precision, and F-measure per training-frequency bucket
///
/// For every token in either sentence of an aligned pair, the pair's
/// `min(ref, out)` count is credited as matched to the token's bucket.
pub fn analyze_buckets(
    reference: &[Sentence],
    output: &[Sentence],
    table: &FrequencyTable,
    bounds: &[u64],
) -> Result<BucketAnalysis> {
    ensure_aligned(&[("reference", reference.len()), ("output", output.len())])?;
    validate_buckets(bounds)?;

    let mut stats = vec![BucketStat::default(); bounds.len() + 1];

    for (ref_sent, out_sent) in reference.iter().zip(output) {
        let ref_counts = sentence_counts(ref_sent);
        let out_counts = sentence_counts(out_sent);

        let union = ref_counts
            .keys()
            .chain(out_counts.keys().filter(|t| !ref_counts.contains_key(*t)));

        for &token in union {
            let ref_freq = ref_counts.get(token).copied().unwrap_or(0);
            let out_freq = out_counts.get(token).copied().unwrap_or(0);
            let stat = &mut stats[bucket_index(bounds, table.frequency(token))];
            stat.matched += ref_freq.min(out_freq);
            stat.ref_total += ref_freq;
            stat.out_total += out_freq;
        }
    }

    let rows = bucket_labels(bounds)
        .into_iter()
        .zip(stats)
        .enumerate()
        .map(|(i, (label, stat))| BucketRow {
            label,
            lower: if i == 0 { 0 } else { bounds[i - 1] },
            upper: bounds.get(i).copied(),
            stat,
            recall: stat.recall(),
            precision: stat.precision(),
            f_measure: stat.f_measure(),
        })
        .collect();

    Ok(BucketAnalysis { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bucket_labels() {
        assert_eq!(
            bucket_labels(&[1, 2, 3, 4, 5, 10, 100, 1000]),
            vec!["0", "1", "2", "3", "4", "5-9", "10-99", "100-999", "1000+"]
        );
    }

    #[test]
    fn test_labels_without_bounds() {
        assert_eq!(bucket_labels(&[]), vec!["0+"]);
    }

    #[test]
    fn test_bucket_index_half_open() {
        let bounds = [1, 2, 5];
        assert_eq!(bucket_index(&bounds, 0), 0);
        assert_eq!(bucket_index(&bounds, 1), 1);
        assert_eq!(bucket_index(&bounds, 4), 2);
        assert_eq!(bucket_index(&bounds, 5), 3);
        assert_eq!(bucket_index(&bounds, 10_000), 3);
    }

    #[test]
    fn test_stat_zero_matches() {
        let stat = BucketStat {
            matched: 0,
            ref_total: 3,
            out_total: 0,
        };
        assert_eq!(stat.f_measure(), 0.0);
        assert_eq!(stat.precision(), 0.0);
        assert_eq!(stat.recall(), 0.0);
    }

    #[test]
    fn test_stat_f_measure() {
        let stat = BucketStat {
            matched: 2,
            ref_total: 4,
            out_total: 2,
        };
        assert_eq!(stat.recall(), 0.5);
        assert_eq!(stat.precision(), 1.0);
        assert!((stat.f_measure() - 2.0 / 3.0).abs() < 1e-12);
    }
}
