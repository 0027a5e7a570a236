// Single-system attribution: which n-grams does the output over- or
// under-produce relative to the reference?

use crate::config::{validate_alpha, validate_max_order};
use crate::corpus::{ensure_aligned, Sentence};
use crate::error::Result;
use crate::ngram::counter::{count_corpus_ngrams, ngram_to_string, NgramCount, NgramKey};
use serde::Serialize;
use std::fmt::Write as _;

/// Which corpora the two sides of a ranking came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
    /// left = reference, right = system output
    ReferenceVsOutput,
    /// left = system 1 credit, right = system 2 credit
    SystemVsSystem,
}

impl RankingKind {
    fn labels(self) -> (&'static str, &'static str) {
        match self {
            RankingKind::ReferenceVsOutput => ("ref", "out"),
            RankingKind::SystemVsSystem => ("sys1", "sys2"),
        }
    }
}

/// Attribution score of one n-gram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NgramScore {
    pub ngram: NgramKey,
    /// Smoothed score in (0, 1)
    pub score: f64,
    /// Count (or credit) on the left side
    pub left_count: usize,
    /// Count (or credit) on the right side
    pub right_count: usize,
}

/// Smoothed attribution score
///
/// Depends only on the two counts; `alpha` must be positive.
pub fn smoothed_score(left: usize, right: usize, alpha: f64) -> f64 {
    (left as f64 + alpha) / ((left + right) as f64 + 2.0 * alpha)
}

/// Score every key of `left ∪ right` once and sort ascending
///
/// The union lists `left`'s keys first, then keys only `right` has, each in
/// insertion order. The sort is stable, so equal scores keep that order.
pub fn rank_by_score(left: &NgramCount, right: &NgramCount, alpha: f64) -> Vec<NgramScore> {
    let mut scores: Vec<NgramScore> = left
        .keys()
        .chain(right.keys().filter(|k| !left.contains_key(*k)))
        .map(|ngram| {
            let left_count = left.get(ngram).copied().unwrap_or(0);
            let right_count = right.get(ngram).copied().unwrap_or(0);
            NgramScore {
                ngram: ngram.clone(),
                score: smoothed_score(left_count, right_count, alpha),
                left_count,
                right_count,
            }
        })
        .collect();

    scores.sort_by(|a, b| a.score.total_cmp(&b.score));
    scores
}

/// Ascending ranking of n-gram attribution scores
#[derive(Debug, Clone, Serialize)]
pub struct NgramRanking {
    pub kind: RankingKind,
    pub alpha: f64,
    pub max_order: usize,
    pub scores: Vec<NgramScore>,
}

/// The two ends of a ranking, as printed
#[derive(Debug, Clone, Serialize)]
pub struct RankingSummary {
    pub kind: RankingKind,
    /// Lowest scores first: indicative of the right-hand corpus
    pub lowest: Vec<NgramScore>,
    /// Highest scores first: indicative of the left-hand corpus
    pub highest: Vec<NgramScore>,
}

impl NgramRanking {
    /// Up to `k` entries from the bottom of the ranking, lowest first
    pub fn lowest(&self, k: usize) -> &[NgramScore] {
        &self.scores[..k.min(self.scores.len())]
    }

    /// Up to `k` entries from the top of the ranking, highest first
    pub fn highest(&self, k: usize) -> impl Iterator<Item = &NgramScore> {
        let start = self.scores.len().saturating_sub(k);
        self.scores[start..].iter().rev()
    }

    /// Look up the score of a specific n-gram
    pub fn get(&self, ngram: &[&str]) -> Option<&NgramScore> {
        self.scores.iter().find(|s| {
            s.ngram.len() == ngram.len() && s.ngram.iter().zip(ngram).all(|(a, b)| a == b)
        })
    }

    pub fn summary(&self, print_size: usize) -> RankingSummary {
        RankingSummary {
            kind: self.kind,
            lowest: self.lowest(print_size).to_vec(),
            highest: self.highest(print_size).cloned().collect(),
        }
    }

    /// Generate human-readable report with `print_size` entries per end
    pub fn to_report_string(&self, print_size: usize) -> String {
        let (left, right) = self.kind.labels();
        let mut report = String::new();

        let (low_header, high_header) = match self.kind {
            RankingKind::ReferenceVsOutput => (
                format!("--- {print_size} n-grams over-generated n-grams indicative of output"),
                format!("--- {print_size} n-grams under-generated n-grams indicative of reference"),
            ),
            RankingKind::SystemVsSystem => (
                format!("--- {print_size} n-grams that sys2 matched more often than sys1"),
                format!("--- {print_size} n-grams that sys1 matched more often than sys2"),
            ),
        };

        let _ = writeln!(report, "{low_header}");
        for entry in self.lowest(print_size) {
            write_entry(&mut report, entry, left, right);
        }
        let _ = writeln!(report);
        let _ = writeln!(report, "{high_header}");
        for entry in self.highest(print_size) {
            write_entry(&mut report, entry, left, right);
        }

        report
    }
}

fn write_entry(report: &mut String, entry: &NgramScore, left: &str, right: &str) {
    let _ = writeln!(
        report,
        "{}\t{:.6} ({}={}, {}={})",
        ngram_to_string(&entry.ngram),
        entry.score,
        left,
        entry.left_count,
        right,
        entry.right_count
    );
}

/// Rank n-grams by how strongly they indicate the reference over the output
///
/// # Arguments
/// * `reference` - Reference corpus
/// * `output` - System output, positionally aligned with `reference`
/// * `alpha` - Additive smoothing constant (> 0)
/// * `max_order` - Longest n-gram considered
///
/// # Example
/// ```
/// use compare_mt::corpus::tokenize_line;
/// use compare_mt::ngram::attribute;
///
/// let reference = vec![tokenize_line("the cat sat on the mat")];
/// let output = vec![tokenize_line("the cat sat on a mat")];
///
/// let ranking = attribute(&reference, &output, 1.0, 1).unwrap();
/// assert_eq!(ranking.lowest(1)[0].ngram, vec!["a".to_string()]);
/// ```
pub fn attribute(
    reference: &[Sentence],
    output: &[Sentence],
    alpha: f64,
    max_order: usize,
) -> Result<NgramRanking> {
    ensure_aligned(&[("reference", reference.len()), ("output", output.len())])?;
    validate_alpha(alpha)?;
    validate_max_order(max_order)?;

    let ref_counts = count_corpus_ngrams(reference, max_order);
    let out_counts = count_corpus_ngrams(output, max_order);
    tracing::debug!(
        "Attributing {} reference and {} output n-gram types over {} sentences",
        ref_counts.len(),
        out_counts.len(),
        reference.len()
    );

    Ok(NgramRanking {
        kind: RankingKind::ReferenceVsOutput,
        alpha,
        max_order,
        scores: rank_by_score(&ref_counts, &out_counts, alpha),
    })
}
