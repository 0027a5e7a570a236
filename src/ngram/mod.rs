// N-gram Attribution Analysis for Translation Output Comparison
//
// Ranks the n-grams one corpus produces more (or less) often than another.
// The single-system variant compares an output against its reference; the
// head-to-head variant credits each system only for the reference n-grams it
// reproduces beyond what the other system managed on the same sentence.
//
// Both variants share one smoothed score:
//
//     score(k) = (left[k] + alpha) / (left[k] + right[k] + 2 * alpha)
//
// which lies strictly inside (0, 1) for alpha > 0. Low scores point at the
// right-hand corpus, high scores at the left-hand one.

mod attribution;
mod contrast;
mod counter;

pub use attribution::{
    attribute, rank_by_score, smoothed_score, NgramRanking, NgramScore, RankingKind,
    RankingSummary,
};
pub use contrast::{compare_systems, match_ngrams};
pub use counter::{
    count_corpus_ngrams, count_ngrams, merge_counts, ngram_to_string, NgramCount, NgramKey,
};

use crate::corpus::Corpus;
use crate::error::{CompareError, Result};

/// Rank n-grams for one output (against the reference) or two outputs
/// (against each other)
///
/// Three or more outputs are rejected rather than approximated pairwise.
pub fn rank_ngrams(
    reference: &Corpus,
    outputs: &[Corpus],
    alpha: f64,
    max_order: usize,
) -> Result<NgramRanking> {
    match outputs {
        [] => Err(CompareError::Configuration(
            "at least one system output is required".to_string(),
        )),
        [output] => attribute(reference, output, alpha, max_order),
        [sys_a, sys_b] => compare_systems(reference, sys_a, sys_b, alpha, max_order),
        _ => Err(CompareError::UnsupportedOperation(format!(
            "n-gram comparison of {} systems (only one or two outputs are supported)",
            outputs.len()
        ))),
    }
}
