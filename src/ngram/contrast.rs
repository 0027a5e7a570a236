// Head-to-head attribution between two systems
//
// Per sentence, each system's n-grams are clipped against the reference. An
// n-gram is credited to whichever system matched it more often, and only by
// the surplus. Raw frequency plays no part: an n-gram both systems reproduce
// equally well earns neither any credit.

use crate::config::{validate_alpha, validate_max_order};
use crate::corpus::{ensure_aligned, Sentence};
use crate::error::Result;
use crate::ngram::attribution::{rank_by_score, NgramRanking, RankingKind};
use crate::ngram::counter::{count_ngrams, NgramCount};
use std::cmp::Ordering;

/// Clip system counts against reference counts
///
/// Only reference n-grams can match; each match is `min(ref, sys)` and
/// zero matches are left out.
pub fn match_ngrams(reference: &NgramCount, system: &NgramCount) -> NgramCount {
    reference
        .iter()
        .filter_map(|(ngram, &ref_count)| {
            let matched = ref_count.min(system.get(ngram).copied().unwrap_or(0));
            (matched > 0).then(|| (ngram.clone(), matched))
        })
        .collect()
}

/// Rank n-grams by which of two systems reproduces them better
///
/// High scores favour system 1, low scores favour system 2.
pub fn compare_systems(
    reference: &[Sentence],
    sys_a: &[Sentence],
    sys_b: &[Sentence],
    alpha: f64,
    max_order: usize,
) -> Result<NgramRanking> {
    ensure_aligned(&[
        ("reference", reference.len()),
        ("sys1", sys_a.len()),
        ("sys2", sys_b.len()),
    ])?;
    validate_alpha(alpha)?;
    validate_max_order(max_order)?;

    let mut credit_a = NgramCount::new();
    let mut credit_b = NgramCount::new();

    for ((ref_sent, a_sent), b_sent) in reference.iter().zip(sys_a).zip(sys_b) {
        let ref_ngrams = count_ngrams(ref_sent, max_order);
        let match_a = match_ngrams(&ref_ngrams, &count_ngrams(a_sent, max_order));
        let match_b = match_ngrams(&ref_ngrams, &count_ngrams(b_sent, max_order));

        for ngram in ref_ngrams.keys() {
            let a = match_a.get(ngram).copied().unwrap_or(0);
            let b = match_b.get(ngram).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Greater => *credit_a.entry(ngram.clone()).or_insert(0) += a - b,
                Ordering::Less => *credit_b.entry(ngram.clone()).or_insert(0) += b - a,
                Ordering::Equal => {}
            }
        }
    }

    tracing::debug!(
        "Credited {} n-gram types to sys1 and {} to sys2",
        credit_a.len(),
        credit_b.len()
    );

    Ok(NgramRanking {
        kind: RankingKind::SystemVsSystem,
        alpha,
        max_order,
        scores: rank_by_score(&credit_a, &credit_b, alpha),
    })
}
