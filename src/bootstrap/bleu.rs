// Corpus-level BLEU
//
// Two flavours, both with uniform 4-gram weights and one reference per
// segment:
// - `corpus_bleu`: pre-tokenized input, unsmoothed. No unigram matches
//   zeroes the score; a higher order with no matches contributes the
//   smallest positive float, so lower orders still separate systems.
// - `detok_bleu`: raw text, tokenized with the 13a rules and smoothed with
//   the "exp" method. Reported on the 0-100 scale.

use crate::ngram::{count_ngrams, match_ngrams};
use regex::Regex;
use std::sync::LazyLock;

/// Highest n-gram order BLEU considers
pub const BLEU_MAX_ORDER: usize = 4;

/// Sufficient statistics for corpus BLEU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BleuStats {
    /// Clipped matches per order (index 0 = unigrams)
    pub matches: [u64; BLEU_MAX_ORDER],
    /// Hypothesis n-gram count per order
    pub totals: [u64; BLEU_MAX_ORDER],
    pub hyp_len: u64,
    pub ref_len: u64,
}

impl BleuStats {
    /// Statistics of one reference/hypothesis pair
    pub fn from_segment(reference: &[String], hypothesis: &[String]) -> Self {
        let ref_counts = count_ngrams(reference, BLEU_MAX_ORDER);
        let hyp_counts = count_ngrams(hypothesis, BLEU_MAX_ORDER);

        let mut stats = BleuStats {
            hyp_len: hypothesis.len() as u64,
            ref_len: reference.len() as u64,
            ..Default::default()
        };
        for (ngram, count) in &hyp_counts {
            stats.totals[ngram.len() - 1] += *count as u64;
        }
        for (ngram, count) in &match_ngrams(&ref_counts, &hyp_counts) {
            stats.matches[ngram.len() - 1] += *count as u64;
        }
        stats
    }
}

fn brevity_penalty(hyp_len: u64, ref_len: u64) -> f64 {
    if hyp_len == 0 {
        0.0
    } else if hyp_len < ref_len {
        (1.0 - ref_len as f64 / hyp_len as f64).exp()
    } else {
        1.0
    }
}

/// Corpus BLEU over tokenized segments, in [0, 1]
///
/// Per-segment precision denominators are floored at 1 before summing.
pub fn corpus_bleu(references: &[Vec<String>], hypotheses: &[Vec<String>]) -> f64 {
    let mut numerators = [0u64; BLEU_MAX_ORDER];
    let mut denominators = [0u64; BLEU_MAX_ORDER];
    let (mut hyp_len, mut ref_len) = (0u64, 0u64);

    for (reference, hypothesis) in references.iter().zip(hypotheses) {
        let stats = BleuStats::from_segment(reference, hypothesis);
        for n in 0..BLEU_MAX_ORDER {
            numerators[n] += stats.matches[n];
            denominators[n] += stats.totals[n].max(1);
        }
        hyp_len += stats.hyp_len;
        ref_len += stats.ref_len;
    }

    if numerators[0] == 0 {
        return 0.0;
    }

    let weight = 1.0 / BLEU_MAX_ORDER as f64;
    let log_precision: f64 = numerators
        .iter()
        .zip(&denominators)
        .map(|(&m, &d)| {
            let precision = if m == 0 {
                f64::MIN_POSITIVE
            } else {
                m as f64 / d as f64
            };
            weight * precision.ln()
        })
        .sum();

    brevity_penalty(hyp_len, ref_len) * log_precision.exp()
}

/// Corpus BLEU over raw text with 13a tokenization, in [0, 100]
pub fn detok_bleu(references: &[String], hypotheses: &[String]) -> f64 {
    let mut total = BleuStats::default();

    for (reference, hypothesis) in references.iter().zip(hypotheses) {
        let stats = BleuStats::from_segment(&tokenize_13a(reference), &tokenize_13a(hypothesis));
        for n in 0..BLEU_MAX_ORDER {
            total.matches[n] += stats.matches[n];
            total.totals[n] += stats.totals[n];
        }
        total.hyp_len += stats.hyp_len;
        total.ref_len += stats.ref_len;
    }

    let mut smooth = 1.0;
    let mut log_precision = 0.0;
    for n in 0..BLEU_MAX_ORDER {
        // No hypothesis n-grams of this order at all
        if total.totals[n] == 0 {
            return 0.0;
        }
        let precision = if total.matches[n] == 0 {
            smooth *= 2.0;
            100.0 / (smooth * total.totals[n] as f64)
        } else {
            100.0 * total.matches[n] as f64 / total.totals[n] as f64
        };
        log_precision += precision.ln();
    }

    brevity_penalty(total.hyp_len, total.ref_len)
        * (log_precision / BLEU_MAX_ORDER as f64).exp()
}

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\{-~\[-` -&\(-\+:-@/])").expect("valid 13a pattern"));
static PERIOD_COMMA_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^0-9])([\.,])").expect("valid 13a pattern"));
static PERIOD_COMMA_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\.,])([^0-9])").expect("valid 13a pattern"));
static DASH_AFTER_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])(-)").expect("valid 13a pattern"));

/// Tokenize raw text the way mteval-v13a does
///
/// # Example
/// ```
/// use compare_mt::bootstrap::tokenize_13a;
///
/// assert_eq!(tokenize_13a("Hello, world!"), vec!["Hello", ",", "world", "!"]);
/// assert_eq!(tokenize_13a("It costs 3.50"), vec!["It", "costs", "3.50"]);
/// ```
pub fn tokenize_13a(line: &str) -> Vec<String> {
    let mut text = line
        .replace("<skipped>", "")
        .replace("-\n", "")
        .replace('\n', " ");
    if text.contains('&') {
        text = text
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">");
    }

    let text = format!(" {text} ");
    let text = PUNCTUATION.replace_all(&text, " ${1} ");
    let text = PERIOD_COMMA_AFTER.replace_all(&text, "${1} ${2} ");
    let text = PERIOD_COMMA_BEFORE.replace_all(&text, " ${1} ${2}");
    let text = DASH_AFTER_DIGIT.replace_all(&text, "${1} ${2} ");

    text.split_whitespace().map(str::to_string).collect()
}
