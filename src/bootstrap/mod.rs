// Paired Bootstrap Significance Testing
//
// Decides, for any supported metric, how often one system beats another on
// random subsets of the same aligned test set, and how much each system's
// score moves across those subsets.
//
// The generator is always passed in by the caller. Seed it to make the
// win tallies and score lists reproducible.

mod bleu;
mod metric;
mod paired;
mod report;

pub use bleu::{corpus_bleu, detok_bleu, tokenize_13a, BleuStats, BLEU_MAX_ORDER};
pub use metric::{
    pearson_correlation, Accuracy, Bleu, BleuDetok, EvalMeasure, Metric, Pearson,
};
pub use paired::{
    paired_bootstrap, preprocess_all, sample_size, significance_test, BootstrapOutcome,
};
pub use report::{
    cmp_nan_last, quantile_index, ScoreSummary, SignificanceReport, Verdict, CONFIDENCE_BOUNDS,
};

#[cfg(test)]
mod tests;
