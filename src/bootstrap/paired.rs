// Paired resampling significance test
//
// Each iteration shuffles the full index list and keeps the first
// floor(n * sample_ratio) indices, i.e. a fixed-size subset drawn WITHOUT
// replacement. Both systems are scored on the same subset and exactly one
// of {sys1 wins, sys2 wins, tie} is tallied.
//
// Reference:
// Koehn, P. (2004). Statistical significance tests for machine translation
// evaluation. EMNLP.

use crate::bootstrap::metric::{Accuracy, Bleu, BleuDetok, EvalMeasure, Metric, Pearson};
use crate::bootstrap::report::SignificanceReport;
use crate::config::validate_sample_ratio;
use crate::corpus::ensure_aligned;
use crate::error::{CompareError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Raw per-iteration results of a paired bootstrap run
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOutcome {
    pub wins_a: usize,
    pub wins_b: usize,
    pub ties: usize,
    /// Records drawn per iteration
    pub sample_size: usize,
    /// sys1 score of each iteration, in iteration order
    pub scores_a: Vec<f64>,
    /// sys2 score of each iteration, in iteration order
    pub scores_b: Vec<f64>,
}

impl BootstrapOutcome {
    pub fn num_samples(&self) -> usize {
        self.scores_a.len()
    }
}

/// Number of records drawn per iteration, validated to be at least one
pub fn sample_size(num_records: usize, sample_ratio: f64) -> Result<usize> {
    validate_sample_ratio(sample_ratio)?;
    if num_records == 0 {
        return Err(CompareError::Configuration(
            "cannot resample an empty record list".to_string(),
        ));
    }

    let size = (num_records as f64 * sample_ratio) as usize;
    if size == 0 {
        return Err(CompareError::Configuration(format!(
            "sample_ratio {sample_ratio} selects no records out of {num_records}"
        )));
    }
    Ok(size)
}

/// Run the resampling loop over already preprocessed records
///
/// The random source is owned by the caller; a seeded generator makes the
/// whole run reproducible.
pub fn paired_bootstrap<M, R>(
    measure: &M,
    gold: &[M::Record],
    sys_a: &[M::Record],
    sys_b: &[M::Record],
    num_samples: usize,
    sample_ratio: f64,
    rng: &mut R,
) -> Result<BootstrapOutcome>
where
    M: EvalMeasure,
    R: Rng + ?Sized,
{
    ensure_aligned(&[
        ("gold", gold.len()),
        ("sys1", sys_a.len()),
        ("sys2", sys_b.len()),
    ])?;
    if num_samples == 0 {
        return Err(CompareError::Configuration(
            "num_samples must be positive, got 0".to_string(),
        ));
    }
    let size = sample_size(gold.len(), sample_ratio)?;

    tracing::debug!(
        "Paired bootstrap: metric={}, records={}, sample_size={}, iterations={}",
        M::NAME,
        gold.len(),
        size,
        num_samples
    );

    let mut ids: Vec<usize> = (0..gold.len()).collect();
    let mut outcome = BootstrapOutcome {
        wins_a: 0,
        wins_b: 0,
        ties: 0,
        sample_size: size,
        scores_a: Vec::with_capacity(num_samples),
        scores_b: Vec::with_capacity(num_samples),
    };

    for _ in 0..num_samples {
        ids.shuffle(rng);
        let reduced = &ids[..size];

        let reduced_gold: Vec<M::Record> = reduced.iter().map(|&i| gold[i].clone()).collect();
        let reduced_a: Vec<M::Record> = reduced.iter().map(|&i| sys_a[i].clone()).collect();
        let reduced_b: Vec<M::Record> = reduced.iter().map(|&i| sys_b[i].clone()).collect();

        let score_a = measure.score(&reduced_gold, &reduced_a);
        let score_b = measure.score(&reduced_gold, &reduced_b);

        // NaN compares false both ways and lands on the tie branch
        if score_a > score_b {
            outcome.wins_a += 1;
        } else if score_a < score_b {
            outcome.wins_b += 1;
        } else {
            outcome.ties += 1;
        }

        outcome.scores_a.push(score_a);
        outcome.scores_b.push(score_b);
    }

    Ok(outcome)
}

/// Preprocess every raw line for a measure
pub fn preprocess_all<M: EvalMeasure>(measure: &M, lines: &[String]) -> Result<Vec<M::Record>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            measure
                .preprocess(line)
                .map_err(|reason| CompareError::MalformedRecord {
                    index,
                    metric: M::NAME,
                    reason,
                })
        })
        .collect()
}

/// Estimate whether sys1 or sys2 is better on `metric`
///
/// # Arguments
/// * `gold` - Raw gold lines
/// * `sys_a`, `sys_b` - Raw system lines, aligned with `gold`
/// * `metric` - Evaluation measure
/// * `num_samples` - Resampling iterations
/// * `sample_ratio` - Fraction of records per iteration, in (0, 1]
/// * `rng` - Caller-owned random source
///
/// # Example
/// ```
/// use compare_mt::bootstrap::{significance_test, Metric, Verdict};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let gold: Vec<String> = ["a", "b", "a", "a"].iter().map(|s| s.to_string()).collect();
/// let sys1 = gold.clone();
/// let sys2: Vec<String> = ["b", "a", "b", "b"].iter().map(|s| s.to_string()).collect();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let report =
///     significance_test(&gold, &sys1, &sys2, Metric::Accuracy, 100, 0.5, &mut rng).unwrap();
/// assert_eq!(report.wins_a, 100);
/// assert!(matches!(report.verdict, Verdict::SystemA { .. }));
/// ```
pub fn significance_test<R: Rng + ?Sized>(
    gold: &[String],
    sys_a: &[String],
    sys_b: &[String],
    metric: Metric,
    num_samples: usize,
    sample_ratio: f64,
    rng: &mut R,
) -> Result<SignificanceReport> {
    match metric {
        Metric::Accuracy => {
            run_measure(&Accuracy, metric, gold, sys_a, sys_b, num_samples, sample_ratio, rng)
        }
        Metric::Pearson => {
            run_measure(&Pearson, metric, gold, sys_a, sys_b, num_samples, sample_ratio, rng)
        }
        Metric::Bleu => {
            run_measure(&Bleu, metric, gold, sys_a, sys_b, num_samples, sample_ratio, rng)
        }
        Metric::BleuDetok => {
            run_measure(&BleuDetok, metric, gold, sys_a, sys_b, num_samples, sample_ratio, rng)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_measure<M, R>(
    measure: &M,
    metric: Metric,
    gold: &[String],
    sys_a: &[String],
    sys_b: &[String],
    num_samples: usize,
    sample_ratio: f64,
    rng: &mut R,
) -> Result<SignificanceReport>
where
    M: EvalMeasure,
    R: Rng + ?Sized,
{
    ensure_aligned(&[
        ("gold", gold.len()),
        ("sys1", sys_a.len()),
        ("sys2", sys_b.len()),
    ])?;
    sample_size(gold.len(), sample_ratio)?;

    let gold = preprocess_all(measure, gold)?;
    let sys_a = preprocess_all(measure, sys_a)?;
    let sys_b = preprocess_all(measure, sys_b)?;

    let outcome = paired_bootstrap(
        measure,
        &gold,
        &sys_a,
        &sys_b,
        num_samples,
        sample_ratio,
        rng,
    )?;
    let report = SignificanceReport::from_outcome(metric, outcome);

    if report.scores_a.iter().chain(&report.scores_b).any(|s| s.is_nan()) {
        tracing::warn!("Some {} scores are undefined (NaN); they count as ties", metric);
    }
    tracing::info!("Significance verdict: {:?}", report.verdict);

    Ok(report)
}
