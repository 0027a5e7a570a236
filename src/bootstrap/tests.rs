// Scenario tests for the paired bootstrap
//
// All runs use a seeded StdRng so tallies are reproducible.

use super::*;
use crate::error::CompareError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Same seed, same inputs: identical tallies and score lists.
#[test]
fn test_fixed_seed_is_deterministic() {
    let gold = lines(&["A", "B", "A", "A", "B", "B", "A", "B", "A", "A"]);
    let sys1 = lines(&["A", "B", "B", "A", "B", "A", "A", "B", "A", "B"]);
    let sys2 = lines(&["A", "A", "A", "A", "B", "B", "B", "B", "B", "A"]);

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        significance_test(&gold, &sys1, &sys2, Metric::Accuracy, 500, 0.5, &mut rng).unwrap()
    };

    let first = run(7);
    let second = run(7);
    assert_eq!(
        (first.wins_a, first.wins_b, first.ties),
        (second.wins_a, second.wins_b, second.ties)
    );
    assert_eq!(first.scores_a, second.scores_a);
    assert_eq!(first.scores_b, second.scores_b);
    assert_eq!(first.wins_a + first.wins_b + first.ties, 500);
}

/// Identical systems tie on every iteration, for every metric.
#[test]
fn test_identical_systems_always_tie() {
    let cases = [
        (Metric::Accuracy, lines(&["x", "y", "x", "z"]), lines(&["x", "y", "y", "z"])),
        (
            Metric::Pearson,
            lines(&["0.1", "0.5", "0.9", "0.3"]),
            lines(&["0.2", "0.4", "0.8", "0.1"]),
        ),
        (
            Metric::Bleu,
            lines(&["the cat sat on the mat", "a b c d e", "one two three four", "x y z w v"]),
            lines(&["the cat sat on a mat", "a b c d f", "one two three four", "x y z w"]),
        ),
        (
            Metric::BleuDetok,
            lines(&["The cat sat.", "It rained, a lot.", "Hello world!", "Good day to you"]),
            lines(&["The cat sat down.", "It rained a lot.", "Hello, world!", "Good day"]),
        ),
    ];

    for (metric, gold, system) in cases {
        let mut rng = StdRng::seed_from_u64(3);
        let report =
            significance_test(&gold, &system, &system, metric, 200, 0.5, &mut rng).unwrap();
        assert_eq!(report.tie_ratio, 1.0, "metric {metric}");
        assert_eq!(report.win_ratio_a, 0.0);
        assert_eq!(report.win_ratio_b, 0.0);
        assert_eq!(report.verdict, Verdict::NoDifference);
    }
}

/// A system that is always right beats one that is always wrong.
#[test]
fn test_dominant_system_wins() {
    let gold = lines(&["1", "0", "1", "1", "0", "0", "1", "0"]);
    let wrong = lines(&["0", "1", "0", "0", "1", "1", "0", "1"]);

    let mut rng = StdRng::seed_from_u64(11);
    let report =
        significance_test(&gold, &wrong, &gold, Metric::Accuracy, 1000, 0.5, &mut rng).unwrap();

    assert_eq!(report.wins_b, 1000);
    assert_eq!(report.verdict, Verdict::SystemB { p_value: 0.0 });
    assert_eq!(report.sys2.mean, 1.0);
    assert_eq!(report.sys1.ci_high, 0.0);
    assert_eq!(report.sample_size, 4);
}

/// Three-token segments have no 4-grams, yet the exact system still wins.
#[test]
fn test_bleu_short_segments_favour_exact_system() {
    let gold = lines(&["a b c", "d e f", "g h i", "j k l"]);
    let poor = lines(&["a x y", "d x y", "g x y", "j x y"]);

    let mut rng = StdRng::seed_from_u64(1);
    let report =
        significance_test(&gold, &gold, &poor, Metric::Bleu, 100, 0.5, &mut rng).unwrap();

    assert_eq!(report.wins_a, 100);
    assert_eq!(report.win_ratio_a, 1.0);
    assert!(matches!(report.verdict, Verdict::SystemA { .. }));
}

/// Sampling is without replacement: with ratio 1.0 every iteration sees
/// the full set, so the score never varies.
#[test]
fn test_full_ratio_is_without_replacement() {
    let gold = lines(&["A", "B", "A", "A"]);
    let sys = lines(&["A", "B", "B", "A"]);

    let mut rng = StdRng::seed_from_u64(5);
    let report =
        significance_test(&gold, &sys, &gold, Metric::Accuracy, 50, 1.0, &mut rng).unwrap();

    assert!(report.scores_a.iter().all(|&s| s == 0.75));
    assert_eq!(report.sys1.median, 0.75);
}

#[test]
fn test_interval_ordering() {
    let gold = lines(&["a", "b", "c", "a", "b", "c", "a", "b", "c", "a", "b", "c"]);
    let sys1 = lines(&["a", "b", "a", "a", "c", "c", "a", "a", "c", "b", "b", "c"]);
    let sys2 = lines(&["a", "a", "c", "b", "b", "a", "a", "b", "b", "a", "c", "c"]);

    let mut rng = StdRng::seed_from_u64(99);
    let report =
        significance_test(&gold, &sys1, &sys2, Metric::Accuracy, 400, 0.5, &mut rng).unwrap();

    for summary in [report.sys1, report.sys2] {
        assert!(summary.ci_low <= summary.median);
        assert!(summary.median <= summary.ci_high);
    }
    assert!(report.scores_a.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_misaligned_records_rejected() {
    let gold = lines(&["a", "b", "c"]);
    let short = lines(&["a", "b"]);
    let mut rng = StdRng::seed_from_u64(1);

    let err = significance_test(&gold, &gold, &short, Metric::Accuracy, 10, 0.5, &mut rng)
        .unwrap_err();
    assert!(matches!(err, CompareError::InputAlignment { .. }));
}

#[test]
fn test_configuration_errors() {
    let gold = lines(&["a", "b"]);
    let mut rng = StdRng::seed_from_u64(1);

    for (samples, ratio) in [(0, 0.5), (10, 0.0), (10, 1.5), (10, 0.4)] {
        let err = significance_test(&gold, &gold, &gold, Metric::Accuracy, samples, ratio, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CompareError::Configuration(_)), "{samples} {ratio}");
    }

    let empty: Vec<String> = vec![];
    let result = significance_test(&empty, &empty, &empty, Metric::Accuracy, 10, 0.5, &mut rng);
    assert!(result.is_err());
}

#[test]
fn test_pearson_rejects_non_numeric_record() {
    let gold = lines(&["0.1", "0.2", "oops"]);
    let mut rng = StdRng::seed_from_u64(1);

    let err = significance_test(&gold, &gold, &gold, Metric::Pearson, 10, 1.0, &mut rng)
        .unwrap_err();
    match err {
        CompareError::MalformedRecord { index, metric, .. } => {
            assert_eq!(index, 2);
            assert_eq!(metric, "pearson");
        }
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_paired_bootstrap_with_typed_records() {
    let gold = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let close = vec![1.1, 2.0, 2.9, 4.2, 5.0, 6.1];
    let noisy = vec![3.0, 1.0, 4.0, 2.0, 6.0, 5.0];

    let mut rng = StdRng::seed_from_u64(21);
    let outcome = paired_bootstrap(&Pearson, &gold, &close, &noisy, 200, 1.0, &mut rng).unwrap();

    assert_eq!(outcome.wins_a, 200);
    assert_eq!(outcome.sample_size, 6);
    assert_eq!(outcome.num_samples(), 200);
}
