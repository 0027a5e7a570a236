//! Comprehensive property-based tests
//!
//! Covers the core analyzers with proptest. Designed to run in a few
//! seconds as a pre-commit quality gate.
//!
//! Core features tested:
//! 1. N-gram attribution scores and ranking
//! 2. Clipped n-gram matching
//! 3. Frequency-bucketed F-measure
//! 4. Paired bootstrap resampling

use compare_mt::bootstrap::{significance_test, Metric, Verdict};
use compare_mt::frequency::{analyze_buckets, bucket_index, BucketAnalysis, FrequencyTable};
use compare_mt::ngram::{attribute, count_ngrams, match_ngrams, smoothed_score};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sentence() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]", 0..8)
}

fn aligned_pair() -> impl Strategy<Value = (Vec<Vec<String>>, Vec<Vec<String>>)> {
    prop::collection::vec((sentence(), sentence()), 1..6)
        .prop_map(|pairs| pairs.into_iter().unzip())
}

fn binary_labels() -> impl Strategy<Value = Vec<(String, String, String)>> {
    prop::collection::vec(("[01]", "[01]", "[01]"), 4..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_smoothed_score_in_open_interval(
        left in 0usize..10_000,
        right in 0usize..10_000,
        alpha in 0.01f64..10.0,
    ) {
        let score = smoothed_score(left, right, alpha);
        prop_assert!(score > 0.0 && score < 1.0);
        // Swapping sides mirrors the score around 0.5
        let mirrored = smoothed_score(right, left, alpha);
        prop_assert!((score + mirrored - 1.0).abs() < 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_attribution_swap_symmetry((reference, output) in aligned_pair()) {
        let forward = attribute(&reference, &output, 1.0, 2).unwrap();
        let backward = attribute(&output, &reference, 1.0, 2).unwrap();

        prop_assert_eq!(forward.scores.len(), backward.scores.len());
        for entry in &forward.scores {
            let key: Vec<&str> = entry.ngram.iter().map(String::as_str).collect();
            let other = backward.get(&key).unwrap();
            prop_assert!((entry.score + other.score - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_ranking_is_ascending((reference, output) in aligned_pair()) {
        let ranking = attribute(&reference, &output, 0.5, 3).unwrap();
        prop_assert!(ranking.scores.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn prop_matches_never_exceed_either_count(reference in sentence(), system in sentence()) {
        let ref_counts = count_ngrams(&reference, 3);
        let sys_counts = count_ngrams(&system, 3);

        for (ngram, &matched) in &match_ngrams(&ref_counts, &sys_counts) {
            prop_assert!(matched > 0);
            prop_assert!(matched <= ref_counts[ngram]);
            prop_assert!(matched <= sys_counts[ngram]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_bucket_matches_equal_unigram_overlap(
        (reference, output) in aligned_pair(),
        training in prop::collection::vec(sentence(), 0..5),
    ) {
        let table = FrequencyTable::from_corpus(&training);
        let analysis: BucketAnalysis =
            analyze_buckets(&reference, &output, &table, &[1, 2, 5]).unwrap();

        let expected: u64 = reference
            .iter()
            .zip(&output)
            .map(|(r, o)| {
                match_ngrams(&count_ngrams(r, 1), &count_ngrams(o, 1))
                    .values()
                    .map(|&m| m as u64)
                    .sum::<u64>()
            })
            .sum();

        prop_assert_eq!(analysis.total_matched(), expected);
        prop_assert_eq!(analysis.rows.len(), 4);
        for row in &analysis.rows {
            prop_assert!(row.stat.matched <= row.stat.ref_total.min(row.stat.out_total));
        }
    }

    #[test]
    fn prop_bucket_index_is_monotonic(freq_a in 0u64..2000, freq_b in 0u64..2000) {
        let bounds = [1, 2, 3, 4, 5, 10, 100, 1000];
        let (low, high) = if freq_a <= freq_b { (freq_a, freq_b) } else { (freq_b, freq_a) };
        prop_assert!(bucket_index(&bounds, low) <= bucket_index(&bounds, high));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_bootstrap_is_deterministic_under_seed(labels in binary_labels(), seed in any::<u64>()) {
        let gold: Vec<String> = labels.iter().map(|l| l.0.clone()).collect();
        let sys1: Vec<String> = labels.iter().map(|l| l.1.clone()).collect();
        let sys2: Vec<String> = labels.iter().map(|l| l.2.clone()).collect();

        let run = || {
            let mut rng = StdRng::seed_from_u64(seed);
            significance_test(&gold, &sys1, &sys2, Metric::Accuracy, 50, 0.5, &mut rng).unwrap()
        };
        let (first, second) = (run(), run());

        prop_assert_eq!(first.wins_a, second.wins_a);
        prop_assert_eq!(first.wins_b, second.wins_b);
        prop_assert_eq!(first.scores_a, second.scores_a);
        prop_assert_eq!(first.scores_b, second.scores_b);
    }

    #[test]
    fn prop_identical_systems_always_tie(labels in binary_labels(), seed in any::<u64>()) {
        let gold: Vec<String> = labels.iter().map(|l| l.0.clone()).collect();
        let sys: Vec<String> = labels.iter().map(|l| l.1.clone()).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            significance_test(&gold, &sys, &sys, Metric::Accuracy, 40, 0.5, &mut rng).unwrap();

        prop_assert_eq!(report.ties, 40);
        prop_assert_eq!(report.verdict, Verdict::NoDifference);
    }

    #[test]
    fn prop_confidence_interval_brackets_median(
        labels in binary_labels(),
        num_samples in 40usize..120,
        seed in any::<u64>(),
    ) {
        let gold: Vec<String> = labels.iter().map(|l| l.0.clone()).collect();
        let sys1: Vec<String> = labels.iter().map(|l| l.1.clone()).collect();
        let sys2: Vec<String> = labels.iter().map(|l| l.2.clone()).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            significance_test(&gold, &sys1, &sys2, Metric::Accuracy, num_samples, 0.5, &mut rng)
                .unwrap();

        prop_assert_eq!(report.wins_a + report.wins_b + report.ties, num_samples);
        for summary in [report.sys1, report.sys2] {
            prop_assert!(summary.ci_low <= summary.median);
            prop_assert!(summary.median <= summary.ci_high);
        }
    }
}
