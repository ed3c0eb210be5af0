//! Property-based tests for the statistics reducer
//!
//! Covers the estimators on arbitrary inputs:
//! 1. Half-sample mode bounds and order independence
//! 2. Median and nearest-rank percentiles
//! 3. Summaries over a shared sample store
//! 4. Summary CSV rows

use cmdbench::csv_output::{format_summary, parse_summary_row};
use cmdbench::stats::{half_sample_mode, median, percentile, summarize, MIN_NORMALITY_RUNS};
use cmdbench::{Sample, SampleStore};
use proptest::prelude::*;

fn sorted(mut values: Vec<i64>) -> Vec<i64> {
    values.sort_unstable();
    values
}

fn store_of(command: &str, users: &[i64]) -> SampleStore {
    let mut store = SampleStore::new();
    for &user in users {
        store.push(Sample {
            command: command.to_string(),
            user_us: user,
            system_us: user / 3,
            wall_us: user + 17,
            maxrss_bytes: 4096 * (user % 11),
            vcsw: user % 5,
            icsw: user % 7,
            ..Default::default()
        });
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_mode_within_range(values in prop::collection::vec(0i64..1_000_000, 1..200)) {
        let values = sorted(values);
        let mode = half_sample_mode(&values).unwrap();
        prop_assert!(values[0] <= mode);
        prop_assert!(mode <= values[values.len() - 1]);
    }

    #[test]
    fn prop_mode_ignores_input_order(values in prop::collection::vec(0i64..10_000, 1..100)) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(
            half_sample_mode(&sorted(values)),
            half_sample_mode(&sorted(reversed))
        );
    }

    #[test]
    fn prop_mode_of_constant_is_constant(value in -1_000i64..1_000_000, n in 1usize..50) {
        prop_assert_eq!(half_sample_mode(&vec![value; n]), Some(value));
    }

    #[test]
    fn prop_median_within_range(values in prop::collection::vec(0i64..1_000_000, 1..200)) {
        let values = sorted(values);
        let m = median(&values).unwrap();
        prop_assert!(values[0] <= m && m <= values[values.len() - 1]);
    }

    #[test]
    fn prop_percentile_availability(n in 1usize..250) {
        let values: Vec<i64> = (0..n as i64).collect();
        prop_assert_eq!(percentile(95, &values).is_some(), n >= 20);
        prop_assert_eq!(percentile(99, &values).is_some(), n >= 100);
    }

    #[test]
    fn prop_percentiles_are_ordered(values in prop::collection::vec(0i64..1_000_000, 100..300)) {
        let values = sorted(values);
        let p95 = percentile(95, &values).unwrap();
        let p99 = percentile(99, &values).unwrap();
        prop_assert!(median(&values).unwrap() <= p95);
        prop_assert!(p95 <= p99);
        prop_assert!(p99 <= values[values.len() - 1]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_summarize_consumes_one_command(
        first in prop::collection::vec(1i64..100_000, 1..40),
        second in prop::collection::vec(1i64..100_000, 1..40),
    ) {
        let mut store = store_of("first", &first);
        for sample in store_of("second", &second).iter() {
            store.push(sample.clone());
        }

        let mut cursor = 0;
        let a = summarize(&store, &mut cursor).unwrap();
        prop_assert_eq!(a.runs, first.len());
        prop_assert_eq!(cursor, first.len());

        let b = summarize(&store, &mut cursor).unwrap();
        prop_assert_eq!(b.command.as_str(), "second");
        prop_assert_eq!(b.runs, second.len());
        prop_assert_eq!(cursor, store.len());
        prop_assert!(summarize(&store, &mut cursor).is_err());
    }

    #[test]
    fn prop_small_runs_skip_normality(
        users in prop::collection::vec(1i64..100_000, 1..=MIN_NORMALITY_RUNS),
    ) {
        let store = store_of("x", &users);
        let summary = summarize(&store, &mut 0).unwrap();
        prop_assert_eq!(summary.normality.p_normal, 1.0);
    }

    #[test]
    fn prop_p_normal_is_probability(users in prop::collection::vec(1i64..100_000, 8..120)) {
        let store = store_of("x", &users);
        let summary = summarize(&store, &mut 0).unwrap();
        let p = summary.normality.p_normal;
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }

    #[test]
    fn prop_summary_csv_row_reads_back(users in prop::collection::vec(1i64..100_000, 1..150)) {
        let store = store_of("cmd, with \"quotes\"", &users);
        let summary = summarize(&store, &mut 0).unwrap();
        let parsed = parse_summary_row(&format_summary(&summary)).unwrap();
        prop_assert_eq!(parsed, summary);
    }
}
