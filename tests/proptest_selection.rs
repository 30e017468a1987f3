//! Property-Based Tests — Metric Selection Invariants
//!
//! Uses `proptest` to check that flag tables map onto the selection
//! set the same way regardless of which keys are present.

use std::collections::HashMap;

use proptest::prelude::*;

use http_monitor_chain::{MetricName, MetricSelection};

fn flag_table() -> impl Strategy<Value = HashMap<String, bool>> {
    prop::collection::hash_map(
        prop::sample::select(vec![
            "all".to_string(),
            "api_requests_total".to_string(),
            "response_duration_seconds".to_string(),
        ]),
        any::<bool>(),
        0..=3,
    )
}

proptest! {
    /// A metric is enabled exactly when its own flag or the wildcard is true.
    #[test]
    fn enabled_iff_flag_or_wildcard(flags in flag_table()) {
        let selection = MetricSelection::from_flags(flags.clone()).unwrap();
        let wildcard = flags.get("all").copied().unwrap_or(false);

        for name in MetricName::ALL {
            let own = flags.get(name.as_str()).copied().unwrap_or(false);
            prop_assert_eq!(selection.enables(name), own || wildcard);
        }
    }

    /// Any key outside the known set is rejected.
    #[test]
    fn unknown_keys_rejected(key in "[a-z_]{1,24}", enabled in any::<bool>()) {
        prop_assume!(key != "all" && MetricName::ALL.iter().all(|n| n.as_str() != key));
        prop_assert!(MetricSelection::from_flags([(key.as_str(), enabled)]).is_err());
    }

    /// `enabled()` lists exactly the names `enables()` accepts.
    #[test]
    fn enabled_iterator_matches_predicate(flags in flag_table()) {
        let selection = MetricSelection::from_flags(flags).unwrap();
        let listed: Vec<MetricName> = selection.enabled().collect();
        let expected: Vec<MetricName> = MetricName::ALL
            .into_iter()
            .filter(|name| selection.enables(*name))
            .collect();
        prop_assert_eq!(listed.is_empty(), selection.is_empty());
        prop_assert_eq!(listed, expected);
    }
}
