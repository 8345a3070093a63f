//! Algebraic properties of merge and diff.

use confpool::{diff, is_equivalent, merge, Pool, Section, Sections, Strategy};
use proptest::prelude::*;

fn section_strategy() -> impl proptest::strategy::Strategy<Value = Section> {
    prop::collection::hash_map("[a-d]{1,2}", "[a-z]{0,3}", 0..4)
}

fn sections_strategy() -> impl proptest::strategy::Strategy<Value = Sections> {
    prop::collection::hash_map("[A-C]", section_strategy(), 0..3)
}

/// Namespace every key so inputs tagged differently never share a key.
fn tagged(sections: Sections, tag: &str) -> Sections {
    sections
        .into_iter()
        .map(|(name, params)| {
            let params = params
                .into_iter()
                .map(|(k, v)| (format!("{}.{}", tag, k), v))
                .collect();
            (name, params)
        })
        .collect()
}

fn overlapping_keys(a: &Sections, b: &Sections) -> Vec<(String, String)> {
    let mut keys = Vec::new();
    for (name, params) in a {
        if let Some(other) = b.get(name) {
            for key in params.keys() {
                if other.contains_key(key) {
                    keys.push((name.clone(), key.clone()));
                }
            }
        }
    }
    keys
}

proptest! {
    #[test]
    fn test_overwrite_takes_second_value(a in sections_strategy(), b in sections_strategy()) {
        let merged = merge(&a, &b, Strategy::Overwrite).unwrap();
        for (name, key) in overlapping_keys(&a, &b) {
            prop_assert_eq!(&merged[&name][&key], &b[&name][&key]);
        }
        // Nothing from either side is lost.
        prop_assert!(diff(&b, &merged).is_empty());
    }

    #[test]
    fn test_keep_takes_first_value(a in sections_strategy(), b in sections_strategy()) {
        let merged = merge(&a, &b, Strategy::Keep).unwrap();
        for (name, key) in overlapping_keys(&a, &b) {
            prop_assert_eq!(&merged[&name][&key], &a[&name][&key]);
        }
        prop_assert!(diff(&a, &merged).is_empty());
    }

    #[test]
    fn test_report_fails_only_on_divergent_values(a in sections_strategy(), b in sections_strategy()) {
        let divergent = overlapping_keys(&a, &b)
            .into_iter()
            .any(|(name, key)| a[&name][&key] != b[&name][&key]);

        let pool = Pool::new(a.clone());
        let result = pool.merge(&b, Strategy::Report);
        prop_assert_eq!(result.is_err(), divergent);
        if divergent {
            prop_assert_eq!(pool.raw(), a);
        }
    }

    #[test]
    fn test_disjoint_merge_is_associative(
        a in sections_strategy(),
        b in sections_strategy(),
        c in sections_strategy(),
    ) {
        let (a, b, c) = (tagged(a, "a"), tagged(b, "b"), tagged(c, "c"));

        let left = merge(&merge(&a, &b, Strategy::Overwrite).unwrap(), &c, Strategy::Overwrite).unwrap();
        let right = merge(&a, &merge(&b, &c, Strategy::Overwrite).unwrap(), Strategy::Overwrite).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn test_unset_removes_key(a in sections_strategy()) {
        let pool = Pool::new(a.clone());
        for (name, params) in &a {
            for key in params.keys() {
                prop_assert!(pool.unset(name, key));
                prop_assert!(pool.get(name, key).is_none());
            }
            prop_assert!(pool.unset(name, ""));
            prop_assert!(pool.section(name).is_none());
        }
        prop_assert!(pool.is_empty());
    }

    #[test]
    fn test_equivalence_matches_equality(a in sections_strategy(), b in sections_strategy()) {
        prop_assert!(is_equivalent(&a, &a.clone()));
        prop_assert_eq!(is_equivalent(&a, &b), a == b);
    }
}
