//! Property-based tests for argument override merging.

use kiln_config::{Value, merge_replacing_arrays};
use proptest::prelude::*;

/// Small config-like trees: scalars, arrays and objects over a few keys.
fn tree_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-d]", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn object_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-d]", tree_strategy()), 0..4)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

/// Every leaf path of `overrides` must read back unchanged from `merged`.
fn assert_overrides_win(merged: &Value, overrides: &Value) -> Result<(), TestCaseError> {
    match overrides {
        Value::Object(map) => {
            for (key, value) in map {
                let merged_value = merged.get(key);
                prop_assert!(merged_value.is_some(), "missing key {key}");
                if let Some(merged_value) = merged_value {
                    assert_overrides_win(merged_value, value)?;
                }
            }
            Ok(())
        }
        other => {
            prop_assert_eq!(merged, other);
            Ok(())
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: override values are always visible after merging
    #[test]
    fn prop_overrides_win(base in object_strategy(), overrides in object_strategy()) {
        let mut merged = base.clone();
        merge_replacing_arrays(&mut merged, overrides.clone());
        assert_overrides_win(&merged, &overrides)?;
    }

    /// Property: base keys the overrides don't mention survive untouched
    #[test]
    fn prop_untouched_keys_survive(base in object_strategy(), overrides in object_strategy()) {
        let mut merged = base.clone();
        merge_replacing_arrays(&mut merged, overrides.clone());

        if let (Some(base), Some(overrides)) = (base.as_object(), overrides.as_object()) {
            for (key, value) in base {
                if !overrides.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }
    }

    /// Property: merging the same overrides twice changes nothing more
    #[test]
    fn prop_merge_is_idempotent(base in object_strategy(), overrides in object_strategy()) {
        let mut once = base.clone();
        merge_replacing_arrays(&mut once, overrides.clone());
        let mut twice = once.clone();
        merge_replacing_arrays(&mut twice, overrides);
        prop_assert_eq!(once, twice);
    }
}
