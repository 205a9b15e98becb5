//! Deep merge used to apply command-line overrides.

use crate::value::{Map, Value};

/// Merge `overrides` into `base`.
///
/// Objects merge key by key. Every other override value, arrays included,
/// replaces what is in `base`: an override of `patterns: ["b", "c"]` over
/// `patterns: ["a"]` yields `["b", "c"]`.
pub fn merge_replacing_arrays(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => merge_maps(base, overrides),
        (base, overrides) => *base = overrides,
    }
}

/// [`merge_replacing_arrays`] for two object maps.
pub fn merge_maps(base: &mut Map, overrides: Map) {
    for (key, value) in overrides {
        match base.get_mut(&key) {
            Some(existing) => merge_replacing_arrays(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn override_arrays_replace_base_arrays() {
        let mut base = Value::from(json!({"bundler": {"copy": {"patterns": ["a"]}}}));
        let overrides = Value::from(json!({"bundler": {"copy": {"patterns": ["b", "c"]}}}));
        merge_replacing_arrays(&mut base, overrides);
        assert_eq!(
            base,
            Value::from(json!({"bundler": {"copy": {"patterns": ["b", "c"]}}}))
        );
    }

    #[test]
    fn objects_merge_recursively() {
        let mut base = Value::from(json!({"devServer": {"port": 3000, "host": "localhost"}}));
        merge_replacing_arrays(&mut base, Value::from(json!({"devServer": {"port": 8080}})));
        assert_eq!(
            base,
            Value::from(json!({"devServer": {"port": 8080, "host": "localhost"}}))
        );
    }

    #[test]
    fn scalars_replace_objects() {
        let mut base = Value::from(json!({"packagePublish": {"umd": {"global": "A"}}}));
        merge_replacing_arrays(&mut base, Value::from(json!({"packagePublish": {"umd": false}})));
        assert_eq!(base, Value::from(json!({"packagePublish": {"umd": false}})));
    }
}
