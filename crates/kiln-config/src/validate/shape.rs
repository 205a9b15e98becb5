//! Declarative field shapes and shorthand coercions.
//!
//! A [`Field`] lists the shapes a value may strictly have, then the
//! alternate shapes it may be coerced from. Validation tries the strict
//! shapes first and each coercion in declared order; only when nothing
//! matches is a single `Must be ...` error recorded.

use crate::value::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Boolean,
    Number,
    String,
    Array,
    Object,
    Function,
    /// The literal `false`, used to disable a feature
    False,
    /// A string from a fixed set
    OneOf(&'static [&'static str]),
    /// An integer within an inclusive range
    Range(i64, i64),
}

impl Shape {
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Shape::Boolean, Value::Bool(_)) => true,
            (Shape::Number, Value::Number(n)) => n.is_finite(),
            (Shape::String, Value::String(_)) => true,
            (Shape::Array, Value::Array(_)) => true,
            (Shape::Object, Value::Object(_)) => true,
            (Shape::Function, Value::Function(_)) => true,
            (Shape::False, Value::Bool(b)) => !b,
            (Shape::OneOf(allowed), Value::String(s)) => allowed.contains(&s.as_str()),
            #[allow(clippy::cast_precision_loss)]
            (Shape::Range(lo, hi), Value::Number(n)) => {
                n.fract() == 0.0 && *n >= lo as f64 && *n <= hi as f64
            }
            _ => false,
        }
    }
}

/// An accepted alternate shape and the pure conversion to the canonical one.
#[derive(Debug, Clone, Copy)]
pub struct Coercion {
    pub from: Shape,
    pub into: fn(Value) -> Value,
}

impl Coercion {
    pub const fn new(from: Shape, into: fn(Value) -> Value) -> Self {
        Self { from, into }
    }
}

/// A recognised key and what it may hold.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub accepts: &'static [Shape],
    pub coercions: &'static [Coercion],
    /// Completes the sentence "Must be ..."
    pub expected: &'static str,
}

impl Field {
    pub const fn new(key: &'static str, accepts: &'static [Shape], expected: &'static str) -> Self {
        Self {
            key,
            accepts,
            coercions: &[],
            expected,
        }
    }

    pub const fn coerce(mut self, coercions: &'static [Coercion]) -> Self {
        self.coercions = coercions;
        self
    }
}

/// `x` → `[x]`
pub fn singleton(value: Value) -> Value {
    Value::Array(vec![value])
}

/// `"a, b"` → `["a", "b"]`
pub fn split_commas(value: Value) -> Value {
    match value {
        Value::String(s) => Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(Value::from)
                .collect(),
        ),
        other => other,
    }
}

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

pub fn umd_global(value: Value) -> Value {
    wrap("global", value)
}

pub fn react_runtime(value: Value) -> Value {
    wrap("runtime", value)
}

pub fn autoprefixer_browsers(value: Value) -> Value {
    wrap("overrideBrowserslist", value)
}

pub fn copy_patterns(value: Value) -> Value {
    wrap("patterns", value)
}

pub fn locales(value: Value) -> Value {
    wrap("locales", value)
}

/// One browserslist query for both environments.
pub fn both_envs(value: Value) -> Value {
    let mut map = Map::new();
    map.insert("development".to_string(), value.clone());
    map.insert("production".to_string(), value);
    Value::Object(map)
}

/// `["a", "b", "c"]` → `"a, b or c"`
pub fn join_or<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} or {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn false_only_matches_false() {
        assert!(Shape::False.matches(&Value::Bool(false)));
        assert!(!Shape::False.matches(&Value::Bool(true)));
    }

    #[test]
    fn ranges_need_integers() {
        let port = Shape::Range(1, 65535);
        assert!(port.matches(&Value::Number(3000.0)));
        assert!(!port.matches(&Value::Number(0.0)));
        assert!(!port.matches(&Value::Number(80.5)));
        assert!(!port.matches(&Value::from("3000")));
    }

    #[test]
    fn regexes_match_no_shape() {
        let re = Value::regex("x").unwrap();
        for shape in [
            Shape::Boolean,
            Shape::Number,
            Shape::String,
            Shape::Array,
            Shape::Object,
            Shape::Function,
            Shape::False,
            Shape::OneOf(&["x"]),
            Shape::Range(0, 3),
        ] {
            assert!(!shape.matches(&re), "{shape:?}");
        }
    }

    #[test]
    fn coercions_build_canonical_shapes() {
        assert_eq!(
            split_commas(Value::from("Chrome, Firefox,")),
            Value::from(json!(["Chrome", "Firefox"]))
        );
        assert_eq!(
            umd_global(Value::from("MyGlobal")),
            Value::from(json!({"global": "MyGlobal"}))
        );
        assert_eq!(
            both_envs(Value::from("last 2 versions")),
            Value::from(json!({
                "development": "last 2 versions",
                "production": "last 2 versions"
            }))
        );
    }

    #[test]
    fn join_or_lists_alternatives() {
        assert_eq!(join_or::<&str>(&[]), "");
        assert_eq!(join_or(&["css"]), "css");
        assert_eq!(join_or(&["a", "b", "c"]), "a, b or c");
    }
}
