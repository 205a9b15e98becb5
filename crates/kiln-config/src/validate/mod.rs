//! Per-section schema validators.
//!
//! Validators only append to the report, but they may rewrite their section
//! in place: that is how shorthand forms and deprecated keys become canonical
//! before anything downstream reads the config.

mod bundler;
mod dev_server;
mod package_publish;
pub mod shape;
mod test_runner;
pub mod top_level;
mod transpiler;

pub use bundler::{BundlerValidator, LOADER_IDS};
pub use dev_server::DevServerValidator;
pub use package_publish::PackagePublishValidator;
pub use test_runner::TestRunnerValidator;
pub use transpiler::TranspilerValidator;

use crate::config::Section;
use crate::deprecation::DeprecationLog;
use crate::report::ConfigReport;
use crate::value::{Map, Value};
use shape::Field;

/// Validates and normalizes one top-level section.
pub trait SectionValidator {
    fn section(&self) -> Section;

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map);
}

/// Validators in the order they run.
pub fn validators() -> [&'static dyn SectionValidator; 5] {
    [
        &TranspilerValidator,
        &TestRunnerValidator,
        &PackagePublishValidator,
        &BundlerValidator,
        &DevServerValidator,
    ]
}

/// What [`Checker::field`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Absent,
    Valid,
    Coerced,
    Invalid,
}

impl Outcome {
    /// The value is present and now has a canonical shape.
    pub fn is_ok(self) -> bool {
        matches!(self, Outcome::Valid | Outcome::Coerced)
    }
}

/// Shared state handed to every validator.
pub struct Checker<'a> {
    report: &'a mut ConfigReport,
    deprecations: &'a DeprecationLog,
    style_types: &'a [String],
}

impl<'a> Checker<'a> {
    pub fn new(
        report: &'a mut ConfigReport,
        deprecations: &'a DeprecationLog,
        style_types: &'a [String],
    ) -> Self {
        Self {
            report,
            deprecations,
            style_types,
        }
    }

    pub fn report(&mut self) -> &mut ConfigReport {
        self.report
    }

    /// Style types accepted by `bundler.styles`.
    pub fn style_types(&self) -> &[String] {
        self.style_types
    }

    pub fn error(&mut self, path: impl Into<String>, value: impl Into<Value>, message: impl Into<String>) {
        self.report.error(path, value, message);
    }

    pub fn hint(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.report.hint(path, [message.into()]);
    }

    /// Record a deprecation unless `key` was already reported by this log.
    pub fn deprecated_once<I, S>(&mut self, key: &'static str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.deprecations.first_warning(key) {
            self.report.deprecated(key, messages);
        }
    }

    /// Check `field` in `map`, coercing shorthand in place.
    ///
    /// `path` locates `map` in the config; pass `""` for the top level.
    pub fn field(&mut self, path: &str, map: &mut Map, field: &Field) -> Outcome {
        let Some(value) = map.get_mut(field.key) else {
            return Outcome::Absent;
        };
        if field.accepts.iter().any(|shape| shape.matches(value)) {
            return Outcome::Valid;
        }
        if let Some(coercion) = field.coercions.iter().find(|c| c.from.matches(value)) {
            let original = std::mem::take(value);
            *value = (coercion.into)(original);
            return Outcome::Coerced;
        }
        let field_path = if path.is_empty() {
            field.key.to_string()
        } else {
            format!("{path}.{}", field.key)
        };
        self.report.error(
            field_path,
            value.clone(),
            format!("Must be {}", field.expected),
        );
        Outcome::Invalid
    }

    /// Check every field in order.
    pub fn fields(&mut self, path: &str, map: &mut Map, fields: &[Field]) {
        for field in fields {
            self.field(path, map, field);
        }
    }

    /// Record one error listing every key of `map` not in `allowed`.
    ///
    /// Returns `true` when there were none.
    pub fn unexpected_keys(&mut self, path: &str, map: &Map, allowed: &[&str]) -> bool {
        self.unexpected_keys_in(path, path, map, allowed)
    }

    /// [`Checker::unexpected_keys`] with a different name for the object in
    /// the message.
    pub fn unexpected_keys_in(
        &mut self,
        path: &str,
        label: &str,
        map: &Map,
        allowed: &[&str],
    ) -> bool {
        let unexpected: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        if unexpected.is_empty() {
            return true;
        }
        let plural = if unexpected.len() > 1 { "s" } else { "" };
        let keys = unexpected.join(", ");
        self.report.error(
            path,
            keys.clone(),
            format!("Unexpected prop{plural} in {label} config: {keys}"),
        );
        false
    }
}

/// Run every section validator over a tree whose sections are all objects.
pub fn check_sections(checker: &mut Checker<'_>, tree: &mut Map) {
    for validator in validators() {
        let section = validator.section();
        if let Some(config) = tree.get_mut(section.key()).and_then(Value::as_object_mut) {
            validator.validate(checker, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shape::{Coercion, Shape, singleton};

    const ITEMS: Field = Field::new("items", &[Shape::Array], "an Array (or a String)")
        .coerce(&[Coercion::new(Shape::String, singleton)]);

    fn map(value: serde_json::Value) -> Map {
        match Value::from(value) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn strict_shape_wins_over_coercion() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);

        let mut config = map(json!({"items": ["a"]}));
        assert_eq!(checker.field("demo", &mut config, &ITEMS), Outcome::Valid);

        let mut config = map(json!({"items": "a"}));
        assert_eq!(checker.field("demo", &mut config, &ITEMS), Outcome::Coerced);
        assert_eq!(config["items"], Value::from(json!(["a"])));

        let mut config = map(json!({}));
        assert_eq!(checker.field("demo", &mut config, &ITEMS), Outcome::Absent);
        assert!(!report.has_errors());
    }

    #[test]
    fn mismatch_records_one_error() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);

        let mut config = map(json!({"items": 42}));
        assert_eq!(checker.field("demo", &mut config, &ITEMS), Outcome::Invalid);

        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "demo.items");
        assert_eq!(report.errors()[0].message, "Must be an Array (or a String)");
    }

    #[test]
    fn unexpected_keys_are_aggregated() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);

        let config = map(json!({"a": 1, "foo": 2, "bar": 3}));
        assert!(!checker.unexpected_keys("demo", &config, &["a"]));

        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.path, "demo");
        assert_eq!(error.message, "Unexpected props in demo config: foo, bar");
    }

    #[test]
    fn deprecations_are_reported_once_per_log() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);
        checker.deprecated_once("demo.old", ["Deprecated"]);
        checker.deprecated_once("demo.old", ["Deprecated"]);
        assert_eq!(report.deprecations().len(), 1);
    }
}
