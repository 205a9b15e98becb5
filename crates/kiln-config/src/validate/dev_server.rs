use super::shape::{Field, Shape};
use super::{Checker, SectionValidator};
use crate::config::Section;
use crate::value::{Map, Value};

const PATH: &str = "devServer";

const FIELDS: &[Field] = &[
    Field::new("headers", &[Shape::Object], "an Object"),
    Field::new(
        "historyApiFallback",
        &[Shape::Boolean, Shape::Object],
        "a Boolean or an Object",
    ),
    Field::new("host", &[Shape::String], "a String"),
    Field::new("hot", &[Shape::Boolean], "a Boolean"),
    Field::new("https", &[Shape::Boolean, Shape::Object], "a Boolean or an Object"),
    Field::new("open", &[Shape::Boolean, Shape::String], "a Boolean or a String"),
    Field::new("overlay", &[Shape::Boolean], "a Boolean"),
    Field::new("port", &[Shape::Range(1, 65535)], "a Number between 1 and 65535"),
    Field::new("proxy", &[Shape::Object, Shape::Array], "an Object or an Array"),
];

/// Development server options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevServerValidator;

impl SectionValidator for DevServerValidator {
    fn section(&self) -> Section {
        Section::DevServer
    }

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map) {
        let allowed: Vec<&str> = FIELDS.iter().map(|field| field.key).collect();
        checker.unexpected_keys(PATH, config, &allowed);
        checker.fields(PATH, config, FIELDS);

        if config.get("hot") == Some(&Value::Bool(true)) {
            checker.hint(
                "devServer.hot",
                "Hot reloading is enabled by default, so you can remove this config.",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::DeprecationLog;
    use crate::report::ConfigReport;
    use serde_json::json;

    fn run(value: serde_json::Value) -> ConfigReport {
        let mut config = match Value::from(value) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);
        DevServerValidator.validate(&mut checker, &mut config);
        report
    }

    #[test]
    fn port_must_be_in_range() {
        assert!(!run(json!({"port": 8080})).has_errors());

        let report = run(json!({"port": 70000}));
        assert_eq!(report.errors()[0].path, "devServer.port");
        assert_eq!(report.errors()[0].message, "Must be a Number between 1 and 65535");
    }

    #[test]
    fn proxy_accepts_objects_and_arrays() {
        assert!(!run(json!({"proxy": {"/api": "http://localhost:4000"}})).has_errors());
        assert!(!run(json!({"proxy": [{"context": ["/api"]}]})).has_errors());
        assert!(run(json!({"proxy": "http://localhost:4000"})).has_errors());
    }

    #[test]
    fn default_hot_gets_a_hint() {
        let report = run(json!({"hot": true, "open": "firefox"}));
        assert!(!report.has_errors());
        assert_eq!(report.hints()[0].path, "devServer.hot");
    }
}
