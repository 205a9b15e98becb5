//! Keys that live beside the sections at the top of a config.

use super::Checker;
use super::shape::{Coercion, Field, Shape, both_envs, join_or};
use crate::config::Section;
use crate::project::ProjectType;
use crate::value::{Map, Value};

const POLYFILL: Field = Field::new("polyfill", &[Shape::Boolean], "a Boolean");
const BROWSERS: Field = Field::new(
    "browsers",
    &[Shape::Object],
    "an Object (or a String or Array of browserslist queries)",
)
.coerce(&[
    Coercion::new(Shape::String, both_envs),
    Coercion::new(Shape::Array, both_envs),
]);

/// Check `type` against the known project types.
///
/// Runs when the type is required or present. Returns the project type when
/// it is valid.
pub fn check_type(checker: &mut Checker<'_>, config: &Map, required: bool) -> Option<ProjectType> {
    let value = config.get("type");
    if value.is_none() && !required {
        return None;
    }
    let parsed = value
        .and_then(Value::as_str)
        .and_then(|ty| ty.parse::<ProjectType>().ok());
    if parsed.is_none() {
        let types: Vec<&str> = ProjectType::ALL.iter().map(|ty| ty.as_str()).collect();
        checker.error(
            "type",
            value.cloned().unwrap_or_default(),
            format!("Must be one of: {}", join_or(&types)),
        );
    }
    parsed
}

/// Check the non-section top-level keys and reject unknown ones.
pub fn check(checker: &mut Checker<'_>, config: &mut Map) {
    checker.field("", config, &POLYFILL);
    checker.field("", config, &BROWSERS);
    if let Some(browsers) = config.get("browsers").and_then(Value::as_object) {
        checker.unexpected_keys("browsers", browsers, &["development", "production"]);
    }

    let mut allowed = vec!["type", "polyfill", "browsers"];
    allowed.extend(Section::ALL.iter().map(|section| section.key()));
    checker.unexpected_keys_in("config", "top-level", config, &allowed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::DeprecationLog;
    use crate::report::ConfigReport;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Map {
        match Value::from(value) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn type_lists_the_alternatives() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);

        let config = map(json!({"type": "invalid-type"}));
        assert_eq!(check_type(&mut checker, &config, false), None);
        assert_eq!(
            check_type(&mut checker, &map(json!({"type": "web-module"})), true),
            Some(ProjectType::WebModule)
        );
        assert_eq!(check_type(&mut checker, &map(json!({})), false), None);

        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.path, "type");
        assert_eq!(
            error.message,
            "Must be one of: react-app, react-component, preact-app, inferno-app, web-app or web-module"
        );
    }

    #[test]
    fn missing_required_type_is_an_error() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);
        check_type(&mut checker, &Map::new(), true);
        assert_eq!(report.errors()[0].value, Value::Null);
    }

    #[test]
    fn browsers_string_applies_to_both_envs() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);
        let mut config = map(json!({"browsers": "last 1 chrome version", "polyfill": false}));
        check(&mut checker, &mut config);
        assert!(!report.has_errors());
        assert_eq!(
            config["browsers"],
            Value::from(json!({
                "development": "last 1 chrome version",
                "production": "last 1 chrome version"
            }))
        );
    }

    #[test]
    fn unknown_top_level_keys_are_one_error() {
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, &[]);
        let mut config = map(json!({"type": "web-app", "babel": {}, "webpack": {}}));
        check(&mut checker, &mut config);
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "config");
        assert_eq!(
            report.errors()[0].message,
            "Unexpected props in top-level config: babel, webpack"
        );
    }
}
