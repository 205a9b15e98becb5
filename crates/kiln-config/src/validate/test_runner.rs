use super::shape::{Coercion, Field, Shape, singleton, split_commas};
use super::{Checker, SectionValidator};
use crate::config::Section;
use crate::value::{Map, Value};

const PATH: &str = "testRunner";

const BROWSERS: Field = Field::new(
    "browsers",
    &[Shape::Array],
    "an Array (or a comma-separated String)",
)
.coerce(&[Coercion::new(Shape::String, split_commas)]);
const CONFIG: Field = Field::new("config", &[Shape::Function], "a Function");
const EXCLUDE_FROM_COVERAGE: Field = Field::new(
    "excludeFromCoverage",
    &[Shape::Array],
    "an Array (or a String for a single glob)",
)
.coerce(&[Coercion::new(Shape::String, singleton)]);
const EXTRA: Field = Field::new("extra", &[Shape::Object], "an Object");
const FRAMEWORKS: Field = Field::new("frameworks", &[Shape::Array], "an Array");
const PLUGINS: Field = Field::new("plugins", &[Shape::Array], "an Array");
const REPORTERS: Field = Field::new("reporters", &[Shape::Array], "an Array");
const TEST_CONTEXT: Field = Field::new("testContext", &[Shape::String], "a String");
const TEST_FILES: Field = Field::new(
    "testFiles",
    &[Shape::Array],
    "an Array (or a String for a single glob)",
)
.coerce(&[Coercion::new(Shape::String, singleton)]);

const ALLOWED: &[&str] = &[
    "browsers",
    "config",
    "excludeFromCoverage",
    "extra",
    "frameworks",
    "plugins",
    "reporters",
    "testContext",
    "testFiles",
];

/// Karma options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunnerValidator;

impl SectionValidator for TestRunnerValidator {
    fn section(&self) -> Section {
        Section::TestRunner
    }

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map) {
        checker.unexpected_keys(PATH, config, ALLOWED);

        checker.fields(
            PATH,
            config,
            &[
                BROWSERS,
                CONFIG,
                EXCLUDE_FROM_COVERAGE,
                EXTRA,
                FRAMEWORKS,
                PLUGINS,
                REPORTERS,
            ],
        );
        let context = checker.field(PATH, config, &TEST_CONTEXT);
        let files = checker.field(PATH, config, &TEST_FILES);

        if context.is_ok() && files.is_ok() {
            let value = config.get("testContext").cloned().unwrap_or_default();
            checker.error(
                "testRunner.testContext",
                value,
                "Can't be used together with testRunner.testFiles - use one or the other",
            );
        }

        let default_frameworks = Value::Array(vec![Value::from("mocha")]);
        if config.get("frameworks") == Some(&default_frameworks) {
            checker.hint(
                "testRunner.frameworks",
                "Mocha is the default test framework, so you can remove this config.",
            );
        }
    }
}
