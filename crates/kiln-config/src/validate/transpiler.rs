use super::shape::{Coercion, Field, Shape, react_runtime, singleton};
use super::{Checker, Outcome, SectionValidator};
use crate::config::Section;
use crate::value::{Map, Value};

const PATH: &str = "transpiler";

const RUNTIME_OPTIONS: &[&str] = &["helpers", "polyfill", "regenerator", "useESModules"];

const CHERRY_PICK: Field = Field::new(
    "cherryPick",
    &[Shape::Array],
    "an Array (or a String for a single module)",
)
.coerce(&[Coercion::new(Shape::String, singleton)]);
const CONFIG: Field = Field::new("config", &[Shape::Function], "a Function");
const ENV: Field = Field::new("env", &[Shape::Object], "an Object");
const LOOSE: Field = Field::new("loose", &[Shape::Boolean], "a Boolean");
const PLUGINS: Field = Field::new(
    "plugins",
    &[Shape::Array],
    "an Array (or a String for a single plugin)",
)
.coerce(&[Coercion::new(Shape::String, singleton)]);
const PRESETS: Field = Field::new(
    "presets",
    &[Shape::Array],
    "an Array (or a String for a single preset)",
)
.coerce(&[Coercion::new(Shape::String, singleton)]);
const PROPOSALS: Field = Field::new("proposals", &[Shape::OneOf(&["all"]), Shape::False], "'all' or false");
const REACT: Field = Field::new(
    "react",
    &[Shape::Object],
    "an Object (or 'automatic' or 'classic' to set the JSX runtime)",
)
.coerce(&[Coercion::new(Shape::OneOf(&["automatic", "classic"]), react_runtime)]);
const REACT_CONSTANT_ELEMENTS: Field =
    Field::new("reactConstantElements", &[Shape::Boolean], "a Boolean");
const REMOVE_PROP_TYPES: Field = Field::new(
    "removePropTypes",
    &[Shape::False, Shape::Object],
    "false or an Object",
);
const RUNTIME: Field = Field::new(
    "runtime",
    &[Shape::Boolean, Shape::OneOf(RUNTIME_OPTIONS)],
    "a Boolean or one of: helpers, polyfill, regenerator or useESModules",
);
const STAGE: Field = Field::new(
    "stage",
    &[Shape::Range(0, 3), Shape::False],
    "a Number between 0 and 3, or false",
);

const FIELDS: &[Field] = &[
    CHERRY_PICK,
    CONFIG,
    ENV,
    LOOSE,
    PLUGINS,
    PRESETS,
    PROPOSALS,
    REACT,
    REACT_CONSTANT_ELEMENTS,
    REMOVE_PROP_TYPES,
    RUNTIME,
];

const ALLOWED: &[&str] = &[
    "cherryPick",
    "config",
    "env",
    "loose",
    "plugins",
    "presets",
    "proposals",
    "react",
    "reactConstantElements",
    "removePropTypes",
    "runtime",
    "stage",
];

/// Babel options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranspilerValidator;

impl SectionValidator for TranspilerValidator {
    fn section(&self) -> Section {
        Section::Transpiler
    }

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map) {
        checker.unexpected_keys(PATH, config, ALLOWED);

        migrate_stage(checker, config);

        checker.fields(PATH, config, FIELDS);

        if config.get("loose") == Some(&Value::Bool(true)) {
            checker.hint(
                "transpiler.loose",
                "Loose mode is enabled by default, so you can remove this config.",
            );
        }
    }
}

/// `stage` predates proposal selection: `false` still disables proposals and
/// any stage number enables all of them.
fn migrate_stage(checker: &mut Checker<'_>, config: &mut Map) {
    if checker.field(PATH, config, &STAGE) != Outcome::Valid {
        return;
    }
    let Some(stage) = config.shift_remove("stage") else {
        return;
    };
    let proposals = if stage.is_false() {
        Value::Bool(false)
    } else {
        Value::from("all")
    };

    checker.deprecated_once(
        "transpiler.stage",
        [
            "Deprecated - use transpiler.proposals instead.".to_string(),
            format!("transpiler.stage: {stage} is treated as transpiler.proposals: {proposals}"),
        ],
    );

    if !config.contains_key("proposals") {
        config.insert("proposals".to_string(), proposals);
    }
}
