use super::shape::{Coercion, Field, Shape, umd_global};
use super::{Checker, Outcome, SectionValidator};
use crate::config::Section;
use crate::value::{Map, Value};

const PATH: &str = "packagePublish";

const CJS: Field = Field::new("cjs", &[Shape::Boolean], "a Boolean");
const ES_MODULES: Field = Field::new("esModules", &[Shape::Boolean], "a Boolean");
const UMD: Field = Field::new(
    "umd",
    &[Shape::False, Shape::Object],
    "false, a String (the global name) or an Object",
)
.coerce(&[Coercion::new(Shape::String, umd_global)]);

const UMD_ENTRY: Field = Field::new("entry", &[Shape::String], "a String");
const UMD_EXTERNALS: Field = Field::new("externals", &[Shape::Object], "an Object");
const UMD_GLOBAL: Field = Field::new("global", &[Shape::String], "a String");

const ALLOWED: &[&str] = &["cjs", "esModules", "umd"];

/// npm build options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackagePublishValidator;

impl SectionValidator for PackagePublishValidator {
    fn section(&self) -> Section {
        Section::PackagePublish
    }

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map) {
        checker.unexpected_keys(PATH, config, ALLOWED);
        checker.fields(PATH, config, &[CJS, ES_MODULES]);

        if checker.field(PATH, config, &UMD) != Outcome::Valid {
            return;
        }
        let Some(umd) = config.get_mut("umd").and_then(Value::as_object_mut) else {
            return;
        };

        let umd_path = "packagePublish.umd";
        checker.unexpected_keys(umd_path, umd, &["entry", "externals", "global"]);
        checker.fields(umd_path, umd, &[UMD_ENTRY, UMD_EXTERNALS, UMD_GLOBAL]);
        if !umd.contains_key("global") {
            checker.error(
                umd_path,
                Value::Object(umd.clone()),
                "Must include global - the name the UMD build exports as a global variable",
            );
        }
    }
}
