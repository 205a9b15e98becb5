//! Webpack options.
//!
//! Besides field shapes this validator owns the back-compat shims for renamed
//! options and the `rules`/`styles` shorthand, where loader options may be
//! written directly on a rule and are moved under `options` once the subtree
//! is known to be well-formed.

use super::shape::{Coercion, Field, Shape, autoprefixer_browsers, copy_patterns, join_or, locales};
use super::{Checker, Outcome, SectionValidator};
use crate::config::Section;
use crate::value::{Map, Value};

const PATH: &str = "bundler";

/// Loaders a style rule can configure besides the style type's own.
pub const LOADER_IDS: &[&str] = &["css", "postcss", "miniExtractCss", "style"];

const ALIASES: Field = Field::new("aliases", &[Shape::Object], "an Object");
const AUTOPREFIXER: Field = Field::new(
    "autoprefixer",
    &[Shape::Object],
    "an Object (or a String of browsers to target)",
)
.coerce(&[Coercion::new(Shape::String, autoprefixer_browsers)]);
const COMPAT: Field = Field::new("compat", &[Shape::Object], "an Object");
const CONFIG: Field = Field::new("config", &[Shape::Function], "a Function");
const COPY: Field = Field::new(
    "copy",
    &[Shape::Object],
    "an Object (or an Array of patterns)",
)
.coerce(&[Coercion::new(Shape::Array, copy_patterns)]);
const DEBUG: Field = Field::new("debug", &[Shape::Boolean], "a Boolean");
const DEFINE: Field = Field::new("define", &[Shape::Object], "an Object");
const EXTRA: Field = Field::new("extra", &[Shape::Object], "an Object");
const EXTRACT_CSS: Field = Field::new(
    "extractCSS",
    &[Shape::False, Shape::Object],
    "false or an Object",
);
const HOISTING: Field = Field::new("hoisting", &[Shape::Boolean], "a Boolean");
const HTML: Field = Field::new("html", &[Shape::Object], "an Object");
const INSTALL: Field = Field::new("install", &[Shape::Object], "an Object");
const PUBLIC_PATH: Field = Field::new("publicPath", &[Shape::String], "a String");
const RULES: Field = Field::new("rules", &[Shape::Object], "an Object");
const STYLES: Field = Field::new("styles", &[Shape::False, Shape::Object], "false or an Object");
const TERSER: Field = Field::new("terser", &[Shape::False, Shape::Object], "false or an Object");

const COMPAT_ENZYME: Field = Field::new("enzyme", &[Shape::Boolean], "a Boolean");
const COMPAT_LOCALES: [Field; 3] = [
    locale_field("intl"),
    locale_field("moment"),
    locale_field("react-intl"),
];
const LOCALES: Field = Field::new("locales", &[Shape::Array], "an Array");

const COPY_PATTERNS: Field = Field::new("patterns", &[Shape::Array], "an Array");
const COPY_OPTIONS: Field = Field::new("options", &[Shape::Object], "an Object");

const ALLOWED: &[&str] = &[
    "aliases",
    "autoprefixer",
    "compat",
    "config",
    "copy",
    "debug",
    "define",
    "extra",
    "extractCSS",
    "hoisting",
    "html",
    "install",
    "publicPath",
    "rules",
    "styles",
    "terser",
];

const LOCALE_OPTIONS: &[Shape] = &[Shape::Object];
const LOCALE_SHORTHAND: &[Coercion] = &[Coercion::new(Shape::Array, locales)];

const fn locale_field(key: &'static str) -> Field {
    Field::new(key, LOCALE_OPTIONS, "an Object (or an Array of locales)").coerce(LOCALE_SHORTHAND)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BundlerValidator;

impl SectionValidator for BundlerValidator {
    fn section(&self) -> Section {
        Section::Bundler
    }

    fn validate(&self, checker: &mut Checker<'_>, config: &mut Map) {
        rename(checker, config, "bundler.uglify", &TERSER);
        rename(checker, config, "bundler.extractText", &EXTRACT_CSS);
        migrate_postcss_plugins(checker, config);
        drop_sinon_compat(checker, config);

        checker.unexpected_keys(PATH, config, ALLOWED);
        checker.fields(
            PATH,
            config,
            &[
                ALIASES,
                AUTOPREFIXER,
                CONFIG,
                DEBUG,
                DEFINE,
                EXTRA,
                EXTRACT_CSS,
                HOISTING,
                HTML,
                INSTALL,
                PUBLIC_PATH,
                TERSER,
            ],
        );

        if checker.field(PATH, config, &COMPAT).is_ok() {
            if let Some(compat) = config.get_mut("compat").and_then(Value::as_object_mut) {
                check_compat(checker, compat);
            }
        }

        let copy = checker.field(PATH, config, &COPY);
        if copy == Outcome::Valid {
            if let Some(copy) = config.get_mut("copy").and_then(Value::as_object_mut) {
                check_copy(checker, copy);
            }
        }

        if checker.field(PATH, config, &RULES).is_ok() {
            if let Some(rules) = config.get_mut("rules").and_then(Value::as_object_mut) {
                if check_rules(checker, rules) {
                    prepare_rules(rules);
                }
            }
        }

        if checker.field(PATH, config, &STYLES).is_ok() {
            if let Some(styles) = config.get_mut("styles").and_then(Value::as_object_mut) {
                if check_styles(checker, styles) {
                    prepare_styles(styles);
                }
            }
        }
    }
}

/// Move a renamed option to its new key unless the new key is already set.
///
/// The value is checked under the name the user wrote, and dropped if it
/// doesn't fit the new option.
fn rename(checker: &mut Checker<'_>, config: &mut Map, old_path: &'static str, to: &Field) {
    let from = old_path.trim_start_matches("bundler.");
    if !config.contains_key(from) {
        return;
    }
    checker.deprecated_once(old_path, [format!("Deprecated - renamed to bundler.{}.", to.key)]);
    let as_old = Field { key: from, ..*to };
    let valid = checker.field(PATH, config, &as_old).is_ok();
    let Some(value) = config.shift_remove(from) else {
        return;
    };
    if valid && !config.contains_key(to.key) {
        config.insert(to.key.to_string(), value);
    }
}

/// A bare Array of PostCSS plugins becomes the postcss rule's plugin option.
fn migrate_postcss_plugins(checker: &mut Checker<'_>, config: &mut Map) {
    if !matches!(config.get("postcss"), Some(Value::Array(_))) {
        return;
    }
    let Some(plugins) = config.shift_remove("postcss") else {
        return;
    };
    checker.deprecated_once(
        "bundler.postcss",
        [
            "Deprecated - configure PostCSS plugins with bundler.rules.postcss.options.plugins.",
            "The plugins given have been moved there.",
        ],
    );

    let rules = config
        .entry("rules".to_string())
        .or_insert_with(Value::object);
    let Some(rules) = rules.as_object_mut() else {
        return;
    };
    let rule = rules
        .entry("postcss".to_string())
        .or_insert_with(Value::object);
    let Some(rule) = rule.as_object_mut() else {
        return;
    };
    let options = rule
        .entry("options".to_string())
        .or_insert_with(Value::object);
    if let Some(options) = options.as_object_mut() {
        options.entry("plugins".to_string()).or_insert(plugins);
    }
}

fn drop_sinon_compat(checker: &mut Checker<'_>, config: &mut Map) {
    let Some(compat) = config.get_mut("compat").and_then(Value::as_object_mut) else {
        return;
    };
    if compat.shift_remove("sinon").is_some() {
        checker.deprecated_once(
            "bundler.compat.sinon",
            ["Deprecated - Sinon no longer needs compatibility config, so it has been removed."],
        );
    }
}

fn check_compat(checker: &mut Checker<'_>, compat: &mut Map) {
    let path = "bundler.compat";
    checker.unexpected_keys(path, compat, &["enzyme", "intl", "moment", "react-intl"]);
    checker.field(path, compat, &COMPAT_ENZYME);

    for field in &COMPAT_LOCALES {
        if checker.field(path, compat, field) != Outcome::Valid {
            continue;
        }
        let Some(options) = compat.get_mut(field.key).and_then(Value::as_object_mut) else {
            continue;
        };
        let field_path = format!("{path}.{}", field.key);
        if options.contains_key("locales") {
            checker.field(&field_path, options, &LOCALES);
        } else {
            checker.error(
                field_path,
                Value::Object(options.clone()),
                "Must include locales - an Array of locale names to bundle",
            );
        }
    }
}

fn check_copy(checker: &mut Checker<'_>, copy: &mut Map) {
    let path = "bundler.copy";
    checker.unexpected_keys(path, copy, &["patterns", "options"]);

    if !copy.contains_key("patterns") && !copy.contains_key("options") {
        checker.error(
            path,
            Value::Object(copy.clone()),
            "Must include patterns or options when given as an Object",
        );
        return;
    }

    let patterns = checker.field(path, copy, &COPY_PATTERNS);
    checker.field(path, copy, &COPY_OPTIONS);

    if patterns == Outcome::Valid && copy.len() == 1 {
        checker.hint(
            path,
            "You can configure just an Array of patterns when you don't need to set options.",
        );
    }
}

/// Returns `true` when every rule is well-formed.
fn check_rules(checker: &mut Checker<'_>, rules: &Map) -> bool {
    let mut clean = true;
    for (id, rule) in rules {
        let Some(rule) = rule.as_object() else {
            checker.error(format!("bundler.rules.{id}"), rule.clone(), "Must be an Object");
            clean = false;
            continue;
        };
        if let Some(uses) = rule.get("use") {
            if !matches!(uses, Value::Array(_)) {
                checker.error(format!("bundler.rules.{id}.use"), uses.clone(), "Must be an Array");
                clean = false;
            }
        }
    }
    clean
}

const RULE_KEYS: &[&str] = &["test", "include", "exclude", "loader"];

/// A rule written as bare loader options gets them moved under `options`.
fn prepare_rules(rules: &mut Map) {
    for rule in rules.values_mut() {
        let Some(rule) = rule.as_object_mut() else {
            continue;
        };
        if ["options", "use"].iter().any(|key| rule.contains_key(*key)) {
            continue;
        }
        let option_keys: Vec<String> = rule
            .keys()
            .filter(|key| !RULE_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if option_keys.is_empty() {
            continue;
        }
        let mut options = Map::new();
        for key in option_keys {
            if let Some(value) = rule.shift_remove(&key) {
                options.insert(key, value);
            }
        }
        rule.insert("options".to_string(), Value::Object(options));
    }
}

fn style_loader_ids(style_type: &str) -> Vec<&str> {
    let mut ids = LOADER_IDS.to_vec();
    if !ids.contains(&style_type) {
        ids.push(style_type);
    }
    ids
}

/// Returns `true` when every style type is known and well-formed.
fn check_styles(checker: &mut Checker<'_>, styles: &Map) -> bool {
    let mut clean = true;
    for (style_type, rules) in styles {
        if !checker.style_types().iter().any(|known| known == style_type) {
            let known: Vec<String> = checker
                .style_types()
                .iter()
                .map(|known| format!("'{known}'"))
                .collect();
            checker.error(
                "bundler.styles",
                format!("property: {style_type}"),
                format!("Unknown style type - must be {}", join_or(&known)),
            );
            clean = false;
            continue;
        }

        let path = format!("bundler.styles.{style_type}");
        let Some(rules) = rules.as_array() else {
            checker.error(
                path,
                rules.clone(),
                "Must be an Array - wrap a single style rule in an Array",
            );
            clean = false;
            continue;
        };

        let mut allowed = vec!["test", "include", "exclude", "loaders"];
        allowed.extend(style_loader_ids(style_type));

        for (index, rule) in rules.iter().enumerate() {
            let rule_path = format!("{path}[{index}]");
            let Some(rule) = rule.as_object() else {
                checker.error(rule_path, rule.clone(), "Must be an Object");
                clean = false;
                continue;
            };
            if !checker.unexpected_keys_in(&rule_path, "style rule", rule, &allowed) {
                clean = false;
            }
            if let Some(loaders) = rule.get("loaders") {
                if !loaders.is_object() {
                    checker.error(format!("{rule_path}.loaders"), loaders.clone(), "Must be an Object");
                    clean = false;
                }
            }
        }
    }
    clean
}

/// Loader options given directly on a style rule move under `loaders`.
fn prepare_styles(styles: &mut Map) {
    for (style_type, rules) in styles.iter_mut() {
        let Some(rules) = rules.as_array_mut() else {
            continue;
        };
        for rule in rules.iter_mut().filter_map(Value::as_object_mut) {
            for id in style_loader_ids(style_type) {
                let Some(options) = rule.shift_remove(id) else {
                    continue;
                };
                let loaders = rule
                    .entry("loaders".to_string())
                    .or_insert_with(Value::object);
                if let Some(loaders) = loaders.as_object_mut() {
                    let mut loader = Map::new();
                    loader.insert("options".to_string(), options);
                    loaders.insert(id.to_string(), Value::Object(loader));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::DeprecationLog;
    use crate::report::ConfigReport;
    use serde_json::json;

    fn run_with(value: Value, style_types: &[String]) -> (Value, ConfigReport) {
        let mut config = match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut report = ConfigReport::default();
        let log = DeprecationLog::new();
        let mut checker = Checker::new(&mut report, &log, style_types);
        BundlerValidator.validate(&mut checker, &mut config);
        (Value::Object(config), report)
    }

    fn run(value: serde_json::Value) -> (Value, ConfigReport) {
        run_with(Value::from(value), &["css".to_string()])
    }

    #[test]
    fn copy_array_becomes_patterns() {
        let (config, report) = run(json!({"copy": ["a", "b"]}));
        assert!(!report.has_errors());
        assert!(report.hints().is_empty());
        assert_eq!(config, Value::from(json!({"copy": {"patterns": ["a", "b"]}})));
    }

    #[test]
    fn copy_object_must_include_patterns_or_options() {
        let (_, report) = run(json!({"copy": {}}));
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "bundler.copy");
        assert!(report.errors()[0].message.contains("Must include"));
    }

    #[test]
    fn copy_object_with_only_patterns_gets_a_hint() {
        let (_, report) = run(json!({"copy": {"patterns": ["a"]}}));
        assert!(!report.has_errors());
        assert_eq!(report.hints()[0].path, "bundler.copy");
    }

    #[test]
    fn renamed_options_are_migrated() {
        let (config, report) = run(json!({"uglify": false, "extractText": {"allChunks": true}}));
        assert!(!report.has_errors());
        assert_eq!(report.deprecations().len(), 2);
        assert_eq!(
            config,
            Value::from(json!({"terser": false, "extractCSS": {"allChunks": true}}))
        );
    }

    #[test]
    fn renamed_options_are_checked_under_their_old_name() {
        let mut config = Map::new();
        config.insert("uglify".to_string(), Value::regex("x").unwrap());
        let (config, report) = run_with(Value::Object(config), &["css".to_string()]);

        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "bundler.uglify");
        assert_eq!(report.errors()[0].message, "Must be false or an Object");
        assert_eq!(report.deprecations()[0].path, "bundler.uglify");
        assert_eq!(config, Value::object());
    }

    #[test]
    fn legacy_postcss_array_moves_to_rule_options() {
        let (config, report) = run(json!({"postcss": ["autoprefixer"]}));
        assert!(!report.has_errors());
        assert_eq!(report.deprecations()[0].path, "bundler.postcss");
        assert_eq!(
            config,
            Value::from(json!({"rules": {"postcss": {"options": {"plugins": ["autoprefixer"]}}}}))
        );
    }

    #[test]
    fn sinon_compat_is_dropped() {
        let (config, report) = run(json!({"compat": {"sinon": true, "moment": ["de"]}}));
        assert!(!report.has_errors());
        assert_eq!(report.deprecations()[0].path, "bundler.compat.sinon");
        assert_eq!(
            config,
            Value::from(json!({"compat": {"moment": {"locales": ["de"]}}}))
        );
    }

    #[test]
    fn compat_locale_objects_need_locales() {
        let (_, report) = run(json!({"compat": {"intl": {}}}));
        assert_eq!(report.errors()[0].path, "bundler.compat.intl");
        assert!(report.errors()[0].message.starts_with("Must include locales"));
    }

    #[test]
    fn rule_options_shorthand_is_prepared() {
        let (config, report) = run(json!({
            "rules": {
                "css": {"modules": true},
                "svg": {"test": "\\.svg$", "loader": "svg-inline-loader", "noquotes": true},
                "js": {"loader": "babel-loader", "options": {"cacheDirectory": true}}
            }
        }));
        assert!(!report.has_errors());
        assert_eq!(
            config,
            Value::from(json!({
                "rules": {
                    "css": {"options": {"modules": true}},
                    "svg": {
                        "test": "\\.svg$",
                        "loader": "svg-inline-loader",
                        "options": {"noquotes": true}
                    },
                    "js": {"loader": "babel-loader", "options": {"cacheDirectory": true}}
                }
            }))
        );
    }

    #[test]
    fn malformed_rules_are_not_prepared() {
        let (config, report) = run(json!({
            "rules": {"css": {"modules": true}, "babel": {"use": "babel-loader"}}
        }));
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "bundler.rules.babel.use");
        assert_eq!(config.pointer("rules.css.modules"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unknown_style_types_are_rejected() {
        let (_, report) = run(json!({"styles": {"sass": [{"sass": {}}]}}));
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "bundler.styles");
        assert_eq!(report.errors()[0].message, "Unknown style type - must be 'css'");
    }

    #[test]
    fn style_loader_options_move_under_loaders() {
        let style_types = vec!["css".to_string(), "sass".to_string()];
        let (config, report) = run_with(
            Value::from(json!({
                "styles": {
                    "sass": [{"include": "src", "sass": {"precision": 5}, "css": {"modules": true}}]
                }
            })),
            &style_types,
        );
        assert!(!report.has_errors());
        assert_eq!(
            config,
            Value::from(json!({
                "styles": {
                    "sass": [{
                        "include": "src",
                        "loaders": {
                            "css": {"options": {"modules": true}},
                            "sass": {"options": {"precision": 5}}
                        }
                    }]
                }
            }))
        );
    }

    #[test]
    fn style_rules_reject_unknown_keys() {
        let (_, report) = run(json!({"styles": {"css": [{"modules": true}]}}));
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].path, "bundler.styles.css[0]");
    }
}
