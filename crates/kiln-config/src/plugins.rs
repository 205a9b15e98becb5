//! Plugin discovery and config fragment merging.
//!
//! Plugins are npm packages named `kiln-*` that ship a config fragment in the
//! `kiln` field of their `package.json`. They are found through the user's
//! project dependencies and the `--plugins` argument, and always resolved
//! from the project's own `node_modules`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::args::Args;
use crate::error::PluginError;
use crate::value::Value;

pub const PLUGIN_PREFIX: &str = "kiln-";

/// The built-in style type.
pub const BUILTIN_STYLE_TYPE: &str = "css";

/// A CSS preprocessor contributed by a plugin, keyed by its style type id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPreprocessor {
    /// Regular expression matched against file paths
    pub test: String,
    /// Loader module that compiles the style type
    pub loader: String,
    /// Key under which the user can pass default loader config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_config: Option<String>,
}

impl CssPreprocessor {
    pub fn test_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.test)
    }
}

/// Merged configuration contributed by every discovered plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    pub css_preprocessors: IndexMap<String, CssPreprocessor>,
}

impl PluginConfig {
    pub fn is_empty(&self) -> bool {
        self.css_preprocessors.is_empty()
    }

    /// Style types `bundler.styles` accepts: `css` plus every preprocessor.
    pub fn style_types(&self) -> Vec<String> {
        std::iter::once(BUILTIN_STYLE_TYPE.to_string())
            .chain(
                self.css_preprocessors
                    .keys()
                    .filter(|id| id.as_str() != BUILTIN_STYLE_TYPE)
                    .cloned(),
            )
            .collect()
    }

    /// Register a preprocessor directly, for embedding and tests.
    pub fn with_style_type(mut self, id: impl Into<String>, preprocessor: CssPreprocessor) -> Self {
        self.css_preprocessors.insert(id.into(), preprocessor);
        self
    }
}

/// Normalize a plugin name to the `kiln-` convention.
///
/// For scoped packages the prefix goes on the package part:
/// `@acme/sass` becomes `@acme/kiln-sass`.
pub fn plugin_name(name: &str) -> String {
    let name = name.trim();
    let (scope, package) = match name.split_once('/') {
        Some((scope, package)) if scope.starts_with('@') => (Some(scope), package),
        _ => (None, name),
    };
    let package = if package.starts_with(PLUGIN_PREFIX) {
        package.to_string()
    } else {
        format!("{PLUGIN_PREFIX}{package}")
    };
    match scope {
        Some(scope) => format!("{scope}/{package}"),
        None => package,
    }
}

/// Whether `name` is a package name that stays inside `node_modules`:
/// `kiln-x` or `@scope/kiln-x`, with no path traversal.
fn is_package_name(name: &str) -> bool {
    let segment_ok = |segment: &str| {
        !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
    };
    match name.split_once('/') {
        None => segment_ok(name),
        Some((scope, package)) => {
            scope.len() > 1
                && scope.starts_with('@')
                && segment_ok(scope)
                && segment_ok(package)
                && !package.contains('/')
        }
    }
}

fn is_plugin_package(name: &str) -> bool {
    let package = match name.split_once('/') {
        Some((scope, package)) if scope.starts_with('@') => package,
        _ => name,
    };
    package.starts_with(PLUGIN_PREFIX)
}

/// Plugin names requested on the command line.
///
/// `plugins` is the documented flag; `plugin` is accepted as well.
fn requested_plugins(args: &Args) -> Vec<String> {
    let Some(value) = args.flag("plugins").or_else(|| args.flag("plugin")) else {
        return Vec::new();
    };
    let raw: Vec<&str> = match value {
        Value::String(list) => list.split(',').collect(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(plugin_name)
        .collect()
}

/// Plugin packages declared as dependencies of the project in `cwd`.
///
/// A missing or unreadable manifest means there are no plugins.
fn dependency_plugins(cwd: &Path) -> Vec<String> {
    let manifest = cwd.join("package.json");
    let pkg: serde_json::Value = match fs::read_to_string(&manifest)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(pkg) => pkg,
        Err(e) => {
            debug!("No plugins from {}: {}", manifest.display(), e);
            return Vec::new();
        }
    };

    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|field| pkg.get(field).and_then(serde_json::Value::as_object))
        .flat_map(|deps| deps.keys())
        .filter(|name| is_plugin_package(name))
        .cloned()
        .collect()
}

/// Read the `kiln` fragment of an installed plugin.
fn load_fragment(name: &str, cwd: &Path) -> Result<serde_json::Value, PluginError> {
    if !is_package_name(name) {
        return Err(PluginError::InvalidName {
            name: name.to_string(),
        });
    }
    let manifest = cwd.join("node_modules").join(name).join("package.json");
    if !manifest.is_file() {
        return Err(PluginError::NotFound {
            name: name.to_string(),
            basedir: cwd.to_path_buf(),
        });
    }

    let import_failed = |message: String| PluginError::ImportFailed {
        name: name.to_string(),
        message,
    };
    let content = fs::read_to_string(&manifest).map_err(|e| import_failed(e.to_string()))?;
    let mut pkg: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| import_failed(e.to_string()))?;

    let fragment = pkg
        .get_mut("kiln")
        .map(serde_json::Value::take)
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
    if !fragment.is_object() {
        return Err(import_failed(format!(
            "the \"kiln\" field in {} must be an object",
            manifest.display()
        )));
    }

    // A fragment may only patch a preprocessor, so just the tests it sets
    // are checked here.
    let preprocessors = fragment
        .get("cssPreprocessors")
        .and_then(serde_json::Value::as_object);
    for (id, preprocessor) in preprocessors.into_iter().flatten() {
        let Some(test) = preprocessor.get("test") else {
            continue;
        };
        let pattern = test.as_str().ok_or_else(|| {
            import_failed(format!("the test for style type '{id}' must be a string"))
        })?;
        Regex::new(pattern)
            .map_err(|e| import_failed(format!("invalid test for style type '{id}': {e}")))?;
    }

    Ok(fragment)
}

/// Merge a plugin fragment over the fragments before it.
///
/// Objects merge recursively, arrays concatenate and anything else in the
/// later fragment wins.
pub fn merge_fragments(base: &mut serde_json::Value, fragment: serde_json::Value) {
    use serde_json::Value as Json;

    match (base, fragment) {
        (Json::Object(base), Json::Object(fragment)) => {
            for (key, value) in fragment {
                match base.get_mut(&key) {
                    Some(existing) => merge_fragments(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Json::Array(base), Json::Array(fragment)) => base.extend(fragment),
        (base, fragment) => *base = fragment,
    }
}

/// Discover plugins for the project in `cwd` and merge their config.
pub fn collect(args: &Args, cwd: &Path) -> Result<PluginConfig, PluginError> {
    let mut names = dependency_plugins(cwd);
    names.extend(requested_plugins(args));

    let mut seen = std::collections::HashSet::new();
    names.retain(|name| seen.insert(name.clone()));

    if names.is_empty() {
        return Ok(PluginConfig::default());
    }
    debug!("Loading plugins: {}", names.join(", "));

    let mut merged = serde_json::Value::Object(serde_json::Map::new());
    for name in &names {
        let fragment = load_fragment(name, cwd)?;
        merge_fragments(&mut merged, fragment);
    }

    serde_json::from_value(merged).map_err(|e| PluginError::ImportFailed {
        name: names.join(", "),
        message: e.to_string(),
    })
}
