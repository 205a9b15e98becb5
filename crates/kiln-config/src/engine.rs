//! Loading, overriding and validating user configuration.

use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::config::{NormalizedConfig, Section};
use crate::deprecation::DeprecationLog;
use crate::error::{ConfigError, Result};
use crate::merge::merge_maps;
use crate::plugins::PluginConfig;
use crate::project::ProjectType;
use crate::report::ConfigReport;
use crate::source::{BundlerDependency, ConfigContext, ConfigSource, FileSource};
use crate::validate::{self, Checker, top_level};
use crate::value::{Map, Value};

/// Default config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["kiln.config.toml", "kiln.config.json"];

/// How [`ConfigEngine::load`] treats a config.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// A config file must exist and declare a valid `type`
    pub required: bool,
    /// Return the report instead of the config (see [`ConfigEngine::check`])
    pub check: bool,
    /// Plugin contributions, which extend the accepted style types
    pub plugins: PluginConfig,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn plugins(mut self, plugins: PluginConfig) -> Self {
        self.plugins = plugins;
        self
    }
}

/// Loads and normalizes user config for one project directory.
///
/// The engine keeps the deprecation log for its whole lifetime, so a
/// long-running session reports each deprecation once. Nothing else is
/// cached: every call imports the config source again.
#[derive(Debug)]
pub struct ConfigEngine<S = FileSource> {
    cwd: PathBuf,
    source: S,
    bundler: BundlerDependency,
    deprecations: DeprecationLog,
}

impl ConfigEngine<FileSource> {
    /// An engine reading config files from `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self::with_source(cwd, FileSource)
    }
}

impl<S: ConfigSource> ConfigEngine<S> {
    pub fn with_source(cwd: impl Into<PathBuf>, source: S) -> Self {
        Self {
            cwd: cwd.into(),
            source,
            bundler: BundlerDependency::default(),
            deprecations: DeprecationLog::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn deprecations(&self) -> &DeprecationLog {
        &self.deprecations
    }

    /// The config path to use and whether the user named it explicitly.
    ///
    /// An explicit `config` argument is resolved against the working
    /// directory. Otherwise the first existing default file is used, falling
    /// back to the first default name.
    pub fn config_path(&self, args: &Args) -> (PathBuf, bool) {
        if let Some(explicit) = args.flag_str("config") {
            return (self.cwd.join(explicit), true);
        }
        let path = CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.cwd.join(name))
            .find(|path| self.source.exists(path))
            .unwrap_or_else(|| self.cwd.join(CONFIG_FILE_NAMES[0]));
        (path, false)
    }

    /// Import the config at `path` and resolve a factory to its tree.
    ///
    /// Both load paths go through here so a factory sees the same context
    /// either way.
    fn resolve(&self, args: &Args, path: &Path) -> Result<Value> {
        tracing::debug!("Loading config from {}", path.display());
        let config = self
            .source
            .import(path)
            .map_err(|source| ConfigError::ImportFailed {
                path: path.to_path_buf(),
                message: source.to_string(),
                source,
            })?;
        let context = ConfigContext {
            args,
            command: args.command(),
            bundler: &self.bundler,
        };
        Ok(config.resolve(&context))
    }

    /// Read just the project type.
    ///
    /// A config file is mandatory here, and a missing or unknown `type` is
    /// a validation error.
    pub fn project_type(&self, args: &Args) -> Result<ProjectType> {
        let (path, _) = self.config_path(args);
        if !self.source.exists(&path) {
            return Err(ConfigError::NotFound(path));
        }
        let tree = self.resolve(args, &path)?;
        let config = tree.as_object().cloned().unwrap_or_default();

        let mut report = ConfigReport::new(Some(path));
        let project_type = {
            let no_style_types: [String; 0] = [];
            let mut checker = Checker::new(&mut report, &self.deprecations, &no_style_types);
            top_level::check_type(&mut checker, &config, true)
        };
        project_type.ok_or_else(|| ConfigError::Validation(Box::new(report)))
    }

    /// Load, override, validate and normalize the user config.
    ///
    /// Validation errors fail with [`ConfigError::Validation`] carrying every
    /// finding. In check mode a config without errors fails with
    /// [`ConfigError::Checked`] so the caller can render the report; outside
    /// check mode advisory findings are logged and the config is returned.
    pub fn load(&self, args: &Args, options: &LoadOptions) -> Result<NormalizedConfig> {
        let (path, explicit) = self.config_path(args);
        let exists = self.source.exists(&path);
        if !exists && (options.required || explicit) {
            return Err(ConfigError::NotFound(path));
        }

        let config_path = exists.then_some(path);
        let mut report = ConfigReport::new(config_path.clone());

        let user_config = match &config_path {
            Some(path) => self.resolve(args, path)?,
            None => Value::object(),
        };
        let mut tree = match user_config {
            Value::Object(map) => map,
            other => {
                report.error(
                    "config",
                    other,
                    "Must be an Object (or a factory returning one)",
                );
                Map::new()
            }
        };

        let style_types = options.plugins.style_types();
        {
            let mut checker = Checker::new(&mut report, &self.deprecations, &style_types);

            top_level::check_type(&mut checker, &tree, options.required);
            ensure_sections(&mut checker, &mut tree);

            let overrides = argument_overrides(args);
            if !overrides.is_empty() {
                tracing::debug!(
                    "Applying argument overrides to {}",
                    overrides.keys().cloned().collect::<Vec<_>>().join(", ")
                );
                merge_maps(&mut tree, overrides);
                checker.report().set_argument_overrides();
            }

            validate::check_sections(&mut checker, &mut tree);
            top_level::check(&mut checker, &mut tree);
        }

        if report.has_errors() {
            return Err(ConfigError::Validation(Box::new(report)));
        }
        if options.check {
            return Err(ConfigError::Checked(Box::new(report)));
        }
        if report.has_something_to_report() {
            tracing::warn!("{}", report.render());
        }

        Ok(NormalizedConfig::new(tree, config_path, report))
    }

    /// Validate the user config and return the report, errors included.
    pub fn check(&self, args: &Args, options: &LoadOptions) -> Result<ConfigReport> {
        let options = LoadOptions {
            check: true,
            ..options.clone()
        };
        match self.load(args, &options) {
            Err(ConfigError::Checked(report) | ConfigError::Validation(report)) => Ok(*report),
            Err(e) => Err(e),
            Ok(config) => Ok(config.report().clone()),
        }
    }
}

/// Give every section a value, replacing a non-object with `{}`.
fn ensure_sections(checker: &mut Checker<'_>, tree: &mut Map) {
    for section in Section::ALL {
        match tree.get(section.key()) {
            None => {
                tree.insert(section.key().to_string(), Value::object());
            }
            Some(Value::Object(_)) => {}
            Some(other) => {
                checker.error(
                    section.key(),
                    other.clone(),
                    "Must be an Object if provided - defaulting to {}",
                );
                tree.insert(section.key().to_string(), Value::object());
            }
        }
    }
}

/// Section-named arguments holding objects.
fn argument_overrides(args: &Args) -> Map {
    Section::ALL
        .iter()
        .filter_map(|section| match args.flag(section.key()) {
            Some(value @ Value::Object(_)) => Some((section.key().to_string(), value.clone())),
            _ => None,
        })
        .collect()
}
