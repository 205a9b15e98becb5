//! Where user configuration comes from.
//!
//! A config is either a static tree or a factory that builds the tree from
//! the invocation context. Sources are re-read on every load so that a
//! factory always sees the current environment.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Format, Json, Toml};

use crate::args::Args;
use crate::error::BoxError;
use crate::value::Value;

/// The bundler package the tool manages on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlerDependency {
    pub name: String,
    pub version: String,
}

impl Default for BundlerDependency {
    fn default() -> Self {
        Self {
            name: "webpack".to_string(),
            version: "5".to_string(),
        }
    }
}

/// What a config factory is called with.
#[derive(Debug, Clone, Copy)]
pub struct ConfigContext<'a> {
    pub args: &'a Args,
    pub command: Option<&'a str>,
    pub bundler: &'a BundlerDependency,
}

pub type ConfigFactory = Arc<dyn Fn(&ConfigContext<'_>) -> Value + Send + Sync>;

/// A user config as imported, before it is resolved to a tree.
#[derive(Clone)]
pub enum UserConfig {
    Static(Value),
    Factory(ConfigFactory),
}

impl UserConfig {
    pub fn factory(f: impl Fn(&ConfigContext<'_>) -> Value + Send + Sync + 'static) -> Self {
        UserConfig::Factory(Arc::new(f))
    }

    /// Produce the config tree, invoking a factory exactly once.
    pub fn resolve(self, context: &ConfigContext<'_>) -> Value {
        match self {
            UserConfig::Static(value) => value,
            UserConfig::Factory(factory) => factory(context),
        }
    }
}

impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserConfig::Static(value) => f.debug_tuple("Static").field(value).finish(),
            UserConfig::Factory(_) => f.write_str("Factory([Function])"),
        }
    }
}

impl From<Value> for UserConfig {
    fn from(value: Value) -> Self {
        UserConfig::Static(value)
    }
}

impl From<serde_json::Value> for UserConfig {
    fn from(value: serde_json::Value) -> Self {
        UserConfig::Static(Value::from(value))
    }
}

/// Loads user configs by path.
pub trait ConfigSource {
    fn exists(&self, path: &Path) -> bool;

    /// Evaluate the config at `path`. Called again on every load.
    fn import(&self, path: &Path) -> Result<UserConfig, BoxError>;
}

/// Reads `.toml` and `.json` config files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl ConfigSource for FileSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn import(&self, path: &Path) -> Result<UserConfig, BoxError> {
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Figment::from(Toml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            _ => {
                return Err(format!(
                    "unsupported config file format: {} (expected .toml or .json)",
                    path.display()
                )
                .into());
            }
        };

        let tree: serde_json::Value = figment.extract().map_err(|e| e.to_string())?;
        Ok(UserConfig::from(tree))
    }
}

/// In-memory configs keyed by path, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    configs: HashMap<PathBuf, UserConfig>,
    failures: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, config: impl Into<UserConfig>) {
        self.configs.insert(path.into(), config.into());
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, config: impl Into<UserConfig>) -> Self {
        self.insert(path, config);
        self
    }

    /// Register a path whose import fails with `message`.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }
}

impl ConfigSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.configs.contains_key(path) || self.failures.contains_key(path)
    }

    fn import(&self, path: &Path) -> Result<UserConfig, BoxError> {
        if let Some(message) = self.failures.get(path) {
            return Err(message.clone().into());
        }
        self.configs
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no config registered at {}", path.display()).into())
    }
}
