//! The normalized configuration handed to commands.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;

use crate::project::ProjectType;
use crate::report::ConfigReport;
use crate::value::{Map, Value};

/// A recognised top-level section of the user config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Babel options
    Transpiler,
    /// Karma options
    TestRunner,
    /// npm build options
    PackagePublish,
    /// Webpack options
    Bundler,
    /// Development server options
    DevServer,
}

impl Section {
    /// All sections, in validation order.
    pub const ALL: [Section; 5] = [
        Section::Transpiler,
        Section::TestRunner,
        Section::PackagePublish,
        Section::Bundler,
        Section::DevServer,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Transpiler => "transpiler",
            Section::TestRunner => "testRunner",
            Section::PackagePublish => "packagePublish",
            Section::Bundler => "bundler",
            Section::DevServer => "devServer",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| section.key() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated user config.
///
/// Every [`Section`] is present and is an object, whether or not the user
/// configured it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig {
    tree: Map,
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(skip)]
    report: ConfigReport,
}

fn empty_map() -> &'static Map {
    static EMPTY: OnceLock<Map> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

impl NormalizedConfig {
    pub(crate) fn new(tree: Map, path: Option<PathBuf>, report: ConfigReport) -> Self {
        Self { tree, path, report }
    }

    /// The declared project type, if the config has a valid one.
    pub fn project_type(&self) -> Option<ProjectType> {
        self.tree
            .get("type")
            .and_then(Value::as_str)
            .and_then(|ty| ty.parse().ok())
    }

    pub fn section(&self, section: Section) -> &Map {
        self.tree
            .get(section.key())
            .and_then(Value::as_object)
            .unwrap_or_else(|| empty_map())
    }

    pub fn transpiler(&self) -> &Map {
        self.section(Section::Transpiler)
    }

    pub fn test_runner(&self) -> &Map {
        self.section(Section::TestRunner)
    }

    pub fn package_publish(&self) -> &Map {
        self.section(Section::PackagePublish)
    }

    pub fn bundler(&self) -> &Map {
        self.section(Section::Bundler)
    }

    pub fn dev_server(&self) -> &Map {
        self.section(Section::DevServer)
    }

    /// A top-level key, such as `type` or `browsers`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }

    /// Hand a generated tool config to the section's `config` function, if
    /// the user set one, and return what it gives back.
    pub fn customize(&self, section: Section, generated: Value) -> Value {
        match self.section(section).get("config") {
            Some(Value::Function(f)) => f.call(generated),
            _ => generated,
        }
    }

    pub fn as_map(&self) -> &Map {
        &self.tree
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.tree)
    }

    /// The config file this was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Advisory findings (deprecations and hints) from normalization.
    pub fn report(&self) -> &ConfigReport {
        &self.report
    }
}
