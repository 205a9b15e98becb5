//! User configuration engine for kiln.
//!
//! Loads a user's `kiln.config.toml` / `kiln.config.json` (or an in-memory
//! config, possibly a factory), applies command-line overrides, validates
//! each section and normalizes shorthand forms. Every problem found ends up
//! in a [`ConfigReport`].
//!
//! ```
//! use kiln_config::{Args, ConfigEngine, LoadOptions, MemorySource};
//! use serde_json::json;
//!
//! let source = MemorySource::new().with(
//!     "/app/kiln.config.json",
//!     json!({"type": "web-module", "packagePublish": {"umd": "MyLib"}}),
//! );
//! let engine = ConfigEngine::with_source("/app", source);
//!
//! let config = engine.load(&Args::new(), &LoadOptions::new()).unwrap();
//! assert_eq!(
//!     config.package_publish()["umd"].get("global").and_then(|v| v.as_str()),
//!     Some("MyLib")
//! );
//! ```

pub mod args;
pub mod config;
pub mod deprecation;
pub mod engine;
pub mod error;
pub mod merge;
pub mod plugins;
pub mod project;
pub mod report;
pub mod source;
pub mod validate;
pub mod value;

// Re-export main types
pub use args::{Args, parse_value};
pub use config::{NormalizedConfig, Section};
pub use deprecation::DeprecationLog;
pub use engine::{CONFIG_FILE_NAMES, ConfigEngine, LoadOptions};
pub use error::{BoxError, ConfigError, PluginError, Result};
pub use merge::merge_replacing_arrays;
pub use plugins::{CssPreprocessor, PluginConfig, collect as collect_plugins};
pub use project::ProjectType;
pub use report::{ConfigReport, ReportError, ReportNotice};
pub use source::{
    BundlerDependency, ConfigContext, ConfigFactory, ConfigSource, FileSource, MemorySource,
    UserConfig,
};
pub use validate::SectionValidator;
pub use value::{ConfigFn, Kind, Map, Value};
