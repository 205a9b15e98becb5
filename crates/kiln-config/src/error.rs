//! Error types for configuration loading, validation and plugin discovery.

use std::path::PathBuf;

use thiserror::Error;

use crate::report::ConfigReport;

/// Boxed error produced by a [`ConfigSource`](crate::ConfigSource) import.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required or explicitly named config file does not exist
    #[error("couldn't find a config file at {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be evaluated
    #[error("couldn't import the config file at {}: {message}", .path.display())]
    ImportFailed {
        path: PathBuf,
        message: String,
        #[source]
        source: BoxError,
    },

    /// One or more validators recorded errors; carries every finding
    #[error("invalid configuration\n\n{0}")]
    Validation(Box<ConfigReport>),

    /// Check-only mode finished; the report may hold no errors at all
    #[error("{0}")]
    Checked(Box<ConfigReport>),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

impl ConfigError {
    /// The validation report carried by this error, if any.
    pub fn report(&self) -> Option<&ConfigReport> {
        match self {
            ConfigError::Validation(report) | ConfigError::Checked(report) => Some(&**report),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("couldn't find plugin '{name}' - is it installed in {}?", .basedir.display())]
    NotFound { name: String, basedir: PathBuf },

    #[error("invalid plugin name '{name}' - expected kiln-<name> or @scope/kiln-<name>")]
    InvalidName { name: String },

    #[error("couldn't import plugin '{name}': {message}")]
    ImportFailed { name: String, message: String },
}
