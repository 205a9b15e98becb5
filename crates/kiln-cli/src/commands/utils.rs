//! Shared utilities for command implementations.

use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use kiln_config::{Args, ConfigEngine, LoadOptions, collect_plugins, parse_value};
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The project directory: `--cwd` resolved against the process working
/// directory, or the process working directory itself.
pub fn resolve_cwd(args: &ConfigArgs) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let cwd = match &args.cwd {
        Some(cwd) => resolve_path(cwd, &current),
        None => current,
    };
    if !cwd.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Working directory does not exist: {}",
            cwd.display()
        )));
    }
    Ok(cwd)
}

/// Build the engine's argument tree from parsed CLI options.
///
/// `command` becomes the command name, `--config` and
/// `--plugins` become flags and each `--set` lands at its dotted path.
pub fn config_args(command: Option<&str>, args: &ConfigArgs) -> Args {
    let mut parsed = match command {
        Some(command) => Args::with_command(command),
        None => Args::new(),
    };
    if let Some(config) = &args.config {
        parsed.set_flag("config", config.to_string_lossy().into_owned());
    }
    if let Some(plugins) = &args.plugins {
        parsed.set_flag("plugins", plugins.as_str());
    }
    for (path, value) in &args.overrides {
        tracing::debug!("Override {} = {}", path, value);
        parsed.set_path(path, parse_value(value));
    }
    parsed
}

/// Engine and argument tree for one command.
pub struct Session {
    pub engine: ConfigEngine,
    pub args: Args,
}

impl Session {
    pub fn new(command: Option<&str>, config: &ConfigArgs) -> Result<Self> {
        let cwd = resolve_cwd(config)?;
        let args = config_args(command, config);
        Ok(Self {
            engine: ConfigEngine::new(cwd),
            args,
        })
    }

    /// Load options with the project's plugins discovered.
    ///
    /// Only commands that validate the whole config need plugins, so
    /// discovery happens here rather than in [`Session::new`].
    pub fn load_options(&self) -> Result<LoadOptions> {
        let plugins = collect_plugins(&self.args, self.engine.cwd())?;
        if !plugins.is_empty() {
            tracing::debug!("Plugin style types: {}", plugins.style_types().join(", "));
        }
        Ok(LoadOptions::new().plugins(plugins))
    }
}
