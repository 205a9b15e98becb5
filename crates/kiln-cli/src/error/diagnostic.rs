//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use kiln_config::ConfigError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::InvalidConfig(count) => miette::miette!(
            help = "Fix the errors listed above and run kiln check-config again",
            "Config has {} error{}",
            count,
            if count == 1 { "" } else { "s" }
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a kiln-config error to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound(path) => miette::miette!(
            help = "Create kiln.config.toml or kiln.config.json, or pass --config <PATH>",
            "Couldn't find a config file at {}",
            path.display()
        ),
        ConfigError::Validation(report) => miette::miette!(
            help = "Run kiln check-config to see every finding",
            "Invalid configuration\n\n{}",
            report.render()
        ),
        _ => miette::miette!("{}", err),
    }
}
