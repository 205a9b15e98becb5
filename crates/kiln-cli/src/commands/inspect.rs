//! Inspect command implementation.
//!
//! Prints the normalized config a command would run with.

use crate::cli::InspectArgs;
use crate::commands::utils::Session;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use kiln_config::Section;

/// Execute the inspect command.
///
/// Loads the config for the target command, with overrides and plugins
/// applied, and writes it to stdout as pretty-printed JSON. Advisory
/// findings are logged as warnings; validation errors fail the command.
///
/// # Errors
///
/// Returns errors for an invalid config or an unknown `--section` name.
pub fn execute(args: InspectArgs) -> Result<()> {
    let section = args.section.as_deref().map(parse_section).transpose()?;

    let session = Session::new(Some(args.target.as_str()), &args.config)?;
    let config = session
        .engine
        .load(&session.args, &session.load_options()?)?;
    if config.path().is_none() {
        ui::warning("No kiln config file found, using defaults");
    }

    let json = match section {
        Some(section) => serde_json::to_string_pretty(config.section(section)),
        None => serde_json::to_string_pretty(&config),
    }
    .context("Failed to print the config")?;
    println!("{json}");
    Ok(())
}

fn parse_section(name: &str) -> Result<Section> {
    Section::from_key(name).ok_or_else(|| {
        let known: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
        CliError::InvalidArgument(format!(
            "Unknown config section '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        assert_eq!(parse_section("devServer").unwrap(), Section::DevServer);
        assert_eq!(parse_section("testRunner").unwrap(), Section::TestRunner);

        let err = parse_section("webpack").unwrap_err().to_string();
        assert!(err.contains("webpack"));
        assert!(err.contains("packagePublish"));
    }
}
