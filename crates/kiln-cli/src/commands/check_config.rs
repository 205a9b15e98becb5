//! Check-config command implementation.
//!
//! Validates the user config without running anything and prints the full
//! report.

use crate::cli::CheckConfigArgs;
use crate::commands::utils::Session;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check-config command.
///
/// A config file is required and must declare a valid `type`. Every error,
/// deprecation and hint is printed, grouped by kind.
///
/// # Errors
///
/// Returns `CliError::InvalidConfig` when the report holds errors, after it
/// has been printed. Missing or unimportable config files fail before any
/// report exists.
pub fn execute(args: CheckConfigArgs) -> Result<()> {
    let session = Session::new(args.command.as_deref(), &args.config)?;
    let options = session.load_options()?.required(true);

    let report = session.engine.check(&session.args, &options)?;
    ui::print_report(&report);

    if report.has_errors() {
        return Err(CliError::InvalidConfig(report.errors().len()));
    }
    Ok(())
}
