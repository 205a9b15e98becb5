//! Command-line interface definition for kiln.
//!
//! # Command Structure
//!
//! - `kiln check-config` - Validate the user config and print the report
//! - `kiln inspect` - Print the normalized config for a command
//! - `kiln clean` - Remove build output for the project type

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{CheckConfigArgs, CleanArgs, Command, ConfigArgs, InspectArgs, Target};
pub use validation::parse_assignment;

/// kiln - convention-based builds for JavaScript projects
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Convention-based builds for JavaScript projects",
    long_about = "kiln reads an optional kiln.config.toml or kiln.config.json, checks it\n\
                  against the options each part of the build understands and fills in\n\
                  the shorthand forms, so every command works from the same config."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows which config file was loaded, which overrides were applied and
    /// which plugins were discovered.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
