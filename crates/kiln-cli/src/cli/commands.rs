use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::validation::parse_assignment;

/// Available kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the user config and print the report
    ///
    /// Reports every error, deprecation and hint at once. Exits with a
    /// non-zero status when the config has errors.
    CheckConfig(CheckConfigArgs),

    /// Print the normalized config as JSON
    ///
    /// Shows the config exactly as a command would see it: shorthand forms
    /// expanded, deprecated options migrated and overrides merged in.
    Inspect(InspectArgs),

    /// Remove build output directories
    ///
    /// Which directories are removed depends on the project type declared
    /// in the config.
    Clean(CleanArgs),
}

/// Config loading options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the config file
    ///
    /// Resolved against the working directory. Defaults to the first of
    /// kiln.config.toml and kiln.config.json that exists.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Plugins to load in addition to kiln-* dependencies
    ///
    /// Comma-separated names, with or without the kiln- prefix.
    ///
    /// Examples:
    ///   kiln inspect build --plugins sass
    ///   kiln inspect build --plugins sass,kiln-less
    #[arg(long, value_name = "LIST")]
    pub plugins: Option<String>,

    /// Override a config value
    ///
    /// The path starts with a section name and dotted segments create nested
    /// objects. Values parse as booleans, numbers and JSON arrays or objects,
    /// anything else is a string. Overrides replace arrays rather than
    /// merging them.
    ///
    /// Examples:
    ///   kiln inspect serve --set devServer.port=3001
    ///   kiln inspect build --set 'bundler.copy.patterns=["static"]'
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, String)>,

    /// Working directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the check-config command
#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Command to check the config for
    ///
    /// Config factories receive this as the command name, so a factory can
    /// return different config for build and serve.
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// The command a config is inspected for
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Build,
    Serve,
    Test,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Build => "build",
            Target::Serve => "serve",
            Target::Test => "test",
        }
    }
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Command to inspect the config for
    #[arg(value_enum, default_value = "build")]
    pub target: Target,

    /// Only print one section (transpiler, testRunner, packagePublish,
    /// bundler or devServer)
    #[arg(short, long, value_name = "NAME")]
    pub section: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// List the directories that would be removed without removing them
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}
