//! kiln CLI entry point.
//!
//! Parses arguments, sets up logging and colours, then dispatches to the
//! selected command.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::CheckConfig(check_args) => commands::check_config_execute(check_args),
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args),
        cli::Command::Clean(clean_args) => commands::clean_execute(clean_args),
    };

    // Convert CLI errors to miette diagnostics
    result.map_err(error::cli_error_to_miette)
}
