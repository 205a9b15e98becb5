//! kiln CLI - validate, inspect and clean convention-based JavaScript
//! projects.
//!
//! The heavy lifting lives in `kiln-config`; this crate wires it to the
//! command line.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - one module per subcommand, each exposing `execute`
//! - [`error`] - `CliError` and its conversion to miette reports
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - coloured status messages and report output
//!
//! # Example
//!
//! ```rust
//! use kiln_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
