//! Command implementations for the kiln CLI.
//!
//! - [`check_config`] - Validate the user config
//! - [`inspect`] - Print the normalized config
//! - [`clean`] - Remove build output
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and returns a Result.

pub mod check_config;
pub mod clean;
pub mod inspect;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check_config::execute as check_config_execute;
pub use clean::execute as clean_execute;
pub use inspect::execute as inspect_execute;
