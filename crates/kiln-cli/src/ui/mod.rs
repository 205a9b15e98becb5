//! Terminal output: status messages and config reports.
//!
//! Colour is decided once by [`init_colors`] and respected by every printer
//! in this module.

mod messages;
mod report;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success, warning};
pub use report::{print_report, style_report};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    !is_ci() && console::user_attended_stderr()
}

/// Initialize color support. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        clear_env();
        unsafe { std::env::set_var("NO_COLOR", "1") };
        assert!(!should_use_color());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        clear_env();
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        assert!(should_use_color());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        clear_env();
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_no_color_flag_disables_colors() {
        clear_env();
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        init_colors(true);
        assert!(!colors_enabled());
        init_colors(false);
        assert!(colors_enabled());
        init_colors(true);
        clear_env();
    }
}
