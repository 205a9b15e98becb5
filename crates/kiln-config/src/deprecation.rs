//! Once-per-process deprecation bookkeeping.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Remembers which deprecations have already been reported.
///
/// A long-running session normalizes its config on every rebuild; a notice is
/// only added to the report the first time its key is seen. Migrations still
/// run every time.
#[derive(Debug, Default)]
pub struct DeprecationLog {
    warned: Mutex<HashSet<&'static str>>,
}

impl DeprecationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `key` is seen, `false` afterwards.
    pub fn first_warning(&self, key: &'static str) -> bool {
        self.warned.lock().insert(key)
    }

    /// Forget every recorded warning.
    pub fn reset(&self) {
        self.warned.lock().clear();
    }
}
