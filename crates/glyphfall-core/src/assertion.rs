//! Soft assertions for programming-error checks.

use serde::{Deserialize, Serialize};

/// How a failed [`check`] is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertMode {
    /// Log the failure and carry on.
    #[default]
    Log,
    /// Panic on failure. Used when debugging is enabled.
    Fatal,
}

impl AssertMode {
    /// Pick the mode matching the `debug` flag of the configuration.
    pub fn from_debug(debug: bool) -> Self {
        if debug { AssertMode::Fatal } else { AssertMode::Log }
    }
}

/// Check a condition, returning whether it held.
///
/// In [`AssertMode::Fatal`] a failed condition panics with `message`.
/// In [`AssertMode::Log`] it is logged as a warning and `false` is returned
/// so the caller can fall back to a sane value.
pub fn check(mode: AssertMode, condition: bool, message: &str) -> bool {
    if condition {
        return true;
    }

    match mode {
        AssertMode::Fatal => panic!("assertion failed: {message}"),
        AssertMode::Log => {
            tracing::warn!("assertion failed: {message}");
            false
        }
    }
}
