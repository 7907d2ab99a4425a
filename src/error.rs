//! Error types for the Trivy hook.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code reported for every execution failure.
pub const EXECUTION_ERROR_EXIT: u8 = 2;

/// Installation help shown when the scanner binary is missing.
const INSTALL_HINT: &str = "Please install Trivy from: https://trivy.dev/
Installation methods:
  - macOS: brew install trivy
  - Linux (apt): sudo apt-get install trivy
  - Binary: https://github.com/aquasecurity/trivy/releases";

/// Hook error type.
///
/// Any of these aborts the hook with exit code 2. A scan that finds
/// vulnerabilities is not an error; see [`crate::scanner::ScanOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Trivy is not installed or not available in PATH (looked for `{binary}`)")]
    ScannerNotFound { binary: String },

    #[error("Failed to start {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trivy exited with unexpected status {code}")]
    ScannerFailed { code: i32 },

    #[error("Trivy was terminated by a signal")]
    Terminated,

    #[error("Settings file not found: {}", .0.display())]
    SettingsNotFound(PathBuf),

    #[error("Failed to parse settings file {}: {message}", .path.display())]
    SettingsParse { path: PathBuf, message: String },

    #[error("`{0}` is set by the hook; use its own option instead of passing it to Trivy")]
    ReservedFlag(String),

    #[error("Invalid setting: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        EXECUTION_ERROR_EXIT
    }

    /// Follow-up text for the user, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::ScannerNotFound { .. } => Some(INSTALL_HINT),
            _ => None,
        }
    }
}
