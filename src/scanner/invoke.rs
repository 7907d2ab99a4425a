//! Trivy process invocation and exit status mapping.

use std::path::PathBuf;
use std::process::{Command, ExitCode, Stdio};

use tracing::{debug, warn};

use super::locate;
use super::request::ScanRequest;
use crate::error::Error;

/// Result of a scan that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Nothing at or above the severity threshold.
    Clean,
    /// Trivy reported findings and exited with the configured code.
    FindingsDetected { code: i32 },
}

impl ScanOutcome {
    /// Map a raw Trivy exit status to an outcome.
    ///
    /// `None` means the process ended without an exit code (killed by a signal).
    pub fn from_status(code: Option<i32>, findings_code: i32) -> Result<Self, Error> {
        match code {
            Some(0) => Ok(ScanOutcome::Clean),
            Some(code) if code == findings_code => Ok(ScanOutcome::FindingsDetected { code }),
            Some(code) => Err(Error::ScannerFailed { code }),
            None => Err(Error::Terminated),
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            ScanOutcome::Clean => ExitCode::SUCCESS,
            ScanOutcome::FindingsDetected { code } => {
                ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
            }
        }
    }
}

/// A resolved Trivy executable.
#[derive(Debug, Clone)]
pub struct Scanner {
    binary: PathBuf,
}

impl Scanner {
    /// Look up `binary` on `PATH`.
    pub fn locate(binary: &str) -> Result<Self, Error> {
        let path = locate::locate(binary).ok_or_else(|| Error::ScannerNotFound {
            binary: binary.to_string(),
        })?;
        debug!(binary = %path.display(), "Resolved scanner binary");
        Ok(Self { binary: path })
    }

    /// Use an already-resolved executable path.
    pub fn from_path(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run a scan, streaming Trivy's output straight to the terminal.
    ///
    /// Blocks until Trivy exits. Any timeout is Trivy's own.
    pub fn run(&self, request: &ScanRequest) -> Result<ScanOutcome, Error> {
        let args = request.to_args();
        debug!(binary = %self.binary.display(), ?args, "Running scanner");

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let outcome = ScanOutcome::from_status(status.code(), request.exit_code);
        match &outcome {
            Ok(outcome) => debug!(?outcome, "Scanner finished"),
            Err(e) => warn!(error = %e, "Scanner did not complete"),
        }
        outcome
    }
}
