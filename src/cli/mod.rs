//! Command-line interface for the Trivy hook.

pub mod scan;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::scanner::request::{default_scanners, default_severities, DEFAULT_EXIT_CODE};
use crate::scanner::{OutputFormat, ScanRequest, ScannerKind, Severity, DEFAULT_BINARY};

/// Run Trivy security scanner as a pre-commit hook
///
/// Exits 0 when nothing is found, with the configured exit code (default 1)
/// when vulnerabilities are found, and 2 when the scan could not run.
#[derive(Parser, Debug, Default)]
#[command(name = "trivy-scan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated list of severities to check (default: HIGH,CRITICAL)
    #[arg(long, value_delimiter = ',', ignore_case = true)]
    pub severity: Option<Vec<Severity>>,

    /// Output format (default: table)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit code when vulnerabilities are found (default: 1)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=255))]
    pub exit_code: Option<i32>,

    /// Path to custom trivy.yaml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip Trivy database update (faster for repeated scans)
    #[arg(long)]
    pub skip_db_update: bool,

    /// Comma-separated list of scanners to use (default: vuln)
    #[arg(long, value_delimiter = ',', ignore_case = true)]
    pub scanners: Option<Vec<ScannerKind>>,

    /// Timeout for the scan (e.g., 5m0s)
    #[arg(long)]
    pub timeout: Option<String>,

    /// Ignore unfixed vulnerabilities
    #[arg(long)]
    pub ignore_unfixed: bool,

    /// Path to .trivyignore file
    #[arg(long)]
    pub trivyignore: Option<PathBuf>,

    /// Show the dependency origin tree of vulnerable packages
    #[arg(long)]
    pub dependency_tree: bool,

    /// Path to scan (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Trivy binary name or path (default: trivy)
    #[arg(long, env = "TRIVY_BIN")]
    pub trivy_bin: Option<String>,

    /// Hook settings file (default: .pre-commit-trivy.toml if present)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Additional arguments to pass to Trivy (not --exit-code; use the option above)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub trivy_args: Vec<String>,
}

impl Cli {
    /// Scanner binary to look up, command line first.
    pub fn binary(&self, settings: &Settings) -> String {
        self.trivy_bin
            .clone()
            .or_else(|| settings.binary.clone())
            .unwrap_or_else(|| DEFAULT_BINARY.to_string())
    }

    /// Merge command-line options over settings into a scan request.
    pub fn into_request(self, settings: Settings) -> ScanRequest {
        let mut extra_args = settings.args;
        extra_args.extend(self.trivy_args);

        ScanRequest {
            severity: self
                .severity
                .or(settings.severity)
                .unwrap_or_else(default_severities),
            format: self.format.or(settings.format).unwrap_or_default(),
            exit_code: self
                .exit_code
                .or(settings.exit_code)
                .unwrap_or(DEFAULT_EXIT_CODE),
            scanners: self
                .scanners
                .or(settings.scanners)
                .unwrap_or_else(default_scanners),
            config: self.config.or(settings.config),
            skip_db_update: self.skip_db_update || settings.skip_db_update,
            timeout: self.timeout.or(settings.timeout),
            ignore_unfixed: self.ignore_unfixed || settings.ignore_unfixed,
            ignore_file: self.trivyignore.or(settings.ignorefile),
            dependency_tree: self.dependency_tree || settings.dependency_tree,
            target: self
                .path
                .or(settings.path)
                .unwrap_or_else(|| PathBuf::from(".")),
            extra_args,
        }
    }
}
