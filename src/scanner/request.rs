//! Scan request and its translation into Trivy flags.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::de::{self, Deserialize, Deserializer};

use crate::error::Error;

/// Trivy subcommand used for filesystem scans.
const FS_SUBCOMMAND: &str = "fs";

/// Flags the hook sets itself and reads back from Trivy's exit status.
const RESERVED_FLAGS: &[&str] = &["--exit-code"];

/// Vulnerability severity accepted by `--severity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPERCASE")]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// Report format accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Sarif,
    Template,
    Cyclonedx,
    Spdx,
    Github,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Sarif => "sarif",
            OutputFormat::Template => "template",
            OutputFormat::Cyclonedx => "cyclonedx",
            OutputFormat::Spdx => "spdx",
            OutputFormat::Github => "github",
        }
    }
}

/// Trivy scanner selected with `--scanners`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScannerKind {
    Vuln,
    Misconfig,
    Secret,
    License,
}

impl ScannerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScannerKind::Vuln => "vuln",
            ScannerKind::Misconfig => "misconfig",
            ScannerKind::Secret => "secret",
            ScannerKind::License => "license",
        }
    }
}

/// Settings-file values parse like command-line ones, ignoring case.
fn deserialize_value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: ValueEnum,
{
    let value = String::deserialize(deserializer)?;
    T::from_str(&value, true).map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_value(deserializer)
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_value(deserializer)
    }
}

impl<'de> Deserialize<'de> for ScannerKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_value(deserializer)
    }
}

pub fn default_severities() -> Vec<Severity> {
    vec![Severity::High, Severity::Critical]
}

pub fn default_scanners() -> Vec<ScannerKind> {
    vec![ScannerKind::Vuln]
}

pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Everything needed to run one Trivy filesystem scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub severity: Vec<Severity>,
    pub format: OutputFormat,
    /// Exit code Trivy should use when findings exist.
    pub exit_code: i32,
    pub scanners: Vec<ScannerKind>,
    /// Trivy's own `trivy.yaml`.
    pub config: Option<PathBuf>,
    pub skip_db_update: bool,
    pub timeout: Option<String>,
    pub ignore_unfixed: bool,
    pub ignore_file: Option<PathBuf>,
    pub dependency_tree: bool,
    pub target: PathBuf,
    /// Forwarded verbatim ahead of the target.
    pub extra_args: Vec<String>,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            severity: default_severities(),
            format: OutputFormat::default(),
            exit_code: DEFAULT_EXIT_CODE,
            scanners: default_scanners(),
            config: None,
            skip_db_update: false,
            timeout: None,
            ignore_unfixed: false,
            ignore_file: None,
            dependency_tree: false,
            target: PathBuf::from("."),
            extra_args: Vec::new(),
        }
    }
}

impl ScanRequest {
    /// Build the argument list passed to the Trivy binary.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![FS_SUBCOMMAND.to_string()];

        args.push("--severity".to_string());
        args.push(join(&self.severity, |s| s.as_str()));

        args.push("--format".to_string());
        args.push(self.format.as_str().to_string());

        args.push("--exit-code".to_string());
        args.push(self.exit_code.to_string());

        args.push("--scanners".to_string());
        args.push(join(&self.scanners, |s| s.as_str()));

        if let Some(config) = &self.config {
            args.push("--config".to_string());
            args.push(config.display().to_string());
        }

        if self.skip_db_update {
            args.push("--skip-db-update".to_string());
        }

        if let Some(timeout) = &self.timeout {
            args.push("--timeout".to_string());
            args.push(timeout.clone());
        }

        if self.ignore_unfixed {
            args.push("--ignore-unfixed".to_string());
        }

        if let Some(ignore_file) = &self.ignore_file {
            args.push("--ignorefile".to_string());
            args.push(ignore_file.display().to_string());
        }

        if self.dependency_tree {
            args.push("--dependency-tree".to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args.push(self.target.display().to_string());

        args
    }

    /// Reject pass-through arguments that would override a reserved flag.
    pub fn check_extra_args(&self) -> Result<(), Error> {
        for arg in &self.extra_args {
            let flag = arg.split_once('=').map_or(arg.as_str(), |(flag, _)| flag);
            if RESERVED_FLAGS.contains(&flag) {
                return Err(Error::ReservedFlag(flag.to_string()));
            }
        }
        Ok(())
    }
}

/// Join values with commas, dropping repeats.
fn join<T: Copy + PartialEq>(values: &[T], name: impl Fn(T) -> &'static str) -> String {
    let mut seen: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(value) {
            seen.push(*value);
        }
    }
    seen.into_iter().map(name).collect::<Vec<_>>().join(",")
}
