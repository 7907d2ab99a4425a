//! Run a Trivy filesystem scan for the hook.

use std::path::Path;

use tracing::debug;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Error;
use crate::scanner::{ScanOutcome, ScanRequest, Scanner};

/// Run the scan command.
///
/// Status lines go to stderr so Trivy's stdout stays a clean report.
pub fn run(cli: Cli) -> Result<ScanOutcome, Error> {
    let project_root = std::env::current_dir()?;
    let (scanner, request) = prepare(cli, &project_root)?;

    eprintln!("Running Trivy security scan...");
    let result = scanner.run(&request);

    match &result {
        Ok(ScanOutcome::Clean) => eprintln!("✓ No vulnerabilities found!"),
        Ok(ScanOutcome::FindingsDetected { .. }) => {
            eprintln!("✗ Vulnerabilities found! Please review the output above.")
        }
        Err(_) => eprintln!("✗ Trivy scan failed with an error."),
    }

    result
}

/// Resolve settings, request and binary. Nothing is spawned here.
pub fn prepare(cli: Cli, project_root: &Path) -> Result<(Scanner, ScanRequest), Error> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::discover(project_root)?,
    };

    let binary = cli.binary(&settings);
    let request = cli.into_request(settings);
    request.check_extra_args()?;

    let scanner = Scanner::locate(&binary)?;
    debug!(target_path = %request.target.display(), "Scan request ready");

    Ok((scanner, request))
}
