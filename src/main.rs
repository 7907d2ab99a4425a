//! trivy-scan - run the Trivy security scanner as a pre-commit hook.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pre_commit_trivy::cli::{self, Cli};

fn main() -> ExitCode {
    // Logs share stderr with the status lines; stdout belongs to Trivy.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pre_commit_trivy=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // clap exits with 2 on usage errors
    let cli = Cli::parse();

    match cli::scan::run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
