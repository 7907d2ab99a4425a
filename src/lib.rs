//! Pre-commit hook for the Trivy security scanner.
//!
//! Translates hook options into Trivy flags, runs `trivy fs` and maps its
//! exit status to 0 (clean), the configured findings code, or 2 (error).

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;

pub use error::Error;
