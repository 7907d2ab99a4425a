//! Trivy invocation: request translation, binary lookup and process execution.

pub mod invoke;
pub mod locate;
pub mod request;

pub use invoke::{ScanOutcome, Scanner};
pub use locate::DEFAULT_BINARY;
pub use request::{OutputFormat, ScanRequest, ScannerKind, Severity};
