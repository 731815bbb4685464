//! Error types.
//!
//! Uses `thiserror` for the library enums. Per-probe transport
//! failures are deliberately absent here: they are recorded as
//! `PortStatus::Error` outcomes, not raised as errors.

use crate::types::{PortError, TargetError};
use thiserror::Error;

/// Failures of the scan engine itself.
///
/// These are caller mistakes or user cancellation; ordinary network
/// trouble never surfaces through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("probe timeout must be greater than zero")]
    InvalidTimeout,
    #[error("concurrency cap must be at least 1")]
    InvalidConcurrency,
    #[error("scan interrupted by user")]
    Interrupted,
}

/// Top-level error for a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid port specification: {0}")]
    Port(#[from] PortError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
