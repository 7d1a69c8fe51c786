//! Error types for the probe engine.
//!
//! Uses `thiserror` for ergonomic error definitions. Connect outcomes are
//! deliberately absent here: a refused or timed-out connection folds into a
//! `PortOutcome` classification and is never surfaced as an error.

use thiserror::Error;

/// Hostname resolution failed. Recoverable: batch callers record the
/// failure and continue with the remaining targets.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("failed to resolve '{host}': {reason}")]
    Lookup { host: String, reason: String },

    #[error("no addresses found for '{host}'")]
    NoRecords { host: String },

    #[error("target '{host}' has no resolved address")]
    Unresolved { host: String },
}

/// Banner read failed. Recoverable, reported, never retried.
#[derive(Debug, Error)]
pub enum BannerError {
    #[error("no banner data before the deadline")]
    TimedOut,

    #[error("peer refused the banner connection")]
    Refused,

    #[error("banner read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Web-server version probe failed. Recoverable, reported.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("server did not answer before the deadline")]
    TimedOut,

    #[error("peer refused the connection")]
    Refused,

    #[error("response carried no Server header")]
    MissingServerHeader,

    #[error("malformed HTTP response")]
    Malformed,

    #[error("version probe failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for the engine's fallible entry points.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Banner(#[from] BannerError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Timing(#[from] crate::types::TimingError),

    #[error(transparent)]
    Port(#[from] crate::types::PortError),
}

/// Result type alias for engine operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
