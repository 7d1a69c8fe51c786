//! Transport abstraction and outcome classification.
//!
//! The [`Transport`] trait is the seam between the orchestrator and the
//! operating system: one call, one connection attempt, one classified
//! failure. Tests substitute scripted transports for deterministic scans.

use crate::report::PortOutcome;
use crate::services;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

/// How a connection attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectFailure {
    /// The destination answered with an active rejection.
    Refused,
    /// The deadline passed with no response at all.
    TimedOut,
    /// The network or host could not be reached.
    Unreachable,
    /// Anything else the transport layer reported.
    Other(String),
}

/// A single bounded connection attempt.
///
/// Implementations own the socket for the duration of the call and release
/// it on every exit path.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> Result<(), ConnectFailure>;
}

/// Map an attempt to its port state.
///
/// A timeout with no response is the only filtered signal; every explicit
/// rejection, unreachable networks included, reads as closed. This mapping
/// is the engine's central contract and always yields a classification.
pub fn classify(attempt: Result<(), ConnectFailure>, port: u16) -> PortOutcome {
    match attempt {
        Ok(()) => PortOutcome::Open {
            service: services::name_for(port),
        },
        Err(ConnectFailure::TimedOut) => PortOutcome::Filtered,
        Err(ConnectFailure::Refused)
        | Err(ConnectFailure::Unreachable)
        | Err(ConnectFailure::Other(_)) => PortOutcome::Closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_open_with_service() {
        let outcome = classify(Ok(()), 80);
        assert_eq!(outcome, PortOutcome::Open { service: "http" });
    }

    #[test]
    fn test_refused_is_closed() {
        assert_eq!(classify(Err(ConnectFailure::Refused), 80), PortOutcome::Closed);
    }

    #[test]
    fn test_timeout_is_filtered() {
        assert_eq!(classify(Err(ConnectFailure::TimedOut), 80), PortOutcome::Filtered);
    }

    #[test]
    fn test_everything_else_is_closed() {
        assert_eq!(
            classify(Err(ConnectFailure::Unreachable), 80),
            PortOutcome::Closed
        );
        assert_eq!(
            classify(Err(ConnectFailure::Other("reset".into())), 80),
            PortOutcome::Closed
        );
    }
}
