//! Probe result and report types.
//!
//! A report is assembled once, after the fan-out completes, by folding over
//! the collected results. Nothing here is mutated afterwards and nothing
//! survives the invocation that produced it.

use crate::types::{Port, Target};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Classification of one connection attempt. Tri-state, never anything
/// else: any unmapped transport failure lands in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PortOutcome {
    /// Connection establishment succeeded.
    Open { service: &'static str },
    /// The destination actively rejected the attempt.
    Closed,
    /// No response before the timeout, typically a silent drop.
    Filtered,
}

impl PortOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Service name for an open port, empty otherwise.
    pub fn service(&self) -> Option<&'static str> {
        match self {
            Self::Open { service } => Some(service),
            _ => None,
        }
    }
}

impl fmt::Display for PortOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { .. } => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Filtered => write!(f, "filtered"),
        }
    }
}

/// Outcome of probing one (target, port) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub target: Target,
    pub port: Port,
    pub outcome: PortOutcome,
}

/// Per-state tallies for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PortCounts {
    pub open: usize,
    pub closed: usize,
    pub filtered: usize,
}

impl PortCounts {
    /// Fold a sequence of results into counts.
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a ScanResult>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut counts, result| {
                match result.outcome {
                    PortOutcome::Open { .. } => counts.open += 1,
                    PortOutcome::Closed => counts.closed += 1,
                    PortOutcome::Filtered => counts.filtered += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.open + self.closed + self.filtered
    }
}

/// Aggregated outcome of probing one target across a port set.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: Target,
    pub counts: PortCounts,
    /// Open ports only, in probe order.
    pub open: Vec<ScanResult>,
    /// Attempts that actually ran. Equals the requested count unless the
    /// scan was interrupted.
    pub ports_scanned: usize,
    pub duration_ms: u64,
    /// False when the scan was cancelled and the report is partial.
    pub complete: bool,
}

impl ScanReport {
    /// Assemble a report from ordered probe results.
    pub fn from_results(
        target: Target,
        results: Vec<ScanResult>,
        duration: Duration,
        complete: bool,
    ) -> Self {
        let counts = PortCounts::tally(&results);
        let ports_scanned = results.len();
        let open = results
            .into_iter()
            .filter(|result| result.outcome.is_open())
            .collect();
        Self {
            target,
            counts,
            open,
            ports_scanned,
            duration_ms: duration.as_millis() as u64,
            complete,
        }
    }

    /// Ports from the open list, in report order.
    pub fn open_ports(&self) -> Vec<Port> {
        self.open.iter().map(|result| result.port).collect()
    }
}

/// One host's entry in a batch scan. Keeps "failed to resolve" distinct
/// from "resolved with zero open ports".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HostEntry {
    Scanned(ScanReport),
    Unresolved { identifier: String, reason: String },
}

impl HostEntry {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Scanned(report) => report.target.raw(),
            Self::Unresolved { identifier, .. } => identifier,
        }
    }
}

/// Result of a multi-host scan, one entry per requested identifier in
/// input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub hosts: Vec<HostEntry>,
}

impl BatchReport {
    pub fn scanned(&self) -> impl Iterator<Item = &ScanReport> {
        self.hosts.iter().filter_map(|entry| match entry {
            HostEntry::Scanned(report) => Some(report),
            HostEntry::Unresolved { .. } => None,
        })
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hosts.iter().filter_map(|entry| match entry {
            HostEntry::Unresolved { identifier, reason } => {
                Some((identifier.as_str(), reason.as_str()))
            }
            HostEntry::Scanned(_) => None,
        })
    }

    /// True when at least one host produced a report.
    pub fn any_scanned(&self) -> bool {
        self.scanned().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn result(port: u16, outcome: PortOutcome) -> ScanResult {
        ScanResult {
            target: Target::resolved("10.1.1.1", IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1))),
            port: Port::new_unchecked(port),
            outcome,
        }
    }

    #[test]
    fn test_tally_counts_each_state() {
        let results = vec![
            result(22, PortOutcome::Open { service: "ssh" }),
            result(23, PortOutcome::Closed),
            result(24, PortOutcome::Filtered),
            result(25, PortOutcome::Closed),
        ];
        let counts = PortCounts::tally(&results);
        assert_eq!(counts.open, 1);
        assert_eq!(counts.closed, 2);
        assert_eq!(counts.filtered, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_report_open_list_matches_open_count() {
        let results = vec![
            result(80, PortOutcome::Open { service: "http" }),
            result(81, PortOutcome::Closed),
            result(443, PortOutcome::Open { service: "https" }),
        ];
        let target = results[0].target.clone();
        let report = ScanReport::from_results(target, results, Duration::from_millis(12), true);

        assert_eq!(report.counts.open, report.open.len());
        assert_eq!(
            report.open_ports(),
            vec![Port::new_unchecked(80), Port::new_unchecked(443)]
        );
        assert_eq!(report.ports_scanned, 3);
        assert!(report.complete);
    }

    #[test]
    fn test_outcome_serializes_with_state_tag() {
        let open = serde_json::to_value(PortOutcome::Open { service: "http" }).unwrap();
        assert_eq!(open["state"], "open");
        assert_eq!(open["service"], "http");

        let filtered = serde_json::to_value(PortOutcome::Filtered).unwrap();
        assert_eq!(filtered["state"], "filtered");
    }

    #[test]
    fn test_batch_report_separates_unresolved() {
        let report = ScanReport::from_results(
            Target::resolved("10.1.1.1", IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1))),
            vec![],
            Duration::ZERO,
            true,
        );
        let batch = BatchReport {
            hosts: vec![
                HostEntry::Scanned(report),
                HostEntry::Unresolved {
                    identifier: "ghost.internal".into(),
                    reason: "no such host".into(),
                },
            ],
        };
        assert!(batch.any_scanned());
        assert_eq!(batch.scanned().count(), 1);
        assert_eq!(
            batch.unresolved().next(),
            Some(("ghost.internal", "no such host"))
        );
    }
}
