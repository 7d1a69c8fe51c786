//! # portprobe - A TCP Connectivity Probe
//!
//! portprobe answers one question about a host and port: can you get
//! there, and what is listening? It is built for operators doing ad-hoc
//! reconnaissance and diagnostics.
//!
//! ## Features
//!
//! - **Connect scanning**: full TCP handshakes, classified open / closed /
//!   filtered
//! - **Flexible targeting**: literal addresses, hostnames, and host lists
//! - **Port specs**: single ports, ranges, and ordered lists
//! - **Bounded concurrency**: async fan-out with a configurable worker limit
//! - **Banner grabbing**: best-effort first-response capture
//! - **Version probing**: HTTP `Server` header lookup
//! - **Cooperative cancellation**: an interrupted scan reports what it has
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portprobe::probe::ProbeEngine;
//! use portprobe::types::{Port, Timing};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = ProbeEngine::new();
//!     let timing = Timing::default();
//!
//!     let port = Port::new(22).unwrap();
//!     let result = engine.scan_single("192.168.1.1", port, timing).await.unwrap();
//!
//!     println!("port {} is {}", result.port, result.outcome);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated core types: ports, targets, timeouts
//! - [`resolve`] - Host resolution over a swappable DNS backend
//! - [`probe`] - The engine: transport seam, classification, fan-out
//! - [`report`] - Immutable result and report types
//! - [`banner`] / [`version`] - Best-effort application-layer probes
//! - [`error`] - Error taxonomy
//! - [`output`] - Console rendering

pub mod banner;
pub mod cli;
pub mod error;
pub mod output;
pub mod probe;
pub mod report;
pub mod resolve;
pub mod services;
pub mod types;
pub mod version;

// Re-export commonly used types
pub use banner::Banner;
pub use error::{BannerError, ProbeError, ProbeResult, ResolveError, VersionError};
pub use probe::{CancelToken, ProbeEngine, TcpTransport, Transport};
pub use report::{BatchReport, HostEntry, PortCounts, PortOutcome, ScanReport, ScanResult};
pub use resolve::{DnsBackend, Resolver};
pub use types::{Port, PortRange, PortSpec, Target, Timing};
