//! Probe orchestration.
//!
//! [`ProbeEngine`] drives connection attempts across ports and hosts:
//! resolve first, fan the attempts out under a bounded concurrency limit,
//! classify every outcome, and fold the results into an immutable report.
//! Cancellation stops new attempts promptly and keeps what already ran.

pub mod tcp;
pub mod transport;

pub use tcp::TcpTransport;
pub use transport::{ConnectFailure, Transport};

use crate::banner::{self, Banner};
use crate::error::{ProbeError, ResolveError};
use crate::report::{BatchReport, HostEntry, ScanReport, ScanResult};
use crate::resolve::Resolver;
use crate::types::{dedup_preserving_order, Port, PortRange, Target, Timing};
use crate::version;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use self::transport::classify;

/// Cooperative cancellation flag shared between the engine and its caller.
///
/// Setting it stops the engine from issuing new connection attempts;
/// attempts already in flight run to completion and stay in the report.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The scanning engine.
///
/// Holds the transport, the resolver, and the concurrency bound. All scan
/// state lives in per-call accumulators; the engine itself is immutable
/// during a scan and can be shared.
pub struct ProbeEngine {
    transport: Arc<dyn Transport>,
    resolver: Resolver,
    concurrency: usize,
    cancel: CancelToken,
    show_progress: bool,
}

impl ProbeEngine {
    pub const DEFAULT_CONCURRENCY: usize = 32;

    /// Engine over the real TCP transport and the system resolver.
    pub fn new() -> Self {
        Self {
            transport: Arc::new(TcpTransport),
            resolver: Resolver::system(),
            concurrency: Self::DEFAULT_CONCURRENCY,
            cancel: CancelToken::new(),
            show_progress: false,
        }
    }

    /// Substitute the transport. Tests use scripted transports.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Bound on simultaneous connection attempts. Clamped to at least one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Draw a progress bar while sweeping.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Handle for cancelling this engine's scans.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Probe exactly one port on one host.
    pub async fn scan_single(
        &self,
        identifier: &str,
        port: Port,
        timing: Timing,
    ) -> Result<ScanResult, ResolveError> {
        let target = self.resolver.resolve(identifier).await?;
        self.probe_one(&target, port, timing).await
    }

    /// Probe every port in `range`, ascending.
    pub async fn scan_range(
        &self,
        identifier: &str,
        range: PortRange,
        timing: Timing,
    ) -> Result<ScanReport, ResolveError> {
        let target = self.resolver.resolve(identifier).await?;
        self.sweep(&target, range.iter().collect(), timing).await
    }

    /// Probe an explicit port list, preserving the caller's order.
    /// Repeated ports are dropped, first occurrence wins.
    pub async fn scan_list(
        &self,
        identifier: &str,
        ports: &[Port],
        timing: Timing,
    ) -> Result<ScanReport, ResolveError> {
        let target = self.resolver.resolve(identifier).await?;
        let ports = dedup_preserving_order(ports.iter().copied());
        self.sweep(&target, ports, timing).await
    }

    /// Probe the cross-product of hosts and ports.
    ///
    /// Every identifier is resolved up front; a resolution failure is
    /// recorded and never aborts the rest of the batch.
    pub async fn scan_many(
        &self,
        identifiers: &[String],
        ports: &[Port],
        timing: Timing,
    ) -> BatchReport {
        let mut resolved = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            match self.resolver.resolve(identifier).await {
                Ok(target) => resolved.push(Ok(target)),
                Err(e) => {
                    warn!(host = identifier.as_str(), error = %e, "resolution failed, skipping");
                    resolved.push(Err((identifier.clone(), e)));
                }
            }
        }

        let ports = dedup_preserving_order(ports.iter().copied());
        let mut hosts = Vec::with_capacity(resolved.len());
        for entry in resolved {
            match entry {
                Ok(target) => {
                    if self.cancel.is_cancelled() {
                        break;
                    }
                    match self.sweep(&target, ports.clone(), timing).await {
                        Ok(report) => hosts.push(HostEntry::Scanned(report)),
                        Err(e) => hosts.push(HostEntry::Unresolved {
                            identifier: target.raw().to_string(),
                            reason: e.to_string(),
                        }),
                    }
                }
                Err((identifier, e)) => hosts.push(HostEntry::Unresolved {
                    identifier,
                    reason: e.to_string(),
                }),
            }
        }

        BatchReport { hosts }
    }

    /// Read the service banner from one port.
    pub async fn grab_banner(
        &self,
        identifier: &str,
        port: Port,
        timing: Timing,
    ) -> Result<Banner, ProbeError> {
        let target = self.resolver.resolve(identifier).await?;
        let addr = probe_addr(&target, port)?;
        Ok(banner::fetch(addr, target.raw(), timing).await?)
    }

    /// Fetch the web server's version string from the HTTP Server header.
    pub async fn server_version(
        &self,
        identifier: &str,
        timing: Timing,
    ) -> Result<String, ProbeError> {
        let target = self.resolver.resolve(identifier).await?;
        let addr = probe_addr(&target, Port::new_unchecked(version::HTTP_PORT))?;
        Ok(version::fetch(addr, target.raw(), timing).await?)
    }

    async fn probe_one(
        &self,
        target: &Target,
        port: Port,
        timing: Timing,
    ) -> Result<ScanResult, ResolveError> {
        let addr = probe_addr(target, port)?;
        let attempt = self.transport.connect(addr, timing.connect_timeout()).await;
        Ok(ScanResult {
            target: target.clone(),
            port,
            outcome: classify(attempt, port.as_u16()),
        })
    }

    /// Fan connection attempts out over `ports` and assemble the report.
    ///
    /// Attempts carry their issue index and are re-sorted before the report
    /// is built, so the result is identical regardless of completion order.
    async fn sweep(
        &self,
        target: &Target,
        ports: Vec<Port>,
        timing: Timing,
    ) -> Result<ScanReport, ResolveError> {
        let addr_ip = target
            .addr()
            .ok_or_else(|| ResolveError::Unresolved {
                host: target.raw().to_string(),
            })?;

        let requested = ports.len();
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let progress = self.progress_bar(requested);

        let mut indexed: Vec<(usize, ScanResult)> = stream::iter(ports.into_iter().enumerate())
            .map(|(idx, port)| {
                let semaphore = Arc::clone(&semaphore);
                let transport = Arc::clone(&self.transport);
                let cancel = self.cancel.clone();
                let target = target.clone();
                let progress = progress.clone();
                let deadline = timing.connect_timeout();
                let addr = SocketAddr::new(addr_ip, port.as_u16());

                async move {
                    let _permit = semaphore.acquire().await.ok()?;
                    if cancel.is_cancelled() {
                        return None;
                    }

                    let attempt = transport.connect(addr, deadline).await;
                    let outcome = classify(attempt, port.as_u16());

                    if let Some(pb) = &progress {
                        pb.inc(1);
                        if outcome.is_open() {
                            pb.set_message(format!("open: {port}"));
                        }
                    }

                    Some((
                        idx,
                        ScanResult {
                            target,
                            port,
                            outcome,
                        },
                    ))
                }
            })
            .buffer_unordered(1000) // semaphore controls actual concurrency
            .filter_map(|result| async move { result })
            .collect()
            .await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        indexed.sort_by_key(|(idx, _)| *idx);
        let results: Vec<ScanResult> = indexed.into_iter().map(|(_, result)| result).collect();

        let complete = !self.cancel.is_cancelled() && results.len() == requested;
        let report = ScanReport::from_results(target.clone(), results, started.elapsed(), complete);
        debug!(
            host = %report.target,
            open = report.counts.open,
            closed = report.counts.closed,
            filtered = report.counts.filtered,
            complete = report.complete,
            "sweep finished"
        );
        Ok(report)
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    }
}

impl Default for ProbeEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn probe_addr(target: &Target, port: Port) -> Result<SocketAddr, ResolveError> {
    let addr = target.addr().ok_or_else(|| ResolveError::Unresolved {
        host: target.raw().to_string(),
    })?;
    Ok(SocketAddr::new(addr, port.as_u16()))
}
