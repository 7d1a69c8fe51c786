//! Host resolution.
//!
//! Maps a host identifier (literal address or DNS name) to a probe-ready
//! [`Target`]. Literal addresses never touch the DNS backend; hostnames go
//! through a [`DnsBackend`] trait seam so tests can substitute a
//! deterministic lookup.

use crate::error::ResolveError;
use crate::types::Target;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Forward-lookup backend.
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// Look up the addresses for a hostname. The error string is carried
    /// into [`ResolveError::Lookup`] verbatim.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, String>;
}

/// Production backend over the system resolver configuration.
pub struct SystemDns {
    inner: TokioAsyncResolver,
}

impl SystemDns {
    pub fn new() -> Self {
        Self {
            inner: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for SystemDns {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsBackend for SystemDns {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, String> {
        let answer = self.inner.lookup_ip(host).await.map_err(|e| e.to_string())?;
        Ok(answer.iter().collect())
    }
}

/// Resolves host identifiers to targets.
#[derive(Clone)]
pub struct Resolver {
    backend: Arc<dyn DnsBackend>,
}

impl Resolver {
    /// Resolver over the system DNS configuration.
    pub fn system() -> Self {
        Self::with_backend(Arc::new(SystemDns::new()))
    }

    /// Resolver over a caller-supplied backend.
    pub fn with_backend(backend: Arc<dyn DnsBackend>) -> Self {
        Self { backend }
    }

    /// Resolve an identifier to a target.
    ///
    /// Literal IPv4/IPv6 addresses pass through without a lookup. For
    /// hostnames the first returned address wins, deterministically.
    pub async fn resolve(&self, identifier: &str) -> Result<Target, ResolveError> {
        let identifier = identifier.trim();

        if let Ok(addr) = identifier.parse::<IpAddr>() {
            return Ok(Target::resolved(identifier, addr));
        }

        let addrs = self
            .backend
            .lookup(identifier)
            .await
            .map_err(|reason| ResolveError::Lookup {
                host: identifier.to_string(),
                reason,
            })?;

        match addrs.first() {
            Some(&addr) => {
                debug!(host = identifier, %addr, "resolved");
                Ok(Target::resolved(identifier, addr))
            }
            None => Err(ResolveError::NoRecords {
                host: identifier.to_string(),
            }),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend with canned answers and a lookup counter.
    pub(crate) struct ScriptedDns {
        answers: HashMap<String, Vec<IpAddr>>,
        pub(crate) lookups: AtomicUsize,
    }

    impl ScriptedDns {
        pub(crate) fn new(answers: &[(&str, &[IpAddr])]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(host, addrs)| (host.to_string(), addrs.to_vec()))
                    .collect(),
                lookups: AtomicUsize::new(0),
            }
        }

        pub(crate) fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DnsBackend for ScriptedDns {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.answers
                .get(host)
                .cloned()
                .ok_or_else(|| format!("no such host: {host}"))
        }
    }

    fn addr(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[tokio::test]
    async fn test_literal_address_skips_dns() {
        let backend = Arc::new(ScriptedDns::new(&[]));
        let resolver = Resolver::with_backend(backend.clone());

        let target = resolver.resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.addr(), Some(addr(127, 0, 0, 1)));
        assert_eq!(backend.lookup_count(), 0);

        let target = resolver.resolve("::1").await.unwrap();
        assert!(target.addr().unwrap().is_ipv6());
        assert_eq!(backend.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_hostname_uses_first_answer() {
        let answers: &[IpAddr] = &[addr(10, 0, 0, 1), addr(10, 0, 0, 2)];
        let backend = Arc::new(ScriptedDns::new(&[("files.internal", answers)]));
        let resolver = Resolver::with_backend(backend.clone());

        let target = resolver.resolve("files.internal").await.unwrap();
        assert_eq!(target.addr(), Some(addr(10, 0, 0, 1)));
        assert_eq!(target.raw(), "files.internal");
        assert_eq!(backend.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_host_is_lookup_error() {
        let resolver = Resolver::with_backend(Arc::new(ScriptedDns::new(&[])));
        let err = resolver.resolve("missing.internal").await.unwrap_err();
        assert!(matches!(err, ResolveError::Lookup { .. }));
    }

    #[tokio::test]
    async fn test_empty_answer_is_no_records() {
        let backend = Arc::new(ScriptedDns::new(&[("dark.internal", &[] as &[IpAddr])]));
        let resolver = Resolver::with_backend(backend);
        let err = resolver.resolve("dark.internal").await.unwrap_err();
        assert!(matches!(err, ResolveError::NoRecords { .. }));
    }
}
