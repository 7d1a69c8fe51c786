//! Scan target: a raw host identifier plus its resolved address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// A host under probe.
///
/// Carries the identifier exactly as the caller supplied it (hostname or
/// literal address) and, once resolution has happened, the concrete address.
/// The address is immutable after construction; a target without one cannot
/// be probed and short-circuits with a resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    raw: String,
    resolved: Option<IpAddr>,
}

impl Target {
    /// A target whose address is not known yet.
    pub fn unresolved(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            resolved: None,
        }
    }

    /// A target with a known address.
    pub fn resolved(raw: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            raw: raw.into(),
            resolved: Some(addr),
        }
    }

    /// The identifier as the caller supplied it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The resolved address, if resolution has happened.
    pub fn addr(&self) -> Option<IpAddr> {
        self.resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved {
            Some(addr) if self.raw != addr.to_string() => {
                write!(f, "{} ({})", self.raw, addr)
            }
            _ => write!(f, "{}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_unresolved_has_no_addr() {
        let target = Target::unresolved("example.com");
        assert!(!target.is_resolved());
        assert_eq!(target.addr(), None);
        assert_eq!(target.to_string(), "example.com");
    }

    #[test]
    fn test_display_hides_redundant_address() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(Target::resolved("10.0.0.1", addr).to_string(), "10.0.0.1");
        assert_eq!(
            Target::resolved("example.com", addr).to_string(),
            "example.com (10.0.0.1)"
        );
    }
}
