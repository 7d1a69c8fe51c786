//! Port numbers, ranges, and probe specifications.
//!
//! `PortSpec` captures the three shapes a probe request can take: a single
//! port, a contiguous range, or an explicit list. All of them are built
//! from validated `Port` values, so an in-range check never recurs past
//! parsing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A TCP port number, guaranteed in `1..=65535`.
///
/// Port zero is reserved and never probed, so it is rejected at
/// construction rather than checked at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 65535;

    /// Validate a raw port number.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Skip validation. Only for values already known to be in range.
    #[inline]
    pub const fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// The raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An inclusive range of ports with `start <= end` guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Number of ports in this range. Never zero.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0 + 1) as usize
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port::new_unchecked)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A port specification parsed from user input.
///
/// Supported formats:
/// - Single port: "80"
/// - Range: "1-1000"
/// - List: "22,80,443" (range segments inside a list are expanded in place)
///
/// A list keeps the caller's order; repeated ports are dropped, first
/// occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortSpec {
    Single(Port),
    Range(PortRange),
    List(Vec<Port>),
}

impl PortSpec {
    /// Build a list spec from caller-supplied ports, dropping duplicates.
    pub fn list(ports: impl IntoIterator<Item = Port>) -> Result<Self, PortError> {
        let ports = dedup_preserving_order(ports);
        if ports.is_empty() {
            return Err(PortError::Empty);
        }
        Ok(Self::List(ports))
    }

    /// Concrete ports in probe order.
    pub fn ports(&self) -> Vec<Port> {
        match self {
            Self::Single(port) => vec![*port],
            Self::Range(range) => range.iter().collect(),
            Self::List(ports) => ports.clone(),
        }
    }

    /// Number of ports this spec expands to.
    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Range(range) => range.len(),
            Self::List(ports) => ports.len(),
        }
    }

    /// The port, when the spec names exactly one.
    pub fn single(&self) -> Option<Port> {
        match self {
            Self::Single(port) => Some(*port),
            Self::Range(range) if range.len() == 1 => Some(range.start()),
            Self::List(ports) if ports.len() == 1 => Some(ports[0]),
            _ => None,
        }
    }
}

/// Drop repeated ports, keeping the first occurrence in place.
pub(crate) fn dedup_preserving_order(ports: impl IntoIterator<Item = Port>) -> Vec<Port> {
    let mut seen = HashSet::new();
    ports.into_iter().filter(|port| seen.insert(*port)).collect()
}

fn parse_port(s: &str) -> Result<Port, PortError> {
    let value: u16 = s
        .trim()
        .parse()
        .map_err(|_| PortError::InvalidFormat(s.trim().to_string()))?;
    Port::new(value).ok_or(PortError::OutOfRange(value))
}

fn parse_range(s: &str) -> Result<PortRange, PortError> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| PortError::InvalidFormat(s.to_string()))?;
    PortRange::new(parse_port(start)?, parse_port(end)?)
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        if s.contains(',') {
            let mut ports = Vec::new();
            for part in s.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                if part.contains('-') {
                    ports.extend(parse_range(part)?.iter());
                } else {
                    ports.push(parse_port(part)?);
                }
            }
            return Self::list(ports);
        }

        if s.contains('-') {
            return Ok(Self::Range(parse_range(s)?));
        }

        Ok(Self::Single(parse_port(s)?))
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(port) => write!(f, "{}", port),
            Self::Range(range) => write!(f, "{}", range),
            Self::List(ports) => {
                let parts: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(80).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_range_invariant() {
        let low = Port::new_unchecked(10);
        let high = Port::new_unchecked(20);
        assert!(PortRange::new(low, high).is_ok());
        assert!(matches!(
            PortRange::new(high, low),
            Err(PortError::InvalidRange(20, 10))
        ));
    }

    #[test]
    fn test_range_iteration_ascending() {
        let range = PortRange::new(Port::new_unchecked(5), Port::new_unchecked(8)).unwrap();
        let ports: Vec<u16> = range.iter().map(Port::as_u16).collect();
        assert_eq!(ports, vec![5, 6, 7, 8]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_parse_single() {
        let spec: PortSpec = "80".parse().unwrap();
        assert_eq!(spec, PortSpec::Single(Port::new_unchecked(80)));
        assert_eq!(spec.single(), Some(Port::new_unchecked(80)));
    }

    #[test]
    fn test_parse_range() {
        let spec: PortSpec = "1-100".parse().unwrap();
        assert_eq!(spec.count(), 100);
        assert!(matches!(spec, PortSpec::Range(_)));
    }

    #[test]
    fn test_parse_list_keeps_caller_order() {
        let spec: PortSpec = "443,22,80".parse().unwrap();
        let ports: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![443, 22, 80]);
    }

    #[test]
    fn test_parse_list_dedup_first_wins() {
        let spec: PortSpec = "80,443,80,22,443".parse().unwrap();
        let ports: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![80, 443, 22]);
    }

    #[test]
    fn test_parse_list_with_embedded_range() {
        let spec: PortSpec = "22,8000-8002".parse().unwrap();
        let ports: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![22, 8000, 8001, 8002]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<PortSpec>().is_err());
        assert!("http".parse::<PortSpec>().is_err());
        assert!("0".parse::<PortSpec>().is_err());
        assert!("500-100".parse::<PortSpec>().is_err());
        assert!("70000".parse::<PortSpec>().is_err());
    }
}
