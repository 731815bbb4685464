//! Port number types and the port specification parser.
//!
//! `Port` is a validated newtype: a value of this type is always inside
//! 1-65535, so the scanner never has to re-check. `PortSpec` turns the
//! textual `-p` argument (`"80"`, `"80,443"`, `"20-100"` or any comma
//! combination) into a canonical sorted, deduplicated port list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Lowest valid port number. Port 0 is reserved and never scannable.
    pub const MIN: u16 = 1;
    /// Highest valid port number.
    pub const MAX: u16 = 65535;

    /// Create a `Port`, returning `None` when the value is out of range.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn get(self) -> u16 {
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
        Self::new(value).ok_or(PortError::OutOfRange(value as u32))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Errors produced while parsing a port specification.
///
/// Any of these makes the whole specification invalid; parsing never
/// yields a partial port list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: '{0}'")]
    InvalidNumber(String),
    #[error("invalid port range: '{0}' (expected start-end)")]
    InvalidRange(String),
    #[error("reversed port range: {0}-{1}")]
    ReversedRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// A parsed port specification.
///
/// Holds the inclusive ranges exactly as the user wrote them; the
/// canonical scan order comes from [`PortSpec::to_ports`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortSpec {
    ranges: Vec<(Port, Port)>,
}

impl PortSpec {
    /// All ports as a strictly ascending, duplicate-free list.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut ports: Vec<Port> = self
            .ranges
            .iter()
            .flat_map(|&(start, end)| (start.get()..=end.get()).map(Port))
            .collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// Number of distinct ports covered by this specification.
    pub fn count(&self) -> usize {
        self.to_ports().len()
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    /// Parse a specification like `"22,80,443,8000-9000"`.
    ///
    /// Whitespace around tokens is ignored. Every token must be a bare
    /// port or an inclusive `start-end` range with `start <= end`;
    /// anything else fails the entire specification.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ranges = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            if let Some((lo, hi)) = token.split_once('-') {
                if hi.contains('-') {
                    return Err(PortError::InvalidRange(token.to_string()));
                }
                let start = parse_port(lo.trim())?;
                let end = parse_port(hi.trim())?;
                if start > end {
                    return Err(PortError::ReversedRange(start.get(), end.get()));
                }
                ranges.push((start, end));
            } else {
                let port = parse_port(token)?;
                ranges.push((port, port));
            }
        }

        Ok(Self { ranges })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .ranges
            .iter()
            .map(|&(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

fn parse_port(token: &str) -> Result<Port, PortError> {
    // Parse wide so "70000" reports out-of-range, not a number error.
    let value: u32 = token
        .parse()
        .map_err(|_| PortError::InvalidNumber(token.to_string()))?;
    if value < Port::MIN as u32 || value > Port::MAX as u32 {
        return Err(PortError::OutOfRange(value));
    }
    Ok(Port(value as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(spec: &str) -> Vec<u16> {
        spec.parse::<PortSpec>()
            .unwrap()
            .to_ports()
            .into_iter()
            .map(Port::get)
            .collect()
    }

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_single_port() {
        assert_eq!(ports("80"), vec![80]);
        assert_eq!(ports(" 443 "), vec![443]);
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(ports("80,443,8080"), vec![80, 443, 8080]);
    }

    #[test]
    fn test_range() {
        assert_eq!(ports("20-25"), vec![20, 21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_mixed_sorted_dedup() {
        assert_eq!(
            ports("80,443,20-25,443"),
            vec![20, 21, 22, 23, 24, 25, 80, 443]
        );
    }

    #[test]
    fn test_overlapping_ranges_dedup() {
        assert_eq!(ports("1-5,3-7"), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_invalid_number() {
        assert!(matches!(
            "abc".parse::<PortSpec>(),
            Err(PortError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            "70000".parse::<PortSpec>(),
            Err(PortError::OutOfRange(70000))
        ));
        assert!(matches!(
            "0".parse::<PortSpec>(),
            Err(PortError::OutOfRange(0))
        ));
    }

    #[test]
    fn test_malformed_range() {
        assert!("5-".parse::<PortSpec>().is_err());
        assert!("-5".parse::<PortSpec>().is_err());
        assert!("1-2-3".parse::<PortSpec>().is_err());
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            "100-20".parse::<PortSpec>(),
            Err(PortError::ReversedRange(100, 20))
        ));
    }

    #[test]
    fn test_empty_spec() {
        assert!(matches!("".parse::<PortSpec>(), Err(PortError::Empty)));
        assert!(matches!("  ".parse::<PortSpec>(), Err(PortError::Empty)));
    }

    #[test]
    fn test_full_range_count() {
        let spec: PortSpec = "1-65535".parse().unwrap();
        assert_eq!(spec.count(), 65535);
    }

    #[test]
    fn test_display_roundtrip() {
        let spec: PortSpec = "22,80,8000-9000".parse().unwrap();
        assert_eq!(spec.to_string(), "22,80,8000-9000");
    }
}
