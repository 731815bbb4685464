//! Scan target parsing and hostname resolution.
//!
//! A target is either a literal IP address or a hostname. Resolution
//! happens exactly once, before any probe is scheduled; the scan engine
//! only ever sees a resolved `IpAddr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original user input (hostname or IP string).
    pub original: String,
    /// The resolved address.
    pub ip: IpAddr,
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Errors from target parsing and resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target: '{0}'")]
    InvalidFormat(String),
    #[error("failed to resolve host '{0}': {1}")]
    ResolutionFailed(String, String),
    #[error("no addresses found for host '{0}'")]
    NoAddresses(String),
}

/// An unresolved target specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A literal IP address, no DNS needed.
    Ip(IpAddr),
    /// A hostname to resolve.
    Hostname(String),
}

impl TargetSpec {
    /// Parse a target string into an IP literal or a hostname.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        let s = s.trim();
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Ip(ip));
        }
        if is_valid_hostname(s) {
            return Ok(Self::Hostname(s.to_string()));
        }
        Err(TargetError::InvalidFormat(s.to_string()))
    }

    /// Resolve to a concrete address.
    ///
    /// Hostnames go through the system-configured DNS; the first
    /// returned address is used.
    pub async fn resolve(&self) -> Result<ScanTarget, TargetError> {
        match self {
            Self::Ip(ip) => Ok(ScanTarget {
                original: ip.to_string(),
                ip: *ip,
            }),
            Self::Hostname(host) => {
                let resolver =
                    TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
                let response = resolver
                    .lookup_ip(host.as_str())
                    .await
                    .map_err(|e| TargetError::ResolutionFailed(host.clone(), e.to_string()))?;
                let ip = response
                    .iter()
                    .next()
                    .ok_or_else(|| TargetError::NoAddresses(host.clone()))?;
                Ok(ScanTarget {
                    original: host.clone(),
                    ip,
                })
            }
        }
    }
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{}", ip),
            Self::Hostname(host) => write!(f, "{}", host),
        }
    }
}

/// Check if a string looks like a resolvable hostname.
///
/// Labels must be 1-63 characters, alphanumeric plus hyphens, and must
/// not start or end with a hyphen.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_ipv4_literal() {
        let spec = TargetSpec::parse("192.168.1.1").unwrap();
        assert_eq!(spec, TargetSpec::Ip(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))));
    }

    #[test]
    fn test_parse_ipv6_literal() {
        let spec = TargetSpec::parse("::1").unwrap();
        assert_eq!(spec, TargetSpec::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }

    #[test]
    fn test_parse_hostname() {
        assert!(matches!(
            TargetSpec::parse("example.com").unwrap(),
            TargetSpec::Hostname(_)
        ));
        assert!(matches!(
            TargetSpec::parse("localhost").unwrap(),
            TargetSpec::Hostname(_)
        ));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TargetSpec::parse("").is_err());
        assert!(TargetSpec::parse("-bad.example").is_err());
        assert!(TargetSpec::parse("no spaces allowed").is_err());
    }

    #[tokio::test]
    async fn test_resolve_ip_is_identity() {
        let spec = TargetSpec::parse("127.0.0.1").unwrap();
        let target = spec.resolve().await.unwrap();
        assert_eq!(target.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.original, "127.0.0.1");
    }

    #[test]
    fn test_hostname_validation() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com"));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-leading.com"));
        assert!(!is_valid_hostname("trailing-.com"));
    }
}
