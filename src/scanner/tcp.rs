//! Single TCP connect probe.
//!
//! One probe is one connection attempt against `(address, port)` with a
//! hard deadline. The stream is dropped as soon as the attempt settles,
//! so the socket is released on every path.

use crate::scanner::PortStatus;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;

/// Attempt one connection and classify the outcome.
///
/// - connect succeeds: [`PortStatus::Open`]
/// - connection actively refused: [`PortStatus::Closed`]
/// - no response before `timeout`: [`PortStatus::Filtered`]
/// - any other transport error: [`PortStatus::Error`]
///
/// Never fails; transport errors become a per-port status so one bad
/// port cannot abort the rest of a scan.
pub(crate) async fn probe(addr: SocketAddr, timeout: Duration) -> PortStatus {
    match time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortStatus::Open
        }
        Ok(Err(e)) => classify_error(addr, &e),
        Err(_) => PortStatus::Filtered,
    }
}

/// Map a connect error to a port status.
fn classify_error(addr: SocketAddr, e: &io::Error) -> PortStatus {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => PortStatus::Closed,
        // The OS stack can time the connect out on its own before our
        // deadline fires; treat that the same as our timeout.
        io::ErrorKind::TimedOut => PortStatus::Filtered,
        _ => {
            tracing::debug!(%addr, error = %e, "probe failed");
            PortStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let status = probe(addr, Duration::from_secs(1)).await;
        assert_eq!(status, PortStatus::Open);
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Bind then drop to find a loopback port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let status = probe(addr, Duration::from_secs(1)).await;
        // Loopback normally refuses, but a firewall may drop instead.
        assert!(matches!(status, PortStatus::Closed | PortStatus::Filtered));
    }

    #[test]
    fn test_classify_refused() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 1);
        let e = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(classify_error(addr, &e), PortStatus::Closed);
    }

    #[test]
    fn test_classify_os_timeout() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 1);
        let e = io::Error::from(io::ErrorKind::TimedOut);
        assert_eq!(classify_error(addr, &e), PortStatus::Filtered);
    }

    #[test]
    fn test_classify_other_errors() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 1);
        for kind in [
            io::ErrorKind::AddrNotAvailable,
            io::ErrorKind::PermissionDenied,
            io::ErrorKind::Other,
        ] {
            let e = io::Error::from(kind);
            assert_eq!(classify_error(addr, &e), PortStatus::Error);
        }
    }
}
