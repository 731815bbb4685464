//! # Skiff - A Concurrent TCP Connect Port Scanner
//!
//! Skiff checks which TCP ports on a host are open, closed or
//! filtered by attempting a bounded-time connection to each requested
//! port, with a hard cap on how many probes run at once.
//!
//! ## Example
//!
//! ```rust,ignore
//! use skiff::scanner::ScanEngine;
//! use skiff::types::PortSpec;
//! use std::net::IpAddr;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target: IpAddr = "192.168.1.1".parse().unwrap();
//!     let ports = "22,80,443".parse::<PortSpec>().unwrap().to_ports();
//!
//!     let engine = ScanEngine::new(target, Duration::from_secs(1));
//!     let report = engine.scan(ports).await.unwrap();
//!
//!     for outcome in &report.outcomes {
//!         println!("Port {}: {}", outcome.port, outcome.status);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - validated `Port` values, the port specification
//!   parser and target resolution
//! - [`scanner`] - the concurrent scan engine
//! - [`cli`] / [`output`] - argument parsing and report printing
//! - [`error`] - error types

pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

pub use error::{CliError, ScanError};
pub use scanner::{PortStatus, ProbeOutcome, ScanEngine, ScanReport};
pub use types::{Port, PortSpec, ScanTarget, TargetSpec};
