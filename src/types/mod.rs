//! Core type definitions.
//!
//! Newtype wrappers keep invalid values out of the scanner: a `Port` is
//! always in range and a `ScanTarget` is always resolved.

pub mod port;
pub mod target;

pub use port::{Port, PortError, PortSpec};
pub use target::{ScanTarget, TargetError, TargetSpec};
