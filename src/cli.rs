//! Command-line interface.
//!
//! Uses `clap` derive macros for declarative argument parsing and
//! wires the thin glue around the engine: parse ports, resolve the
//! host, run the scan, print the report.

use crate::error::{CliResult, ScanError};
use crate::output;
use crate::scanner::ScanEngine;
use crate::types::{PortSpec, TargetSpec};
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// A concurrent TCP connect port scanner.
#[derive(Parser, Debug)]
#[command(name = "skiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check which TCP ports on a host are open, closed or filtered", long_about = None)]
pub struct Args {
    /// Target hostname or IP address (e.g. localhost, 192.168.1.1)
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Ports to scan (e.g. "80", "80,443", "20-100", "80,443,20-100")
    #[arg(short, long, required = true)]
    pub ports: String,

    /// Per-probe timeout in seconds
    #[arg(short = 't', long, default_value = "1.0")]
    pub timeout: f64,

    /// Maximum number of probes in flight at once
    #[arg(short = 'c', long, default_value = "100")]
    pub concurrency: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Show a progress bar while scanning
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the pre-scan header
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
}

/// Execute one scan invocation.
///
/// All fallible setup (port parsing, host resolution, timeout
/// validation) happens before any probe is scheduled. The scan itself
/// is raced against Ctrl-C; on interrupt the scan future is dropped,
/// which aborts every in-flight probe, and no partial report is
/// printed.
pub async fn run(args: Args) -> CliResult<()> {
    // Duration::from_secs_f64 panics on negative or non-finite input,
    // so validate before converting.
    if !(args.timeout > 0.0 && args.timeout.is_finite()) {
        return Err(ScanError::InvalidTimeout.into());
    }
    let timeout = Duration::from_secs_f64(args.timeout);

    let spec: PortSpec = args.ports.parse()?;
    let ports = spec.to_ports();

    let target = TargetSpec::parse(&args.host)?.resolve().await?;

    if !args.quiet && args.output == OutputFormat::Plain {
        output::print_scan_header(&target.original, &target.ip.to_string(), ports.len());
    }

    let mut engine = ScanEngine::new(target.ip, timeout)
        .with_hostname(&target.original)
        .with_concurrency(args.concurrency);
    if args.verbose {
        engine = engine.with_progress();
    }

    let report = tokio::select! {
        report = engine.scan(ports) => report?,
        _ = tokio::signal::ctrl_c() => return Err(ScanError::Interrupted.into()),
    };

    output::print_report(&report, args.output)?;
    Ok(())
}
