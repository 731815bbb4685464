//! Report formatting and user-facing messages.

use crate::cli::OutputFormat;
use crate::scanner::{PortStatus, ScanReport};
use console::{style, Style};
use std::io::{self, Write};

/// Print a scan report in the requested format.
pub fn print_report(report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(report),
        OutputFormat::Json => print_json(report),
    }
}

/// Human-readable output: one `Port N: STATUS` line per port in
/// ascending order, then a summary with the elapsed wall-clock time.
fn print_plain(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for outcome in &report.outcomes {
        let status_style = match outcome.status {
            PortStatus::Open => Style::new().green().bold(),
            PortStatus::Closed => Style::new().red(),
            PortStatus::Filtered => Style::new().yellow(),
            PortStatus::Error => Style::new().magenta(),
        };
        writeln!(
            out,
            "Port {}: {}",
            outcome.port,
            status_style.apply_to(outcome.status)
        )?;
    }

    writeln!(
        out,
        "\nScanned {} ports in {:.2}s ({} open, {} closed, {} filtered, {} errors)",
        report.ports_scanned,
        report.duration_ms as f64 / 1000.0,
        style(report.open).green().bold(),
        style(report.closed).red(),
        style(report.filtered).yellow(),
        style(report.errors).magenta(),
    )?;

    Ok(())
}

fn print_json(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Print the pre-scan header with the resolved address.
pub fn print_scan_header(target: &str, ip: &str, ports: usize) {
    println!("Scanning {}...", style(target).white().bold());
    println!("Resolved IP: {}", style(ip).cyan());
    println!(
        "Probing {} ports...",
        style(ports).white().bold()
    );
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
