//! The concurrent scan engine.
//!
//! Fans out one connect probe per requested port, bounded by a
//! semaphore so at most `concurrency` probes are in flight at once.
//! Each probe sends its outcome over a channel to a single aggregator;
//! the engine returns only after every probe has settled, with the
//! outcomes sorted ascending by port. Callers never see completion
//! order or a partial result.

mod tcp;

use crate::error::ScanError;
use crate::types::Port;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Status of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// A listener accepted the connection.
    Open,
    /// The connection was actively refused.
    Closed,
    /// No response before the timeout, likely a dropping firewall.
    Filtered,
    /// The probe failed for some other transport reason.
    Error,
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortStatus::Open => write!(f, "OPEN"),
            PortStatus::Closed => write!(f, "CLOSED"),
            PortStatus::Filtered => write!(f, "FILTERED"),
            PortStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of probing a single port. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub port: Port,
    pub status: PortStatus,
}

/// Complete result of a scan: every requested port exactly once,
/// ascending by port number.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: String,
    pub ip_address: String,
    pub ports_scanned: usize,
    pub open: usize,
    pub closed: usize,
    pub filtered: usize,
    pub errors: usize,
    pub duration_ms: u64,
    pub outcomes: Vec<ProbeOutcome>,
}

/// Concurrent TCP connect scan engine.
///
/// The concurrency limiter is owned by the engine and created fresh
/// for each scan, so engines with different caps can coexist.
#[derive(Debug, Clone)]
pub struct ScanEngine {
    target: IpAddr,
    target_name: String,
    timeout: Duration,
    concurrency: usize,
    progress: bool,
}

impl ScanEngine {
    /// Default cap on simultaneously in-flight probes.
    pub const DEFAULT_CONCURRENCY: usize = 100;

    /// Create an engine for a resolved target address.
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self {
            target,
            target_name: target.to_string(),
            timeout,
            concurrency: Self::DEFAULT_CONCURRENCY,
            progress: false,
        }
    }

    /// Record the original hostname for reporting.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.target_name = hostname.into();
        self
    }

    /// Override the in-flight probe cap.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Show a progress bar while scanning.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    /// Scan every port in `ports` and return the full outcome set.
    ///
    /// Per-port transport failures are recorded as
    /// [`PortStatus::Error`] outcomes and never abort the scan. The
    /// method itself fails only on programming-error inputs: a zero
    /// timeout or a zero concurrency cap.
    ///
    /// Cancellation: the probe tasks live in a `JoinSet` owned by the
    /// returned future, so dropping that future (e.g. losing a
    /// `select!` against Ctrl-C) aborts all in-flight probes and
    /// closes their sockets.
    pub async fn scan(&self, ports: Vec<Port>) -> Result<ScanReport, ScanError> {
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }

        let start = Instant::now();
        let total = ports.len();
        tracing::debug!(addr = %self.target, ports = total, "scan started");

        let progress = self.progress.then(|| make_progress_bar(total));

        let target = self.target;
        let timeout = self.timeout;
        let outcomes = run_probes(
            ports,
            self.concurrency,
            progress,
            move |port| probe_target(target, port, timeout),
        )
        .await;

        let duration = start.elapsed();
        tracing::debug!(addr = %self.target, elapsed_ms = duration.as_millis() as u64, "scan finished");

        let count = |status: PortStatus| outcomes.iter().filter(|o| o.status == status).count();
        Ok(ScanReport {
            target: self.target_name.clone(),
            ip_address: self.target.to_string(),
            ports_scanned: total,
            open: count(PortStatus::Open),
            closed: count(PortStatus::Closed),
            filtered: count(PortStatus::Filtered),
            errors: count(PortStatus::Error),
            duration_ms: duration.as_millis() as u64,
            outcomes,
        })
    }
}

async fn probe_target(target: IpAddr, port: Port, timeout: Duration) -> PortStatus {
    tcp::probe(SocketAddr::new(target, port.get()), timeout).await
}

/// Run one probe task per port under a semaphore cap and aggregate the
/// outcomes over a channel, sorted ascending by port.
///
/// Generic over the probe so tests can substitute instrumented or
/// artificially delayed probes.
async fn run_probes<F, Fut>(
    ports: Vec<Port>,
    concurrency: usize,
    progress: Option<ProgressBar>,
    probe_fn: F,
) -> Vec<ProbeOutcome>
where
    F: Fn(Port) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = PortStatus> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));
    // Capacity covers every outcome, so sends never block the probes.
    let (tx, mut rx) = mpsc::channel::<ProbeOutcome>(ports.len().max(1));

    let mut tasks = JoinSet::new();
    for port in ports {
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();
        let probe_fn = probe_fn.clone();
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("scan semaphore closed");
            let status = probe_fn(port).await;
            let _ = tx.send(ProbeOutcome { port, status }).await;
        });
    }
    // The aggregator holds the only remaining sender through the
    // clones above; dropping it lets recv() end once all tasks finish.
    drop(tx);

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(outcome) = rx.recv().await {
        if let Some(pb) = &progress {
            pb.inc(1);
            if outcome.status == PortStatus::Open {
                pb.set_message(format!("open: {}", outcome.port));
            }
        }
        outcomes.push(outcome);
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    outcomes.sort_unstable_by_key(|o| o.port);
    outcomes
}

fn make_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
