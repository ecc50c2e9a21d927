//! # Concurrent Sweep Engine
//!
//! This module is the core of lansweep: the probe primitives and the
//! two-stage fan-out that drives them.
//!
//! A subnet sweep spawns one task per candidate host address. Each task runs
//! a liveness probe; when a host answers, the same task synchronously runs a
//! port sweep for that address, which fans out one task per well-known port.
//! The outer join therefore cannot release before every nested port task has
//! finished: all work, including work spawned by work, is done when
//! [`Sweeper::sweep`] returns.
//!
//! Total in-flight probes are bounded by a semaphore shared between host and
//! port probes. A permit covers exactly one probe. A host task must not hold
//! its permit across the nested port sweep, otherwise a saturated pool
//! deadlocks against its own children.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lansweep::events::MemorySink;
//! use lansweep::external::ping::PingTool;
//! use lansweep::scanner::Sweeper;
//! use lansweep::target::{PortTable, Subnet};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subnet = Subnet::parse("192.168.1")?;
//!     let sink = Arc::new(MemorySink::new());
//!     let pinger = Arc::new(PingTool::new()?);
//!
//!     let sweeper = Sweeper::new(
//!         PortTable::well_known(),
//!         Duration::from_secs(1),
//!         128,
//!         pinger,
//!         sink.clone(),
//!     )?;
//!     sweeper.sweep(&subnet).await;
//!
//!     println!("{} events", sink.events().len());
//!     Ok(())
//! }
//! ```

use crate::error::{LanSweepError, Result};
use crate::events::{DiscoveryEvent, EventSink};
use crate::metrics::SweepMetrics;
use crate::shutdown::ShutdownToken;
use crate::target::{PortTable, Subnet};
use crate::validation;
use async_trait::async_trait;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, trace};

/// Outcome of a single TCP connect probe
///
/// Sweeps collapse `Unreachable` and `Timeout` to "not open"; the enum keeps
/// the primitive itself honest about what it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
    Timeout,
}

impl ProbeOutcome {
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// Probe a single `(address, port)` pair with one bounded-time TCP connect
///
/// Succeeds only if the handshake completes within `timeout`. The connection
/// is dropped immediately on success; nothing is sent or read. No retries.
pub async fn probe_port(addr: Ipv4Addr, port: u16, timeout: Duration) -> ProbeOutcome {
    let socket_addr = SocketAddr::new(IpAddr::V4(addr), port);

    match tokio::time::timeout(timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeOutcome::Reachable
        }
        Ok(Err(_)) => ProbeOutcome::Unreachable,
        Err(_) => ProbeOutcome::Timeout,
    }
}

/// Host-liveness collaborator
///
/// One liveness check per call, bounded by `timeout`; every non-success (no
/// reply, spawn failure, permission error, network unreachable) collapses to
/// `false`. The production implementation is
/// [`PingTool`](crate::external::ping::PingTool); tests substitute doubles.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn check(&self, addr: Ipv4Addr, timeout: Duration) -> bool;
}

/// The concurrent sweep engine
///
/// Holds the immutable port table, the shared probe timeout, the in-flight
/// probe limiter, and the collaborators every probe task shares. Cheap to
/// clone; clones share the same limiter, sink, and metrics.
#[derive(Clone)]
pub struct Sweeper {
    table: Arc<PortTable>,
    timeout: Duration,
    limiter: Arc<Semaphore>,
    pinger: Arc<dyn LivenessProbe>,
    sink: Arc<dyn EventSink>,
    shutdown: ShutdownToken,
    metrics: Arc<SweepMetrics>,
}

impl Sweeper {
    /// Create a sweeper, failing fast on configuration errors
    ///
    /// Rejects an empty port table, a zero or over-limit timeout, and a zero
    /// concurrency cap before any task is spawned.
    pub fn new(
        table: PortTable,
        timeout: Duration,
        concurrency: usize,
        pinger: Arc<dyn LivenessProbe>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        if table.is_empty() {
            return Err(LanSweepError::config("Port table cannot be empty"));
        }
        validation::validate_timeout_ms(timeout.as_millis() as u64)?;
        validation::validate_concurrency(concurrency)?;

        Ok(Self {
            table: Arc::new(table),
            timeout,
            limiter: Arc::new(Semaphore::new(concurrency)),
            pinger,
            sink,
            shutdown: ShutdownToken::new(),
            metrics: Arc::new(SweepMetrics::new()),
        })
    }

    /// Attach a cancellation token; on cancel, no new probes are issued
    pub fn with_shutdown(mut self, token: ShutdownToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Counters shared by every probe task of this sweeper
    pub fn metrics(&self) -> Arc<SweepMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Sweep every host address of `subnet`, emitting events as they arrive
    ///
    /// Returns only once all host tasks, and transitively all port tasks
    /// they spawned, have completed. Individual probe failures are expected
    /// outcomes and never abort the sweep.
    pub async fn sweep(&self, subnet: &Subnet) {
        let mut tasks: JoinSet<()> = JoinSet::new();

        for addr in subnet.hosts() {
            if self.shutdown.is_cancelled() {
                debug!(%addr, "shutdown requested, not spawning further host probes");
                break;
            }
            let sweeper = self.clone();
            tasks.spawn(async move { sweeper.probe_host_task(addr).await });
        }

        // Join barrier: every host task awaited its own port sweep before
        // returning, so draining the set waits for the nested tasks too.
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                // A panicked or cancelled task degrades to "host dead".
                debug!("host task did not complete cleanly: {}", e);
            }
        }
    }

    /// Probe every port of the table against one address
    ///
    /// Each open port is emitted to the sink the moment its probe succeeds;
    /// the returned list (ascending by port) is complete only because this
    /// method joins every port task before returning.
    pub async fn sweep_ports(&self, addr: Ipv4Addr) -> Vec<(u16, String)> {
        let mut tasks: JoinSet<Option<(u16, String)>> = JoinSet::new();

        for (port, label) in self.table.iter() {
            if self.shutdown.is_cancelled() {
                debug!(%addr, "shutdown requested, not spawning further port probes");
                break;
            }
            let label = label.to_string();
            let sweeper = self.clone();
            tasks.spawn(async move {
                if sweeper.probe_port_bounded(addr, port).await {
                    sweeper
                        .sink
                        .emit(DiscoveryEvent::port_open(addr, port, label.clone()));
                    Some((port, label))
                } else {
                    None
                }
            });
        }

        let mut open = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(found)) => open.push(found),
                Ok(None) => {}
                Err(e) => debug!(%addr, "port task did not complete cleanly: {}", e),
            }
        }

        open.sort_by_key(|(port, _)| *port);
        open
    }

    async fn probe_host_task(&self, addr: Ipv4Addr) {
        if !self.probe_host(addr).await {
            return;
        }

        self.sink.emit(DiscoveryEvent::host_alive(addr));
        // Synchronous from this task's point of view: the host task only
        // completes after its whole port sweep has joined.
        self.sweep_ports(addr).await;
    }

    /// One liveness probe under a limiter permit
    ///
    /// The permit is released when this method returns, before any nested
    /// port sweep starts.
    async fn probe_host(&self, addr: Ipv4Addr) -> bool {
        let permit = match Arc::clone(&self.limiter).acquire_owned().await {
            Ok(permit) => permit,
            // Closed semaphore means the process is tearing down.
            Err(_) => return false,
        };

        self.metrics.record_host_probed();
        trace!(%addr, "probing host liveness");
        let alive = self.pinger.check(addr, self.timeout).await;
        drop(permit);

        if alive {
            self.metrics.record_host_alive();
        }
        alive
    }

    async fn probe_port_bounded(&self, addr: Ipv4Addr, port: u16) -> bool {
        let permit = match Arc::clone(&self.limiter).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return false,
        };

        self.metrics.record_port_probed();
        trace!(%addr, port, "probing port");
        let outcome = probe_port(addr, port, self.timeout).await;
        drop(permit);

        let open = outcome.is_reachable();
        if open {
            self.metrics.record_port_open();
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;

    struct NeverAlive;

    #[async_trait]
    impl LivenessProbe for NeverAlive {
        async fn check(&self, _addr: Ipv4Addr, _timeout: Duration) -> bool {
            false
        }
    }

    fn test_sweeper(table: PortTable) -> Result<Sweeper> {
        Sweeper::new(
            table,
            Duration::from_millis(250),
            32,
            Arc::new(NeverAlive),
            Arc::new(MemorySink::new()),
        )
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = test_sweeper(PortTable::empty());
        assert!(matches!(result, Err(LanSweepError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Sweeper::new(
            PortTable::well_known(),
            Duration::from_millis(0),
            32,
            Arc::new(NeverAlive),
            Arc::new(MemorySink::new()),
        );
        assert!(matches!(result, Err(LanSweepError::Validation(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = Sweeper::new(
            PortTable::well_known(),
            Duration::from_millis(250),
            0,
            Arc::new(NeverAlive),
            Arc::new(MemorySink::new()),
        );
        assert!(matches!(result, Err(LanSweepError::Validation(_))));
    }

    #[tokio::test]
    async fn test_probe_port_reachable_on_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let outcome = probe_port(Ipv4Addr::LOCALHOST, port, Duration::from_millis(500)).await;
        assert_eq!(outcome, ProbeOutcome::Reachable);
    }

    #[tokio::test]
    async fn test_probe_port_unreachable_on_closed_port() {
        // Bind and drop so the port is known-free.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let outcome = probe_port(Ipv4Addr::LOCALHOST, port, Duration::from_millis(500)).await;
        assert!(!outcome.is_reachable());
    }
}
