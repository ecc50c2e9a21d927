//! # Sweep Metrics
//!
//! Counters shared by every probe task of a sweep, plus the end-of-run
//! summary built from them. The counters are plain atomics; tasks record
//! with relaxed ordering and the summary is read once after the sweep's
//! join barrier has released.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Live counters for one sweep
#[derive(Debug)]
pub struct SweepMetrics {
    hosts_probed: AtomicUsize,
    hosts_alive: AtomicUsize,
    ports_probed: AtomicUsize,
    ports_open: AtomicUsize,
    started: Instant,
}

impl SweepMetrics {
    pub fn new() -> Self {
        Self {
            hosts_probed: AtomicUsize::new(0),
            hosts_alive: AtomicUsize::new(0),
            ports_probed: AtomicUsize::new(0),
            ports_open: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    pub fn record_host_probed(&self) {
        self.hosts_probed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_host_alive(&self) {
        self.hosts_alive.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_port_probed(&self) {
        self.ports_probed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_port_open(&self) {
        self.ports_open.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters into a summary
    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            hosts_probed: self.hosts_probed.load(Ordering::Relaxed),
            hosts_alive: self.hosts_alive.load(Ordering::Relaxed),
            ports_probed: self.ports_probed.load(Ordering::Relaxed),
            ports_open: self.ports_open.load(Ordering::Relaxed),
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

impl Default for SweepMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// End-of-run summary of one sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub hosts_probed: usize,
    pub hosts_alive: usize,
    pub ports_probed: usize,
    pub ports_open: usize,
    pub elapsed_ms: u64,
}

impl SweepSummary {
    /// Emit the summary through the tracing pipeline
    pub fn log(&self) {
        info!(
            hosts_probed = self.hosts_probed,
            hosts_alive = self.hosts_alive,
            ports_probed = self.ports_probed,
            ports_open = self.ports_open,
            elapsed_ms = self.elapsed_ms,
            "sweep complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = SweepMetrics::new();
        metrics.record_host_probed();
        metrics.record_host_probed();
        metrics.record_host_alive();
        metrics.record_port_probed();
        metrics.record_port_open();

        let summary = metrics.summary();
        assert_eq!(summary.hosts_probed, 2);
        assert_eq!(summary.hosts_alive, 1);
        assert_eq!(summary.ports_probed, 1);
        assert_eq!(summary.ports_open, 1);
    }

    #[test]
    fn test_summary_serializes() {
        let metrics = SweepMetrics::new();
        let json = serde_json::to_string(&metrics.summary()).unwrap();
        assert!(json.contains("\"hosts_probed\":0"));
    }
}
