//! # Discovery Events
//!
//! This module defines [`DiscoveryEvent`], the unit of sweep output, and the
//! [`EventSink`] collaborator that consumes events. Many probe tasks emit
//! concurrently, so every sink implementation must serialize its writes;
//! both sinks here do so with a single mutex-guarded writer or buffer.
//!
//! Events are emitted the moment a probe succeeds, not batched at the end of
//! a sweep, so a console consumer sees results incrementally while the sweep
//! is still running.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::sync::Mutex;

/// The unit of sweep output: a live host, or an open port on a live host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscoveryEvent {
    HostAlive {
        addr: Ipv4Addr,
    },
    PortOpen {
        addr: Ipv4Addr,
        port: u16,
        label: String,
    },
}

impl DiscoveryEvent {
    pub fn host_alive(addr: Ipv4Addr) -> Self {
        Self::HostAlive { addr }
    }

    pub fn port_open(addr: Ipv4Addr, port: u16, label: impl Into<String>) -> Self {
        Self::PortOpen {
            addr,
            port,
            label: label.into(),
        }
    }

    /// The one-line textual form consumed by the console sink:
    /// `<address>` for a live host, `<address>:<port> (<label>)` for an
    /// open port.
    pub fn to_line(&self) -> String {
        match self {
            Self::HostAlive { addr } => addr.to_string(),
            Self::PortOpen { addr, port, label } => {
                format!("{}:{} ({})", addr, port, label)
            }
        }
    }
}

/// Serialized consumer of discovery events
///
/// Implementations are shared across every probe task of a sweep and must
/// tolerate concurrent `emit` calls.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DiscoveryEvent);
}

/// Prints each event as one line on stdout through a mutex-guarded writer
#[derive(Debug)]
pub struct ConsoleSink {
    out: Mutex<io::Stdout>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(io::stdout()),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: DiscoveryEvent) {
        let line = event.to_line();
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // One write per event keeps concurrent emissions line-atomic.
        if let Err(e) = writeln!(out, "{}", line) {
            eprintln!("{} failed to write event: {}", "WARNING".yellow(), e);
        }
    }
}

/// Records every event in memory; backs `--json` output and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiscoveryEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<DiscoveryEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: DiscoveryEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let alive = DiscoveryEvent::host_alive(Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(alive.to_line(), "10.0.0.5");

        let open = DiscoveryEvent::port_open(Ipv4Addr::new(10, 0, 0, 5), 22, "SSH");
        assert_eq!(open.to_line(), "10.0.0.5:22 (SSH)");
    }

    #[test]
    fn test_memory_sink_records_in_emission_order() {
        let sink = MemorySink::new();
        let addr = Ipv4Addr::new(192, 168, 1, 9);

        sink.emit(DiscoveryEvent::host_alive(addr));
        sink.emit(DiscoveryEvent::port_open(addr, 80, "HTTP"));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DiscoveryEvent::host_alive(addr));
    }

    #[test]
    fn test_event_serialization() {
        let event = DiscoveryEvent::port_open(Ipv4Addr::new(10, 0, 0, 9), 443, "HTTPS");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"port_open\""));
        assert!(json.contains("\"port\":443"));
    }
}
