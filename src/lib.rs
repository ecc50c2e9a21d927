//! # lansweep - Concurrent LAN Host and Port Sweeper
//!
//! lansweep discovers live hosts on a local /24 subnet and identifies
//! commonly-used open TCP ports on each live host. Liveness is probed with
//! the system `ping` binary; ports with a single bounded-time TCP connect.
//! Results stream out as they arrive.
//!
//! ## Features
//!
//! - **Two-stage fan-out**: one concurrent task per candidate address, one
//!   nested task per well-known port on every live host
//! - **Bounded concurrency**: total in-flight probes capped by a semaphore
//! - **Streaming output**: discovery events are emitted the moment a probe
//!   succeeds, while the sweep is still running
//! - **Structured completion**: the sweep returns only after every spawned
//!   task, including nested port tasks, has finished
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lansweep::config::Config;
//! use lansweep::events::ConsoleSink;
//! use lansweep::external::ping::PingTool;
//! use lansweep::scanner::Sweeper;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_args(&[
//!         "lansweep".to_string(),
//!         "192.168.1".to_string(),
//!     ])?;
//!
//!     let sweeper = Sweeper::new(
//!         config.ports.clone(),
//!         config.probe_timeout,
//!         config.concurrency,
//!         Arc::new(PingTool::new()?),
//!         Arc::new(ConsoleSink::new()),
//!     )?;
//!     sweeper.sweep(&config.subnet).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`]: Command-line argument parsing and configuration
//! - [`scanner`]: The concurrent sweep engine and probe primitives
//! - [`target`]: Subnet enumeration and the well-known port table
//! - [`events`]: Discovery events and their serialized sinks
//! - [`external`]: External tool integration (the ping collaborator)
//! - [`shutdown`]: Cooperative cancellation
//! - [`metrics`]: Per-sweep counters and the end-of-run summary
//! - [`logging`]: Structured logging setup
//! - [`validation`]: Input validation
//! - [`error`]: Error handling with custom error types

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod external;
pub mod logging;
pub mod metrics;
pub mod scanner;
pub mod shutdown;
pub mod target;
pub mod utils;
pub mod validation;
