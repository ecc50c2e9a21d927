//! # Shutdown Module
//!
//! Cooperative cancellation for in-progress sweeps. A [`ShutdownToken`] is
//! threaded into the sweep engine; once cancelled, no new probes are issued
//! and the sweep drains within the bound of one probe timeout. Cancellation
//! never interrupts a probe that is already in flight.
//!
//! ## Example
//!
//! ```rust
//! use lansweep::shutdown::ShutdownToken;
//!
//! let token = ShutdownToken::new();
//! let worker_view = token.clone();
//!
//! assert!(!worker_view.is_cancelled());
//! token.cancel();
//! assert!(worker_view.is_cancelled());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared cancellation flag; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    cancelled: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Install a Ctrl-C handler that cancels `token`
///
/// The first interrupt stops new probes and lets the sweep drain; a second
/// interrupt exits the process immediately.
pub fn install_ctrl_c_handler(token: ShutdownToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("failed to install interrupt handler");
            return;
        }
        info!("interrupt received, finishing in-flight probes");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("second interrupt, exiting immediately");
            std::process::exit(130);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_uncancelled() {
        let token = ShutdownToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_visible_through_clones() {
        let token = ShutdownToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_cancelled());

        // Idempotent.
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
