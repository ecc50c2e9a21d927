//! Host-liveness probing via the system `ping` binary.
//!
//! One echo request per check, bounded by the probe timeout. The sweep core
//! only sees the boolean outcome; "no device" and "device blocks probes"
//! both read as dead.

use crate::error::Result;
use crate::external::BaseTool;
use crate::scanner::LivenessProbe;
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Margin added on top of ping's own deadline before the process itself is
/// considered hung and killed.
const PROCESS_GRACE: Duration = Duration::from_millis(500);

/// Liveness prober backed by the system `ping` binary
pub struct PingTool {
    base_tool: BaseTool,
}

impl PingTool {
    /// Create a ping prober; fails if `ping` is not in PATH
    pub fn new() -> Result<Self> {
        let base_tool = BaseTool::new("ping")?;
        Ok(Self { base_tool })
    }

    /// Build the ping argument list for one echo request against `addr`
    ///
    /// Unix ping takes its deadline in whole seconds (`-W`), Windows in
    /// milliseconds (`-w`); sub-second timeouts round up to the smallest
    /// unit the platform accepts.
    fn build_ping_args(addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
        #[cfg(target_os = "windows")]
        {
            let timeout_ms = timeout.as_millis().max(1);
            vec![
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                timeout_ms.to_string(),
                addr.to_string(),
            ]
        }

        #[cfg(not(target_os = "windows"))]
        {
            let timeout_secs = timeout.as_secs_f64().ceil().max(1.0) as u64;
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                timeout_secs.to_string(),
                addr.to_string(),
            ]
        }
    }
}

#[async_trait]
impl LivenessProbe for PingTool {
    async fn check(&self, addr: Ipv4Addr, timeout: Duration) -> bool {
        let args = Self::build_ping_args(addr, timeout);
        let args_str: Vec<&str> = args.iter().map(String::as_str).collect();

        match self
            .base_tool
            .execute_command(&args_str, timeout + PROCESS_GRACE)
            .await
        {
            Ok(output) => output.status.success(),
            // Spawn failure, permission error, or a hung process all
            // collapse to dead.
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_ping_args_unix() {
        let args = PingTool::build_ping_args(Ipv4Addr::new(192, 168, 1, 7), Duration::from_secs(1));
        assert_eq!(args, vec!["-c", "1", "-W", "1", "192.168.1.7"]);
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_ping_args_round_subsecond_timeout_up() {
        let args =
            PingTool::build_ping_args(Ipv4Addr::new(10, 0, 0, 1), Duration::from_millis(250));
        assert_eq!(args[3], "1");
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn test_ping_args_windows() {
        let args = PingTool::build_ping_args(Ipv4Addr::new(192, 168, 1, 7), Duration::from_secs(1));
        assert_eq!(args, vec!["-n", "1", "-w", "1000", "192.168.1.7"]);
    }
}
