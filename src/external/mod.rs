//! # External Tool Integration
//!
//! This module provides the abstraction for executing external collaborator
//! binaries with proper timeout handling and error management. The sweep
//! core depends only on the boolean-with-timeout contract of its liveness
//! collaborator; this layer supplies the mechanism.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lansweep::external::{BaseTool, ExternalTool};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tool = BaseTool::new("echo")?;
//!     let output = tool.execute_with_timeout(&["hello"], Duration::from_secs(5)).await?;
//!
//!     println!("Output: {}", String::from_utf8_lossy(&output.stdout));
//!     Ok(())
//! }
//! ```

pub mod ping;

use crate::error::{LanSweepError, Result};
use async_trait::async_trait;
use std::process::Output;
use std::time::Duration;

/// Trait for external tool execution with timeout support
#[async_trait]
pub trait ExternalTool {
    /// Execute the tool with the given arguments, bounded by `timeout`
    async fn execute_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<Output>;
}

/// Base implementation for external tool execution
///
/// Locates the binary in PATH once at construction time; a missing tool is
/// surfaced before any probing starts rather than per probe.
pub struct BaseTool {
    pub name: &'static str,
    pub binary_path: String,
}

impl BaseTool {
    pub fn new(name: &'static str) -> Result<Self> {
        let binary_path = Self::find_binary(name)?;
        Ok(Self { name, binary_path })
    }

    fn find_binary(name: &str) -> Result<String> {
        use std::process::Command;

        #[cfg(target_os = "windows")]
        let locator = "where";
        #[cfg(not(target_os = "windows"))]
        let locator = "which";

        let output = Command::new(locator)
            .arg(name)
            .output()
            .map_err(|e| LanSweepError::external_tool(locator, e.to_string()))?;

        if !output.status.success() {
            return Err(LanSweepError::external_tool(
                name,
                "Tool not found in PATH".to_string(),
            ));
        }

        let path = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if path.is_empty() {
            return Err(LanSweepError::external_tool(
                name,
                "Tool path is empty".to_string(),
            ));
        }

        Ok(path)
    }

    pub async fn execute_command(&self, args: &[&str], timeout_duration: Duration) -> Result<Output> {
        use tokio::process::Command;
        use tokio::time::timeout as tokio_timeout;

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args);

        let output = tokio_timeout(timeout_duration, cmd.output())
            .await
            .map_err(|_| LanSweepError::timeout(timeout_duration.as_millis() as u64))?;

        let output = output.map_err(|e| LanSweepError::external_tool(self.name, e.to_string()))?;

        Ok(output)
    }
}

#[async_trait]
impl ExternalTool for BaseTool {
    async fn execute_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<Output> {
        self.execute_command(args, timeout).await
    }
}
