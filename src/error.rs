//! # Error Handling
//!
//! This module provides error handling for lansweep operations with custom
//! error types that cover the failure scenarios a sweep can hit before it
//! starts probing. It uses the `thiserror` crate for clean error definitions
//! and improved error messages.
//!
//! Note that negative probe results (timeout, connection refused, host
//! unreachable) are *not* errors anywhere in this crate; they are expected
//! steady-state outcomes and collapse to "not open" / "not alive". The
//! variants below exist for configuration problems, missing external tools,
//! and I/O failures around the sweep itself.
//!
//! ## Example
//!
//! ```rust
//! use lansweep::error::{LanSweepError, Result};
//!
//! fn validate_octet(octet: u16) -> Result<()> {
//!     if octet > 255 {
//!         return Err(LanSweepError::validation("Octet cannot exceed 255"));
//!     }
//!     Ok(())
//! }
//!
//! match validate_octet(300) {
//!     Ok(_) => println!("Octet is valid"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::io;

/// Custom error types for lansweep operations
///
/// This enum represents the error conditions that can occur while preparing
/// or running a sweep, providing specific error types for configuration
/// problems, external tool failures, and I/O issues.
#[derive(Debug, thiserror::Error)]
pub enum LanSweepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External tool error: {tool} failed with {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout error: operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

impl LanSweepError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new external tool error
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new parsing error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }
}

/// Result type alias for lansweep operations
pub type Result<T> = std::result::Result<T, LanSweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LanSweepError::config("bad subnet");
        assert_eq!(err.to_string(), "Configuration error: bad subnet");

        let err = LanSweepError::external_tool("ping", "not found in PATH");
        assert_eq!(
            err.to_string(),
            "External tool error: ping failed with not found in PATH"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: LanSweepError = io_err.into();
        assert!(matches!(err, LanSweepError::Io(_)));
    }
}
