//! # Utility Functions
//!
//! Small helpers around the sweep: dependency preflight for the external
//! liveness tool and binary path detection in the system PATH.

use crate::error::{LanSweepError, Result};
use std::process::Command;

/// Check if required external tools are available
///
/// Verifies that the `ping` binary is installed and reachable through PATH
/// before any probing starts. Returns an error with install hints otherwise.
pub fn check_dependencies() -> Result<()> {
    let required_tools = [("ping", "Host liveness probing")];

    let mut missing = Vec::new();

    for (tool, description) in required_tools {
        if !check_binary_in_path(tool) {
            missing.push(format!("{} ({})", tool, description));
        }
    }

    if !missing.is_empty() {
        return Err(LanSweepError::external_tool(
            "dependency_check",
            format!(
                "Missing required tools:\n  {}\n\nInstall with:\n  sudo apt install iputils-ping  # Debian/Ubuntu\n  sudo pacman -S iputils  # Arch\n  (ping ships with macOS and Windows)",
                missing.join("\n  ")
            ),
        ));
    }

    Ok(())
}

/// Check if a binary exists in the system PATH
pub fn check_binary_in_path(bin: &str) -> bool {
    #[cfg(target_os = "windows")]
    let locator = "where";
    #[cfg(not(target_os = "windows"))]
    let locator = "which";

    match Command::new(locator).arg(bin).output() {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_binary_in_path() {
        // A shell is present on every platform this builds for.
        #[cfg(not(target_os = "windows"))]
        assert!(check_binary_in_path("sh"));

        assert!(!check_binary_in_path("definitely-not-a-real-binary-42"));
    }
}
