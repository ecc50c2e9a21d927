//! # Input Validation Module
//!
//! This module provides input validation for lansweep, ensuring that user
//! inputs are checked before any probing starts. Every function here is
//! called from configuration parsing; a failure means no task is ever
//! spawned.
//!
//! ## Validation Functions
//!
//! - **Subnet Validation**: Validates dotted three-octet subnet prefixes
//! - **Timeout Validation**: Enforces minimum and maximum probe timeouts
//! - **Concurrency Validation**: Bounds the in-flight probe cap
//! - **Port Spec Validation**: Validates `port=label` table extensions

use crate::constants;
use crate::error::{LanSweepError, Result};

/// Validates a subnet prefix (dotted three-octet form, e.g. `"192.168.1"`)
/// and returns its octets
pub fn validate_subnet_prefix(prefix: &str) -> Result<[u8; 3]> {
    if prefix.is_empty() {
        return Err(LanSweepError::validation("Subnet prefix cannot be empty"));
    }

    if prefix.len() > constants::validation::MAX_PREFIX_LENGTH {
        return Err(LanSweepError::validation("Subnet prefix too long"));
    }

    if prefix
        .chars()
        .any(|c| !c.is_ascii_digit() && c != '.')
    {
        return Err(LanSweepError::validation(format!(
            "Subnet prefix contains invalid characters: {}",
            prefix
        )));
    }

    let parts: Vec<&str> = prefix.split('.').collect();
    if parts.len() != constants::subnet::PREFIX_OCTETS {
        return Err(LanSweepError::validation(format!(
            "Subnet prefix must have exactly {} octets (e.g. 192.168.1), got: {}",
            constants::subnet::PREFIX_OCTETS,
            prefix
        )));
    }

    let mut octets = [0u8; 3];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(LanSweepError::validation(format!(
                "Empty octet in subnet prefix: {}",
                prefix
            )));
        }
        octets[i] = part.parse::<u8>().map_err(|_| {
            LanSweepError::validation(format!("Invalid octet '{}' in subnet prefix", part))
        })?;
    }

    Ok(octets)
}

/// Validates a probe timeout in milliseconds
pub fn validate_timeout_ms(timeout_ms: u64) -> Result<u64> {
    if timeout_ms < constants::validation::MIN_TIMEOUT_MS {
        return Err(LanSweepError::validation(format!(
            "Probe timeout must be at least {}ms",
            constants::validation::MIN_TIMEOUT_MS
        )));
    }

    if timeout_ms > constants::validation::MAX_TIMEOUT_MS {
        return Err(LanSweepError::validation(format!(
            "Probe timeout cannot exceed {}ms",
            constants::validation::MAX_TIMEOUT_MS
        )));
    }

    Ok(timeout_ms)
}

/// Validates the in-flight probe cap (0 means auto-detect, handled upstream)
pub fn validate_concurrency(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(LanSweepError::validation(
            "Concurrency limit must be greater than 0",
        ));
    }

    if limit > constants::concurrency::MAX_PROBES_LIMIT {
        return Err(LanSweepError::validation(format!(
            "Concurrency limit cannot exceed {}",
            constants::concurrency::MAX_PROBES_LIMIT
        )));
    }

    Ok(limit)
}

/// Validates a single `port=label` table extension and returns the pair
pub fn validate_port_spec(spec: &str) -> Result<(u16, String)> {
    let (port_str, label) = spec.split_once('=').ok_or_else(|| {
        LanSweepError::validation(format!(
            "Invalid port spec '{}', expected PORT=LABEL",
            spec
        ))
    })?;

    let port = port_str
        .trim()
        .parse::<u16>()
        .map_err(|_| LanSweepError::validation(format!("Invalid port number: {}", port_str)))?;

    if port == 0 {
        return Err(LanSweepError::validation("Port cannot be 0"));
    }

    let label = label.trim();
    if label.is_empty() {
        return Err(LanSweepError::validation(format!(
            "Empty label in port spec: {}",
            spec
        )));
    }

    if label.len() > constants::validation::MAX_LABEL_LENGTH {
        return Err(LanSweepError::validation("Port label too long"));
    }

    Ok((port, label.to_string()))
}
