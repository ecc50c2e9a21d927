//! # Configuration Constants
//!
//! This module contains the constants used throughout lansweep, including
//! default timeouts, the host-octet range of a /24 sweep, concurrency
//! limits, and the compiled-in well-known port table.

/// Default timeout for a single probe (host liveness or TCP connect)
/// in milliseconds
///
/// Used for both ping and TCP connect attempts. One second is plenty on a
/// healthy LAN; slower hosts read as dead.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1_000;

/// Host-octet range enumerated for a /24 subnet sweep
pub mod subnet {
    /// First host octet probed
    pub const FIRST_HOST: u8 = 1;
    /// Last host octet probed (255 is the broadcast address)
    pub const LAST_HOST: u8 = 254;
    /// Number of dotted octets expected in a subnet prefix
    pub const PREFIX_OCTETS: usize = 3;
}

/// In-flight probe limits
pub mod concurrency {
    /// Default cap on simultaneously in-flight probes
    pub const DEFAULT_MAX_PROBES: usize = 128;
    /// Upper bound accepted from configuration
    pub const MAX_PROBES_LIMIT: usize = 1_024;
    /// Multiplier applied to the CPU count when auto-sizing (`--concurrency 0`)
    pub const AUTO_PER_CPU: usize = 16;
}

/// Input validation limits
pub mod validation {
    /// Minimum accepted probe timeout in milliseconds
    pub const MIN_TIMEOUT_MS: u64 = 1;
    /// Maximum accepted probe timeout in milliseconds
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
    /// Maximum accepted length of a subnet prefix string
    pub const MAX_PREFIX_LENGTH: usize = 11; // "255.255.255"
    /// Maximum accepted length of a port label
    pub const MAX_LABEL_LENGTH: usize = 64;
}

/// The compiled-in well-known port table: `(port, service label)` pairs
///
/// This is the fixed probing target list for every port sweep unless the
/// caller extends or overrides it.
pub const WELL_KNOWN_PORTS: &[(u16, &str)] = &[
    (20, "FTP Data Transfer"),
    (21, "FTP Command Control"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (80, "HTTP"),
    (110, "POP3"),
    (143, "IMAP"),
    (443, "HTTPS"),
    (587, "SMTP (Email submission)"),
    (3306, "MySQL"),
    (3389, "RDP"),
    (5900, "VNC"),
];
