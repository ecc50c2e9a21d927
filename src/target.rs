//! # Target Enumeration
//!
//! This module defines the two value types a sweep operates on: the
//! [`Subnet`] whose host addresses get probed for liveness, and the
//! [`PortTable`] of well-known ports probed on every live host.
//!
//! Both are immutable once constructed and are passed by shared reference
//! into every sweep call; neither holds any ambient global state.
//!
//! ## Example
//!
//! ```rust
//! use lansweep::target::{PortTable, Subnet};
//!
//! let subnet = Subnet::parse("192.168.1")?;
//! assert_eq!(subnet.host_count(), 254);
//!
//! let table = PortTable::well_known();
//! assert_eq!(table.label(22), Some("SSH"));
//! # Ok::<(), lansweep::error::LanSweepError>(())
//! ```

use crate::constants;
use crate::error::{LanSweepError, Result};
use crate::validation;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// A /24 subnet described by its dotted three-octet prefix
///
/// The sweep enumerates host octets 1 through 254 inclusive; .0 (network)
/// and .255 (broadcast) are never probed. A `Subnet` only exists for the
/// duration of one sweep invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subnet {
    prefix: [u8; 3],
}

impl Subnet {
    /// Parse and validate a dotted three-octet prefix such as `"192.168.1"`
    pub fn parse(prefix: &str) -> Result<Self> {
        let prefix = validation::validate_subnet_prefix(prefix)?;
        Ok(Self { prefix })
    }

    /// The address for one host octet within this subnet
    pub fn host(&self, octet: u8) -> Ipv4Addr {
        Ipv4Addr::new(self.prefix[0], self.prefix[1], self.prefix[2], octet)
    }

    /// Iterate every probed host address, octets 1..=254
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        (constants::subnet::FIRST_HOST..=constants::subnet::LAST_HOST).map(|i| self.host(i))
    }

    /// Number of host addresses a sweep of this subnet probes
    pub fn host_count(&self) -> usize {
        (constants::subnet::LAST_HOST - constants::subnet::FIRST_HOST) as usize + 1
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.prefix[0], self.prefix[1], self.prefix[2])
    }
}

/// The immutable well-known port table probed on every live host
///
/// Keys are unique; iteration order is ascending by port number, which keeps
/// summaries stable, but sweeps make no ordering promise for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortTable {
    entries: BTreeMap<u16, String>,
}

impl PortTable {
    /// The compiled-in table of well-known ports
    pub fn well_known() -> Self {
        let entries = constants::WELL_KNOWN_PORTS
            .iter()
            .map(|(port, label)| (*port, (*label).to_string()))
            .collect();
        Self { entries }
    }

    /// An empty table; useful as a base for fully caller-defined sets
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from explicit `(port, label)` pairs
    ///
    /// Rejects port 0 and duplicate port numbers.
    pub fn from_entries<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        let mut table = Self::empty();
        for (port, label) in pairs {
            table.insert(port, label.into())?;
        }
        Ok(table)
    }

    /// Add one entry, replacing any existing label for the same port
    pub fn set(&mut self, port: u16, label: impl Into<String>) {
        self.entries.insert(port, label.into());
    }

    fn insert(&mut self, port: u16, label: String) -> Result<()> {
        if port == 0 {
            return Err(LanSweepError::validation("Port cannot be 0"));
        }
        if self.entries.contains_key(&port) {
            return Err(LanSweepError::validation(format!(
                "Duplicate port in table: {}",
                port
            )));
        }
        self.entries.insert(port, label);
        Ok(())
    }

    /// Service label for a port, if the table contains it
    pub fn label(&self, port: u16) -> Option<&str> {
        self.entries.get(&port).map(String::as_str)
    }

    /// Iterate `(port, label)` pairs in ascending port order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.entries.iter().map(|(p, l)| (*p, l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_parse_and_display() {
        let subnet = Subnet::parse("192.168.1").unwrap();
        assert_eq!(subnet.to_string(), "192.168.1");
        assert!(Subnet::parse("192.168.1.5").is_err());
    }

    #[test]
    fn test_subnet_host_enumeration() {
        let subnet = Subnet::parse("10.0.0").unwrap();
        let hosts: Vec<Ipv4Addr> = subnet.hosts().collect();

        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(hosts[253], Ipv4Addr::new(10, 0, 0, 254));
        assert!(!hosts.contains(&Ipv4Addr::new(10, 0, 0, 0)));
        assert!(!hosts.contains(&Ipv4Addr::new(10, 0, 0, 255)));
    }

    #[test]
    fn test_well_known_table() {
        let table = PortTable::well_known();
        assert_eq!(table.len(), 14);
        assert_eq!(table.label(22), Some("SSH"));
        assert_eq!(table.label(443), Some("HTTPS"));
        assert_eq!(table.label(4444), None);
    }

    #[test]
    fn test_table_extension_and_override() {
        let mut table = PortTable::well_known();
        table.set(8080, "HTTP Proxy");
        table.set(22, "OpenSSH");

        assert_eq!(table.label(8080), Some("HTTP Proxy"));
        assert_eq!(table.label(22), Some("OpenSSH"));
        assert_eq!(table.len(), 15);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = PortTable::from_entries([(80, "HTTP"), (80, "HTTP again")]);
        assert!(result.is_err());

        let result = PortTable::from_entries([(0, "Zero")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_iteration_order() {
        let table = PortTable::from_entries([(443, "HTTPS"), (22, "SSH"), (80, "HTTP")]).unwrap();
        let ports: Vec<u16> = table.iter().map(|(p, _)| p).collect();
        assert_eq!(ports, vec![22, 80, 443]);
    }
}
