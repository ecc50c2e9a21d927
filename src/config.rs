//! # Configuration Management
//!
//! This module handles command-line argument parsing and configuration for
//! sweep runs. Flags override environment variables, which override the
//! compiled-in defaults; every input is validated here, before a single
//! probe task is spawned.
//!
//! ## Example
//!
//! ```rust
//! use lansweep::config::Config;
//!
//! let config = Config::from_args(&[
//!     "lansweep".to_string(),
//!     "192.168.1".to_string(),
//!     "--timeout-ms".to_string(),
//!     "500".to_string(),
//!     "--json".to_string(),
//! ])?;
//!
//! assert_eq!(config.subnet.to_string(), "192.168.1");
//! assert_eq!(config.probe_timeout.as_millis(), 500);
//! assert!(config.json_mode);
//! # Ok::<(), lansweep::error::LanSweepError>(())
//! ```

use crate::constants;
use crate::error::{LanSweepError, Result};
use crate::logging::LogConfig;
use crate::target::{PortTable, Subnet};
use crate::validation;
use serde::Serialize;
use std::time::Duration;

/// Configuration for one sweep run
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Subnet to sweep (dotted three-octet prefix)
    pub subnet: Subnet,
    /// Timeout applied to every probe, host and port alike
    pub probe_timeout: Duration,
    /// Cap on simultaneously in-flight probes
    pub concurrency: usize,
    /// Output in JSON format instead of per-event lines
    pub json_mode: bool,
    /// Well-known port table, possibly extended by the caller
    pub ports: PortTable,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &[String]) -> Result<Self> {
        if args.len() < 2 {
            return Err(LanSweepError::config(
                "Subnet prefix argument required (e.g. 192.168.1)",
            ));
        }

        let subnet = Subnet::parse(&args[1])?;
        let json_mode = args.contains(&"--json".to_string());

        let timeout_ms = match Self::parse_u64_arg(args, "--timeout-ms")? {
            Some(ms) => ms,
            None => Self::env_u64("LANSWEEP_TIMEOUT_MS")?
                .unwrap_or(constants::DEFAULT_PROBE_TIMEOUT_MS),
        };
        let timeout_ms = validation::validate_timeout_ms(timeout_ms)?;

        let concurrency = match Self::parse_u64_arg(args, "--concurrency")? {
            Some(n) => n as usize,
            None => Self::env_u64("LANSWEEP_CONCURRENCY")?
                .map(|n| n as usize)
                .unwrap_or(constants::concurrency::DEFAULT_MAX_PROBES),
        };
        let concurrency = if concurrency == 0 {
            Self::auto_concurrency()
        } else {
            validation::validate_concurrency(concurrency)?
        };

        let mut ports = PortTable::well_known();
        if let Ok(specs) = std::env::var("LANSWEEP_EXTRA_PORTS") {
            Self::apply_port_specs(&mut ports, &specs)?;
        }
        if let Some(specs) = Self::parse_string_arg(args, "--extra-ports")? {
            Self::apply_port_specs(&mut ports, &specs)?;
        }

        let logging = LogConfig::from_env()?;
        logging.validate()?;

        Ok(Config {
            subnet,
            probe_timeout: Duration::from_millis(timeout_ms),
            concurrency,
            json_mode,
            ports,
            logging,
        })
    }

    /// Concurrency used for `--concurrency 0`: sized from the CPU count,
    /// clamped to the configured maximum
    fn auto_concurrency() -> usize {
        (num_cpus::get() * constants::concurrency::AUTO_PER_CPU)
            .clamp(1, constants::concurrency::MAX_PROBES_LIMIT)
    }

    /// Parse a `--flag VALUE` numeric argument
    fn parse_u64_arg(args: &[String], flag: &str) -> Result<Option<u64>> {
        for (i, arg) in args.iter().enumerate() {
            if arg == flag {
                if i + 1 >= args.len() {
                    return Err(LanSweepError::config(format!(
                        "Missing value for {}",
                        flag
                    )));
                }

                let value = args[i + 1].parse::<u64>().map_err(|_| {
                    LanSweepError::config(format!(
                        "Invalid value for {}: {}",
                        flag,
                        args[i + 1]
                    ))
                })?;

                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Parse a `--flag VALUE` string argument
    fn parse_string_arg(args: &[String], flag: &str) -> Result<Option<String>> {
        for (i, arg) in args.iter().enumerate() {
            if arg == flag {
                if i + 1 >= args.len() {
                    return Err(LanSweepError::config(format!(
                        "Missing value for {}",
                        flag
                    )));
                }
                return Ok(Some(args[i + 1].clone()));
            }
        }
        Ok(None)
    }

    /// Read an optional numeric environment variable
    fn env_u64(name: &str) -> Result<Option<u64>> {
        match std::env::var(name) {
            Ok(value) => {
                let parsed = value
                    .parse::<u64>()
                    .map_err(|_| LanSweepError::config(format!("Invalid {} value", name)))?;
                Ok(Some(parsed))
            }
            Err(_) => Ok(None),
        }
    }

    /// Apply a comma-separated list of `PORT=LABEL` specs to the table
    ///
    /// Extensions add new ports; a spec naming an existing port overrides
    /// its label.
    fn apply_port_specs(ports: &mut PortTable, specs: &str) -> Result<()> {
        for spec in specs.split(',') {
            let spec = spec.trim();
            if spec.is_empty() {
                return Err(LanSweepError::validation(
                    "Empty entry in port spec list",
                ));
            }
            let (port, label) = validation::validate_port_spec(spec)?;
            ports.set(port, label);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&args(&["lansweep", "192.168.1"])).unwrap();
        assert_eq!(config.subnet.to_string(), "192.168.1");
        assert_eq!(
            config.probe_timeout.as_millis() as u64,
            constants::DEFAULT_PROBE_TIMEOUT_MS
        );
        assert!(!config.json_mode);
        assert_eq!(config.ports.len(), 14);
    }

    #[test]
    fn test_flag_parsing() {
        let config = Config::from_args(&args(&[
            "lansweep",
            "10.0.0",
            "--timeout-ms",
            "250",
            "--concurrency",
            "64",
            "--json",
        ]))
        .unwrap();

        assert_eq!(config.probe_timeout.as_millis(), 250);
        assert_eq!(config.concurrency, 64);
        assert!(config.json_mode);
    }

    #[test]
    fn test_missing_subnet_rejected() {
        assert!(Config::from_args(&args(&["lansweep"])).is_err());
    }

    #[test]
    fn test_invalid_subnet_rejected() {
        assert!(Config::from_args(&args(&["lansweep", "192.168.1.0"])).is_err());
        assert!(Config::from_args(&args(&["lansweep", "300.1.1"])).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Config::from_args(&args(&["lansweep", "192.168.1", "--timeout-ms", "0"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_flag_value_rejected() {
        let result = Config::from_args(&args(&["lansweep", "192.168.1", "--timeout-ms"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_ports_extend_and_override() {
        let config = Config::from_args(&args(&[
            "lansweep",
            "192.168.1",
            "--extra-ports",
            "8080=HTTP Proxy,22=OpenSSH",
        ]))
        .unwrap();

        assert_eq!(config.ports.label(8080), Some("HTTP Proxy"));
        assert_eq!(config.ports.label(22), Some("OpenSSH"));
        assert_eq!(config.ports.len(), 15);
    }

    #[test]
    fn test_malformed_extra_ports_rejected() {
        let result = Config::from_args(&args(&[
            "lansweep",
            "192.168.1",
            "--extra-ports",
            "8080",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_auto_concurrency_in_bounds() {
        let auto = Config::auto_concurrency();
        assert!(auto >= 1);
        assert!(auto <= constants::concurrency::MAX_PROBES_LIMIT);
    }
}
