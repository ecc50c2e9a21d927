// lansweep - concurrent LAN host and well-known port sweeper

use colored::*;
use lansweep::config::Config;
use lansweep::error::{LanSweepError, Result};
use lansweep::events::{ConsoleSink, DiscoveryEvent, MemorySink};
use lansweep::external::ping::PingTool;
use lansweep::logging;
use lansweep::metrics::SweepSummary;
use lansweep::scanner::Sweeper;
use lansweep::shutdown::{self, ShutdownToken};
use lansweep::target::Subnet;
use lansweep::utils;
use serde::Serialize;
use std::env;
use std::process;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let config = match Config::from_args(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {}", "ERROR".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("{} {}", "ERROR".red().bold(), e);
        process::exit(1);
    }
}

/// Print usage information
fn print_usage() {
    eprintln!(
        "{}",
        "usage: lansweep <subnet-prefix> [--timeout-ms MS] [--concurrency N] [--extra-ports LIST] [--json]"
            .red()
            .bold()
    );
    eprintln!("Arguments:");
    eprintln!("  <subnet-prefix>     Dotted three-octet prefix, e.g. 192.168.1");
    eprintln!("Options:");
    eprintln!("  --timeout-ms MS     Per-probe timeout in milliseconds (default: 1000)");
    eprintln!("  --concurrency N     Max in-flight probes; 0 = auto (default: 128)");
    eprintln!("  --extra-ports LIST  Comma-separated PORT=LABEL entries added to the table");
    eprintln!("  --json              Output events and summary as JSON at the end");
    eprintln!("Examples:");
    eprintln!("  lansweep 192.168.1                           # Sweep 192.168.1.1-254");
    eprintln!("  lansweep 10.0.0 --timeout-ms 500             # Faster, less patient");
    eprintln!("  lansweep 192.168.1 --extra-ports \"8080=HTTP Proxy\"");
    eprintln!("  lansweep 192.168.1 --json                    # Machine-readable output");
}

/// Main application logic
async fn run(config: Config) -> Result<()> {
    utils::check_dependencies()?;

    let pinger = Arc::new(PingTool::new()?);
    let shutdown_token = ShutdownToken::new();
    shutdown::install_ctrl_c_handler(shutdown_token.clone());

    if !config.json_mode {
        print_sweep_start(&config);
    }

    if config.json_mode {
        let sink = Arc::new(MemorySink::new());
        let sweeper = Sweeper::new(
            config.ports.clone(),
            config.probe_timeout,
            config.concurrency,
            pinger,
            sink.clone(),
        )?
        .with_shutdown(shutdown_token);

        sweeper.sweep(&config.subnet).await;

        let summary = sweeper.metrics().summary();
        summary.log();
        output_json(&config.subnet, sink.events(), summary)?;
    } else {
        let sink = Arc::new(ConsoleSink::new());
        let sweeper = Sweeper::new(
            config.ports.clone(),
            config.probe_timeout,
            config.concurrency,
            pinger,
            sink,
        )?
        .with_shutdown(shutdown_token.clone());

        sweeper.sweep(&config.subnet).await;

        let summary = sweeper.metrics().summary();
        summary.log();
        print_sweep_summary(&summary, shutdown_token.is_cancelled());
    }

    Ok(())
}

/// Print sweep start message
fn print_sweep_start(config: &Config) {
    eprintln!(
        "{} Sweeping {}.1-254 ({} well-known ports per live host, {}ms timeout)",
        "SWEEP".bright_yellow(),
        config.subnet,
        config.ports.len(),
        config.probe_timeout.as_millis()
    );
}

/// Print the end-of-run summary in non-JSON mode
fn print_sweep_summary(summary: &SweepSummary, interrupted: bool) {
    if interrupted {
        eprintln!(
            "{} Sweep interrupted; results below are partial",
            "WARNING".yellow()
        );
    }

    eprintln!(
        "{} Probed {} hosts in {:.1}s: {} alive, {} open ports",
        "DONE".bright_green(),
        summary.hosts_probed,
        summary.elapsed_ms as f64 / 1000.0,
        summary.hosts_alive,
        summary.ports_open
    );
}

/// JSON output document for `--json` mode
#[derive(Serialize)]
struct JsonReport {
    subnet: Subnet,
    events: Vec<DiscoveryEvent>,
    summary: SweepSummary,
}

/// Serialize events and summary to stdout
fn output_json(subnet: &Subnet, events: Vec<DiscoveryEvent>, summary: SweepSummary) -> Result<()> {
    let report = JsonReport {
        subnet: subnet.clone(),
        events,
        summary,
    };

    let json_output = serde_json::to_string_pretty(&report)
        .map_err(|e| LanSweepError::parse(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_usage_doesnt_panic() {
        print_usage();
    }

    #[test]
    fn test_print_sweep_start() {
        let config = Config::from_args(&[
            "lansweep".to_string(),
            "192.168.1".to_string(),
        ])
        .unwrap();

        print_sweep_start(&config);
    }
}
