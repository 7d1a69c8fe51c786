//! Plain text output formatting.
//!
//! Human-readable rendering with console styling.

use crate::banner::Banner;
use crate::report::{BatchReport, HostEntry, ScanReport, ScanResult};
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "───────────────────────────────────────────────";

/// Print a scan header before probing begins.
pub fn print_scan_header(targets: &[String], ports: usize, timeout_secs: f64) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portprobe").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    let target_list = targets.join(", ");
    println!(
        "{} Targets: {}",
        style("•").dim(),
        style(target_list).white().bold()
    );
    println!(
        "{} Probing {} port(s), {:.1}s connect timeout",
        style("•").dim(),
        style(ports).white().bold(),
        timeout_secs
    );
    println!();
}

/// Print every host section of a batch report.
pub fn print_batch(batch: &BatchReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for entry in &batch.hosts {
        match entry {
            HostEntry::Scanned(report) => print_report(&mut out, report)?,
            HostEntry::Unresolved { identifier, reason } => {
                writeln!(
                    out,
                    "{} {} skipped: {}",
                    style("✗").red().bold(),
                    style(identifier).bold(),
                    reason
                )?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

fn print_report(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    writeln!(
        out,
        "{} {}: {} open, {} closed, {} filtered ({} ports in {:.2}s)",
        style("▸").cyan(),
        style(report.target.to_string()).bold(),
        style(report.counts.open).green().bold(),
        style(report.counts.closed).red(),
        style(report.counts.filtered).yellow(),
        report.ports_scanned,
        report.duration_ms as f64 / 1000.0
    )?;

    if !report.complete {
        writeln!(
            out,
            "  {} scan interrupted, partial results",
            style("!").yellow().bold()
        )?;
    }

    if report.open.is_empty() {
        writeln!(out, "  {}", style("no open ports").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:>7}  {:^10}  {}",
        style("PORT").bold(),
        style("STATE").bold(),
        style("SERVICE").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for result in &report.open {
        writeln!(
            out,
            "  {:>7}  {:^10}  {}",
            format!("{}/tcp", result.port),
            Style::new().green().bold().apply_to("open"),
            result.outcome.service().unwrap_or_default()
        )?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out)?;
    Ok(())
}

/// Print the classification line for a single-port probe.
pub fn print_single(result: &ScanResult) -> io::Result<()> {
    let state_style = if result.outcome.is_open() {
        Style::new().green().bold()
    } else {
        Style::new().red()
    };
    println!(
        "{}  port {} is {}{}",
        style(result.target.to_string()).bold(),
        result.port,
        state_style.apply_to(result.outcome.to_string()),
        result
            .outcome
            .service()
            .map(|service| format!(" ({service})"))
            .unwrap_or_default()
    );
    Ok(())
}

/// Print a fetched banner, lossily decoded.
pub fn print_banner(banner: &Banner) -> io::Result<()> {
    println!("{}", style("Server banner:").bold());
    println!("{}", banner.to_text().trim_end());
    if banner.truncated() {
        println!("{}", style("(truncated)").dim());
    }
    Ok(())
}

/// Print a web-server version string.
pub fn print_version(version: &str) -> io::Result<()> {
    println!("{} {}", style("Server version:").bold(), version);
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
