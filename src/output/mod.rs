//! Output formatting.
//!
//! Renders engine results for the console. The engine itself never prints;
//! everything user-facing funnels through here.

mod csv_format;
mod json_format;
mod plain;

pub use plain::{print_error, print_scan_header, print_warning};

use crate::banner::Banner;
use crate::cli::OutputFormat;
use crate::report::{BatchReport, ScanResult};
use std::io;

/// Print a batch report in the requested format.
pub fn print_batch(batch: &BatchReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_batch(batch),
        OutputFormat::Json => json_format::print_json(batch),
        OutputFormat::Csv => csv_format::print_batch(batch),
    }
}

/// Print a single-port classification in the requested format.
pub fn print_single(result: &ScanResult, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_single(result),
        OutputFormat::Json => json_format::print_json(result),
        OutputFormat::Csv => csv_format::print_single(result),
    }
}

/// Print a fetched banner.
pub fn print_banner(banner: &Banner, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_banner(banner),
        OutputFormat::Json | OutputFormat::Csv => json_format::print_json(banner),
    }
}

/// Print a web-server version string.
pub fn print_version(version: &str, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_version(version),
        OutputFormat::Json | OutputFormat::Csv => {
            json_format::print_json(&serde_json::json!({ "server": version }))
        }
    }
}
