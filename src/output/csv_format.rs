//! CSV output formatting.

use crate::report::{BatchReport, HostEntry, ScanResult};
use std::io;

/// Print a batch report, one row per reported open port.
pub fn print_batch(batch: &BatchReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["host", "address", "port", "state", "service"])?;
    for entry in &batch.hosts {
        if let HostEntry::Scanned(report) = entry {
            for result in &report.open {
                write_result(&mut wtr, result)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Print a single classification row.
pub fn print_single(result: &ScanResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["host", "address", "port", "state", "service"])?;
    write_result(&mut wtr, result)?;

    wtr.flush()?;
    Ok(())
}

fn write_result<W: io::Write>(wtr: &mut csv::Writer<W>, result: &ScanResult) -> io::Result<()> {
    let address = result
        .target
        .addr()
        .map(|addr| addr.to_string())
        .unwrap_or_default();
    let port = result.port.to_string();
    let state = result.outcome.to_string();

    wtr.write_record([
        result.target.raw(),
        address.as_str(),
        port.as_str(),
        state.as_str(),
        result.outcome.service().unwrap_or_default(),
    ])?;
    Ok(())
}
