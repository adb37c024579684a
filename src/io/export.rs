//! CSV export for turbine power curves.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::assets::TurbineRecord;

/// Column header for curve export.
const HEADER: [&str; 2] = ["velocity_ms", "power_mw"];

/// Exports a turbine power curve to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_curve_csv(record: &TurbineRecord, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_curve_csv(record, buf)
}

/// Writes a turbine power curve as CSV to any writer.
///
/// One row per curve point; produces deterministic output for identical
/// input.
pub fn write_curve_csv(record: &TurbineRecord, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;
    for (v, p) in record.velocities.iter().zip(&record.power) {
        wtr.write_record(&[format!("{v:.4}"), format!("{p:.6}")])?;
    }
    wtr.flush()?;
    Ok(())
}
