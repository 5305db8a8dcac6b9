//! CSV export of the cumulative consumption table.

use std::io::{self, Write};

use crate::calc::ConsumptionResult;

/// Column header for the hour-table CSV.
const HEADER: &str = "hour,energy_kwh,cost";

/// Writes the cumulative hour table as CSV to any writer.
///
/// Writes a header row followed by one data row per hour, energy to 5
/// decimals and cost to 4, matching the page display. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &ConsumptionResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;
    for row in &result.rows {
        wtr.write_record(&[
            row.hour.to_string(),
            format!("{:.5}", row.energy_kwh),
            format!("{:.4}", row.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the hour table CSV into a `String` for an HTTP response body.
pub fn csv_string(result: &ConsumptionResult) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    if write_csv(result, &mut buf).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
