//! CSV export of the filtered record sets.
//!
//! The export consumes the same `filtered` sets the view assembly produces,
//! with derived metrics already attached for campaigns. Column layout and
//! number formatting here are the export's own concern; the engine's display
//! surfaces format independently.

use std::io::Write;

use crate::{Error, campaigns::CampaignRow, record::ExpenseRecord};

/// Writes the filtered expense set as CSV, header row included.
///
/// The raw date string is exported as ingested; region tags are joined with
/// `"; "`.
///
/// # Errors
/// Returns [Error::CsvExport] when the underlying writer fails.
pub fn write_expenses_csv<W: Write>(writer: W, records: &[ExpenseRecord]) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "date", "amount", "paid_to", "reason", "user", "region"])?;
    for record in records {
        csv_writer.write_record([
            record.id.clone(),
            record.date.clone(),
            format!("{:.2}", record.amount),
            record.paid_to.clone(),
            record.reason.clone(),
            record.user_name().to_owned(),
            record.region.join("; "),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CsvExport(error.to_string()))?;
    tracing::debug!("exported {} expense records", records.len());
    Ok(())
}

/// Writes the filtered campaign set as CSV, derived metric columns included.
///
/// # Errors
/// Returns [Error::CsvExport] when the underlying writer fails.
pub fn write_campaigns_csv<W: Write>(writer: W, rows: &[CampaignRow]) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "name",
        "location",
        "cost_without_gst",
        "cost_with_gst",
        "clicks",
        "impressions",
        "cpc",
        "ctr",
    ])?;
    for row in rows {
        csv_writer.write_record([
            row.record.name.clone(),
            row.record.location.clone(),
            format!("{:.2}", row.record.cost_without_gst),
            format!("{:.2}", row.record.cost_with_gst),
            row.record.clicks().to_string(),
            row.record.impressions().to_string(),
            format!("{:.2}", row.metrics.cpc),
            format!("{:.2}", row.metrics.ctr),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CsvExport(error.to_string()))?;
    tracing::debug!("exported {} campaign records", rows.len());
    Ok(())
}
