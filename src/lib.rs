//! Spendlens is the tabular analytics engine behind an expense and ad-spend
//! dashboard.
//!
//! The engine is a pure transformation: given a batch of records, a query
//! snapshot (filters, sort, page) and a single captured "today", it produces a
//! filtered/sorted/paginated table view plus aggregate totals and chart-ready
//! series. Fetching records, owning the query state, and rendering the results
//! are left to collaborators; the `dashboard` binary in this crate is one such
//! collaborator for the terminal.

#![warn(missing_docs)]

pub mod aggregate;
pub mod campaigns;
pub mod dates;
pub mod export;
pub mod expenses;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod paginate;
pub mod record;
pub mod series;
pub mod sort;
pub mod tabs;
pub mod timezone;

pub use campaigns::{CampaignQuery, CampaignsView, build_campaigns_view};
pub use expenses::{ExpenseQuery, ExpensesView, build_expenses_view};

/// The errors that may occur at the boundaries of the engine.
///
/// The analytics pipeline itself is total: malformed fields, unparseable
/// dates, zero denominators and out-of-range pages all resolve to documented
/// defaults. Only the collaborator-facing surfaces (file ingestion, CSV
/// export, clock capture, keyword parsing) can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The record file could not be read from disk.
    ///
    /// Callers should pass in the file path and the original error as a
    /// string.
    #[error("could not read the record file \"{0}\": {1}")]
    RecordFile(String, String),

    /// The record batch was not valid JSON for the expected record shape.
    ///
    /// Missing or null optional fields are not an error; this only occurs
    /// when the batch as a whole cannot be deserialized.
    #[error("could not parse the record batch: {0}")]
    InvalidRecords(String),

    /// The CSV export could not be written.
    #[error("could not write the CSV export: {0}")]
    CsvExport(String),

    /// An error occurred while getting the local date from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A date window keyword did not match any named window.
    #[error("unknown date window \"{0}\"")]
    UnknownDateWindow(String),

    /// A sort key keyword did not match any sortable column.
    #[error("unknown sort key \"{0}\"")]
    UnknownSortKey(String),

    /// A quick filter keyword did not match any named quick filter.
    #[error("unknown quick filter \"{0}\"")]
    UnknownQuickFilter(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::InvalidRecords(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExport(value.to_string())
    }
}
