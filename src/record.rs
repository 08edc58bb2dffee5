//! Record shapes for the two dashboard datasets and tolerant JSON ingestion.
//!
//! Records arrive from an external fetch layer as loosely-structured JSON.
//! Every optional field deserializes to a neutral default (`0`, `""`, `None`,
//! empty list) so that no downstream stage ever has to handle a missing field
//! as an error.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, dates::parse_date};

/// A reference to the user who entered a record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserRef {
    /// The user's display name.
    #[serde(default)]
    pub name: String,
}

/// One expense entry as supplied by the record source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Identity of the record, unique within one fetch batch.
    #[serde(default)]
    pub id: String,
    /// The raw date string as entered; normalize with [ExpenseRecord::parsed_date].
    #[serde(default)]
    pub date: String,
    /// The amount spent. Never negative in well-formed batches.
    #[serde(default)]
    pub amount: f64,
    /// Who the expense was paid to.
    #[serde(default)]
    pub paid_to: String,
    /// Free-text reason for the expense. Some sources call this `category`.
    #[serde(default, alias = "category")]
    pub reason: String,
    /// The user who recorded the expense.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Zero or more region tags. Some sources call this `area` or `centre`.
    #[serde(default, alias = "area", alias = "centre")]
    pub region: Vec<String>,
}

impl ExpenseRecord {
    /// The name of the user who recorded the expense, or `""` when absent.
    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(|user| user.name.as_str()).unwrap_or("")
    }

    /// The record's date normalized to a calendar date, or `None` when the
    /// raw string is empty or unparseable.
    pub fn parsed_date(&self) -> Option<Date> {
        parse_date(&self.date)
    }
}

/// One ad-campaign line item as supplied by the record source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    /// Identity of the campaign, unique within one fetch batch.
    #[serde(default)]
    pub name: String,
    /// The location the campaign targets.
    #[serde(default)]
    pub location: String,
    /// Campaign cost excluding GST.
    #[serde(default, rename = "costWithoutGST")]
    pub cost_without_gst: f64,
    /// Campaign cost including GST.
    #[serde(default, rename = "costWithGST")]
    pub cost_with_gst: f64,
    /// Total ad clicks, when the source reports them.
    #[serde(default)]
    pub clicks: Option<u64>,
    /// Total ad impressions, when the source reports them.
    #[serde(default)]
    pub impressions: Option<u64>,
}

impl CampaignRecord {
    /// Total clicks, defaulting to zero when unreported.
    pub fn clicks(&self) -> u64 {
        self.clicks.unwrap_or(0)
    }

    /// Total impressions, defaulting to zero when unreported.
    pub fn impressions(&self) -> u64 {
        self.impressions.unwrap_or(0)
    }
}

/// Deserializes a batch of expense records from a JSON array.
///
/// # Errors
/// Returns [Error::InvalidRecords] when the batch is not a JSON array of
/// objects. Missing or null optional fields within a record are not an error.
pub fn expenses_from_json(bytes: &[u8]) -> Result<Vec<ExpenseRecord>, Error> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Deserializes a batch of campaign records from a JSON array.
///
/// # Errors
/// Returns [Error::InvalidRecords] when the batch is not a JSON array of
/// objects. Missing or null optional fields within a record are not an error.
pub fn campaigns_from_json(bytes: &[u8]) -> Result<Vec<CampaignRecord>, Error> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{campaigns_from_json, expenses_from_json};

    #[test]
    fn missing_optional_fields_resolve_to_defaults() {
        let json = br#"[{"id": "e1", "date": "2024-01-05", "amount": 100.0}]"#;

        let records = expenses_from_json(json).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].paid_to, "");
        assert_eq!(records[0].reason, "");
        assert_eq!(records[0].user_name(), "");
        assert!(records[0].region.is_empty());
    }

    #[test]
    fn accepts_category_and_area_spellings() {
        let json = br#"[{
            "id": "e1",
            "date": "2024-01-05",
            "amount": 50.0,
            "category": "Fuel",
            "area": ["North"]
        }]"#;

        let records = expenses_from_json(json).unwrap();

        assert_eq!(records[0].reason, "Fuel");
        assert_eq!(records[0].region, vec!["North".to_owned()]);
    }

    #[test]
    fn parses_nested_user_reference() {
        let json = br#"[{"id": "e1", "amount": 10.0, "user": {"name": "Asha"}}]"#;

        let records = expenses_from_json(json).unwrap();

        assert_eq!(records[0].user_name(), "Asha");
    }

    #[test]
    fn normalizes_record_date() {
        let json = br#"[{"id": "e1", "date": "2024-01-05", "amount": 10.0}]"#;

        let records = expenses_from_json(json).unwrap();

        assert_eq!(records[0].parsed_date(), Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn unparseable_record_date_is_none() {
        let json = br#"[{"id": "e1", "date": "not-a-date", "amount": 10.0}]"#;

        let records = expenses_from_json(json).unwrap();

        assert_eq!(records[0].parsed_date(), None);
    }

    #[test]
    fn campaign_counts_default_to_zero() {
        let json = br#"[{"name": "Brand", "location": "Delhi", "costWithoutGST": 500.0}]"#;

        let records = campaigns_from_json(json).unwrap();

        assert_eq!(records[0].clicks(), 0);
        assert_eq!(records[0].impressions(), 0);
        assert_eq!(records[0].cost_with_gst, 0.0);
    }

    #[test]
    fn campaign_gst_fields_use_source_capitalization() {
        let json = br#"[{
            "name": "Brand",
            "location": "Delhi",
            "costWithoutGST": 500.0,
            "costWithGST": 590.0,
            "clicks": 20,
            "impressions": 1000
        }]"#;

        let records = campaigns_from_json(json).unwrap();

        assert_eq!(records[0].cost_without_gst, 500.0);
        assert_eq!(records[0].cost_with_gst, 590.0);
        assert_eq!(records[0].clicks(), 20);
    }

    #[test]
    fn rejects_non_array_batch() {
        let got = expenses_from_json(br#"{"id": "e1"}"#);

        assert!(got.is_err());
    }

    #[test]
    fn empty_batch_is_valid() {
        let records = expenses_from_json(b"[]").unwrap();

        assert!(records.is_empty());
    }
}
