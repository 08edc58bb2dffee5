//! Derived per-record metrics for campaign line items.

use serde::Serialize;

use crate::record::CampaignRecord;

/// Divides `numerator` by `denominator`, yielding `0.0` when the denominator
/// is zero.
///
/// Campaigns with no clicks or no impressions are common in fresh batches;
/// their ratios must flow through filtering and display as plain zeroes, not
/// as `NaN` or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Metrics computed from a campaign's raw numeric fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CampaignMetrics {
    /// Cost per click, excluding GST. Zero when the campaign has no clicks.
    pub cpc: f64,
    /// Click-through rate as a percentage. Zero when the campaign has no
    /// impressions.
    pub ctr: f64,
}

impl CampaignMetrics {
    /// Computes the derived metrics for one campaign record.
    pub fn for_campaign(record: &CampaignRecord) -> Self {
        let clicks = record.clicks() as f64;
        let impressions = record.impressions() as f64;

        Self {
            cpc: ratio(record.cost_without_gst, clicks),
            ctr: ratio(clicks * 100.0, impressions),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::CampaignRecord;

    use super::{CampaignMetrics, ratio};

    #[test]
    fn ratio_with_zero_denominator_is_zero() {
        assert_eq!(ratio(500.0, 0.0), 0.0);
    }

    #[test]
    fn cpc_is_zero_when_campaign_has_no_clicks() {
        let record = CampaignRecord {
            name: "Brand".to_owned(),
            cost_without_gst: 500.0,
            clicks: Some(0),
            ..Default::default()
        };

        let metrics = CampaignMetrics::for_campaign(&record);

        assert_eq!(metrics.cpc, 0.0);
    }

    #[test]
    fn computes_cpc_and_ctr_from_raw_fields() {
        let record = CampaignRecord {
            name: "Brand".to_owned(),
            cost_without_gst: 500.0,
            clicks: Some(25),
            impressions: Some(1000),
            ..Default::default()
        };

        let metrics = CampaignMetrics::for_campaign(&record);

        assert_eq!(metrics.cpc, 20.0);
        assert_eq!(metrics.ctr, 2.5);
    }

    #[test]
    fn unreported_counts_behave_like_zero() {
        let record = CampaignRecord {
            name: "Brand".to_owned(),
            cost_without_gst: 500.0,
            ..Default::default()
        };

        let metrics = CampaignMetrics::for_campaign(&record);

        assert_eq!(metrics.cpc, 0.0);
        assert_eq!(metrics.ctr, 0.0);
    }
}
