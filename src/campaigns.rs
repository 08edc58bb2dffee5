//! The campaigns engine: derived-metric attachment, query shape, quick
//! filters, and view assembly.
//!
//! Structurally the same pipeline as the expenses engine, parameterized by
//! the campaign record shape: metrics are attached once per pass, then the
//! filter chain (which may predicate on those metrics) runs before sorting,
//! paging, and aggregation.

use std::str::FromStr;

use crate::{
    Error,
    aggregate::{max_of, sum_by_keys, sum_of},
    filter::{matches_category, matches_search},
    metrics::{CampaignMetrics, ratio},
    paginate::{DEFAULT_PAGE_SIZE, PageInfo, paginate},
    record::CampaignRecord,
    series::Series,
    sort::{SortState, compare_numbers, compare_text},
};

/// How many campaigns the top-campaign ranking keeps.
pub const TOP_CAMPAIGNS: usize = 8;

/// Minimum click-through rate (percent) for a high-performing campaign.
pub const HIGH_PERFORMING_MIN_CTR: f64 = 2.0;

/// Maximum cost per click for a high-performing campaign.
pub const HIGH_PERFORMING_MAX_CPC: f64 = 50.0;

/// Minimum GST-exclusive cost for a high-spend campaign.
pub const HIGH_SPEND_MIN_COST: f64 = 10_000.0;

/// A campaign record with its derived metrics attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRow {
    /// The raw record as ingested.
    pub record: CampaignRecord,
    /// Metrics derived from the record's numeric fields.
    pub metrics: CampaignMetrics,
}

/// Attaches derived metrics to every record in a batch, preserving order.
pub fn with_metrics(records: &[CampaignRecord]) -> Vec<CampaignRow> {
    records
        .iter()
        .map(|record| CampaignRow {
            record: record.clone(),
            metrics: CampaignMetrics::for_campaign(record),
        })
        .collect()
}

/// A named predicate over derived campaign metrics.
///
/// Thresholds are fixed, named constants; they are not user-editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuickFilter {
    /// No metric filtering.
    #[default]
    All,
    /// CTR above [HIGH_PERFORMING_MIN_CTR] and CPC below
    /// [HIGH_PERFORMING_MAX_CPC].
    HighPerforming,
    /// GST-exclusive cost above [HIGH_SPEND_MIN_COST].
    HighSpend,
}

impl QuickFilter {
    /// Whether a metric-attached campaign passes this predicate.
    pub fn matches(self, row: &CampaignRow) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::HighPerforming => {
                row.metrics.ctr > HIGH_PERFORMING_MIN_CTR
                    && row.metrics.cpc < HIGH_PERFORMING_MAX_CPC
            }
            QuickFilter::HighSpend => row.record.cost_without_gst > HIGH_SPEND_MIN_COST,
        }
    }
}

impl FromStr for QuickFilter {
    type Err = Error;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword.to_lowercase().as_str() {
            "all" => Ok(QuickFilter::All),
            "highperforming" | "high-performing" => Ok(QuickFilter::HighPerforming),
            "highspend" | "high-spend" => Ok(QuickFilter::HighSpend),
            _ => Err(Error::UnknownQuickFilter(keyword.to_owned())),
        }
    }
}

/// The sortable columns of the campaigns table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CampaignSortKey {
    /// Sort by campaign name, case-insensitively.
    Name,
    /// Sort by location, case-insensitively.
    Location,
    /// Sort by GST-exclusive cost.
    #[default]
    CostWithoutGst,
    /// Sort by GST-inclusive cost.
    CostWithGst,
    /// Sort by click count.
    Clicks,
    /// Sort by impression count.
    Impressions,
    /// Sort by derived cost per click.
    Cpc,
    /// Sort by derived click-through rate.
    Ctr,
}

impl FromStr for CampaignSortKey {
    type Err = Error;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword.to_lowercase().as_str() {
            "name" => Ok(CampaignSortKey::Name),
            "location" => Ok(CampaignSortKey::Location),
            "cost" | "cost-without-gst" => Ok(CampaignSortKey::CostWithoutGst),
            "cost-with-gst" => Ok(CampaignSortKey::CostWithGst),
            "clicks" => Ok(CampaignSortKey::Clicks),
            "impressions" => Ok(CampaignSortKey::Impressions),
            "cpc" => Ok(CampaignSortKey::Cpc),
            "ctr" => Ok(CampaignSortKey::Ctr),
            _ => Err(Error::UnknownSortKey(keyword.to_owned())),
        }
    }
}

/// One snapshot of the user-controlled filter, sort, and page state for the
/// campaigns table.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignQuery {
    /// Substring search over campaign name and location.
    pub search: String,
    /// Selected location, or `None` for all.
    pub location: Option<String>,
    /// The selected metric quick filter.
    pub quick: QuickFilter,
    /// The selected sort column and direction.
    pub sort: SortState<CampaignSortKey>,
    /// The 1-indexed page to show.
    pub page: u64,
    /// How many records per page.
    pub page_size: u64,
}

impl Default for CampaignQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: None,
            quick: QuickFilter::All,
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Global scalar statistics over the filtered campaign set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignTotals {
    /// Sum of GST-exclusive costs.
    pub cost_without_gst: f64,
    /// Sum of GST-inclusive costs.
    pub cost_with_gst: f64,
    /// Sum of clicks.
    pub clicks: u64,
    /// Sum of impressions.
    pub impressions: u64,
    /// Overall cost per click across the filtered set, zero when there are
    /// no clicks.
    pub average_cpc: f64,
    /// Overall click-through rate (percent) across the filtered set, zero
    /// when there are no impressions.
    pub average_ctr: f64,
    /// The single largest GST-exclusive cost, or zero when nothing matched.
    pub largest_cost: f64,
    /// How many campaigns survived the filter chain.
    pub count: u64,
}

/// Everything the campaigns dashboard renders for one query snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignsView {
    /// The filtered, sorted campaigns with metrics attached, e.g. for export.
    pub filtered: Vec<CampaignRow>,
    /// The campaigns on the requested page.
    pub page: Vec<CampaignRow>,
    /// Page metadata for the pager row.
    pub page_info: PageInfo,
    /// Scalar statistics over the filtered set.
    pub totals: CampaignTotals,
    /// Filtered GST-exclusive cost summed per location.
    pub cost_by_location: Series,
    /// The [TOP_CAMPAIGNS] campaigns by GST-exclusive cost.
    pub top_campaigns: Series,
}

/// Applies the query's filter chain to metric-attached campaigns, preserving
/// input order.
pub fn filter_campaigns(rows: &[CampaignRow], query: &CampaignQuery) -> Vec<CampaignRow> {
    rows.iter()
        .filter(|row| {
            matches_search(
                &query.search,
                &[row.record.name.as_str(), row.record.location.as_str()],
            ) && matches_category(query.location.as_deref(), &row.record.location)
                && query.quick.matches(row)
        })
        .cloned()
        .collect()
}

/// Stable-sorts campaigns in place by the selected column and direction.
pub fn sort_campaigns(rows: &mut [CampaignRow], sort: SortState<CampaignSortKey>) {
    match sort.key {
        CampaignSortKey::Name => {
            rows.sort_by(|a, b| compare_text(sort.direction, &a.record.name, &b.record.name))
        }
        CampaignSortKey::Location => rows
            .sort_by(|a, b| compare_text(sort.direction, &a.record.location, &b.record.location)),
        CampaignSortKey::CostWithoutGst => rows.sort_by(|a, b| {
            compare_numbers(
                sort.direction,
                a.record.cost_without_gst,
                b.record.cost_without_gst,
            )
        }),
        CampaignSortKey::CostWithGst => rows.sort_by(|a, b| {
            compare_numbers(sort.direction, a.record.cost_with_gst, b.record.cost_with_gst)
        }),
        CampaignSortKey::Clicks => rows.sort_by(|a, b| {
            compare_numbers(
                sort.direction,
                a.record.clicks() as f64,
                b.record.clicks() as f64,
            )
        }),
        CampaignSortKey::Impressions => rows.sort_by(|a, b| {
            compare_numbers(
                sort.direction,
                a.record.impressions() as f64,
                b.record.impressions() as f64,
            )
        }),
        CampaignSortKey::Cpc => {
            rows.sort_by(|a, b| compare_numbers(sort.direction, a.metrics.cpc, b.metrics.cpc))
        }
        CampaignSortKey::Ctr => {
            rows.sort_by(|a, b| compare_numbers(sort.direction, a.metrics.ctr, b.metrics.ctr))
        }
    }
}

/// Runs the full campaigns pipeline for one query snapshot.
pub fn build_campaigns_view(records: &[CampaignRecord], query: &CampaignQuery) -> CampaignsView {
    let rows = with_metrics(records);
    let mut filtered = filter_campaigns(&rows, query);
    sort_campaigns(&mut filtered, query.sort);
    tracing::debug!(
        "campaigns query matched {} of {} records",
        filtered.len(),
        records.len()
    );

    let (page, page_info) = paginate(&filtered, query.page_size, query.page);

    let clicks = sum_of(&filtered, |row| row.record.clicks() as f64);
    let impressions = sum_of(&filtered, |row| row.record.impressions() as f64);
    let cost_without_gst = sum_of(&filtered, |row| row.record.cost_without_gst);
    let totals = CampaignTotals {
        cost_without_gst,
        cost_with_gst: sum_of(&filtered, |row| row.record.cost_with_gst),
        clicks: clicks as u64,
        impressions: impressions as u64,
        average_cpc: ratio(cost_without_gst, clicks),
        average_ctr: ratio(clicks * 100.0, impressions),
        largest_cost: max_of(&filtered, |row| row.record.cost_without_gst),
        count: filtered.len() as u64,
    };

    let cost_by_location = Series::from_buckets(&sum_by_keys(
        &filtered,
        |row| {
            if row.record.location.is_empty() {
                Vec::new()
            } else {
                vec![row.record.location.clone()]
            }
        },
        |row| row.record.cost_without_gst,
    ));
    let top_campaigns = Series::from_buckets(&sum_by_keys(
        &filtered,
        |row| {
            if row.record.name.is_empty() {
                Vec::new()
            } else {
                vec![row.record.name.clone()]
            }
        },
        |row| row.record.cost_without_gst,
    ))
    .top_n(TOP_CAMPAIGNS);

    CampaignsView {
        filtered,
        page,
        page_info,
        totals,
        cost_by_location,
        top_campaigns,
    }
}
