//! The expenses engine: query shape, filter/sort wiring, and view assembly.
//!
//! [build_expenses_view] is the whole pipeline for the expenses dataset:
//! filter the batch, sort the survivors, slice the requested page, and reduce
//! the filtered set into totals and chart series. It is a pure function of
//! `(records, query, today)`; callers recompute it on every state change and
//! own the reset-to-page-1 rule when a filter changes.

use std::str::FromStr;

use time::Date;

use crate::{
    Error,
    aggregate::{max_of, sum_by_keys, sum_of, sum_on_day},
    dates::DateWindow,
    filter::{matches_category, matches_search, matches_tag},
    paginate::{DEFAULT_PAGE_SIZE, PageInfo, paginate},
    record::ExpenseRecord,
    series::{Series, daily_trend},
    sort::{SortState, compare_dates, compare_numbers, compare_text},
};

/// How many recipients the top-recipient ranking keeps.
pub const TOP_RECIPIENTS: usize = 8;

/// The bucket label for expenses without a reason.
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// The sortable columns of the expenses table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpenseSortKey {
    /// Sort by normalized date; records without one rank last.
    #[default]
    Date,
    /// Sort by amount.
    Amount,
    /// Sort by recipient, case-insensitively.
    PaidTo,
    /// Sort by reason, case-insensitively.
    Reason,
    /// Sort by the recording user's name, case-insensitively.
    User,
}

impl FromStr for ExpenseSortKey {
    type Err = Error;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword.to_lowercase().as_str() {
            "date" => Ok(ExpenseSortKey::Date),
            "amount" => Ok(ExpenseSortKey::Amount),
            "paidto" | "paid-to" | "recipient" => Ok(ExpenseSortKey::PaidTo),
            "reason" | "category" => Ok(ExpenseSortKey::Reason),
            "user" => Ok(ExpenseSortKey::User),
            _ => Err(Error::UnknownSortKey(keyword.to_owned())),
        }
    }
}

/// One snapshot of the user-controlled filter, sort, and page state for the
/// expenses table.
///
/// The engine only reads it; the owning surface mutates it between
/// recomputation passes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseQuery {
    /// Substring search over recipient, reason, and user name.
    pub search: String,
    /// Selected reason/category, or `None` for all.
    pub category: Option<String>,
    /// Selected region tag, or `None` for all.
    pub region: Option<String>,
    /// The selected date window.
    pub window: DateWindow,
    /// The selected sort column and direction.
    pub sort: SortState<ExpenseSortKey>,
    /// The 1-indexed page to show.
    pub page: u64,
    /// How many records per page.
    pub page_size: u64,
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            region: None,
            window: DateWindow::All,
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Global scalar statistics over the filtered expense set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseTotals {
    /// Sum of all filtered amounts.
    pub total: f64,
    /// The single largest filtered amount, or zero when nothing matched.
    pub largest: f64,
    /// Sum of filtered amounts dated today.
    pub today: f64,
    /// How many records survived the filter chain.
    pub count: u64,
}

/// Everything the expenses dashboard renders for one query snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensesView {
    /// The filtered, sorted record set, e.g. for export.
    pub filtered: Vec<ExpenseRecord>,
    /// The records on the requested page.
    pub page: Vec<ExpenseRecord>,
    /// Page metadata for the pager row.
    pub page_info: PageInfo,
    /// Scalar statistics over the filtered set.
    pub totals: ExpenseTotals,
    /// Filtered amounts summed per region tag.
    pub by_region: Series,
    /// Filtered amounts summed per reason, with blank reasons bucketed under
    /// [UNCATEGORIZED_LABEL].
    pub by_category: Series,
    /// The [TOP_RECIPIENTS] recipients by total amount.
    pub top_recipients: Series,
    /// The 30-day daily spend trend ending today.
    pub trend: Series,
}

/// Applies the query's filter chain to the batch, preserving input order.
pub fn filter_expenses(
    records: &[ExpenseRecord],
    query: &ExpenseQuery,
    today: Date,
) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|record| {
            matches_search(
                &query.search,
                &[
                    record.paid_to.as_str(),
                    record.reason.as_str(),
                    record.user_name(),
                ],
            ) && matches_category(query.category.as_deref(), &record.reason)
                && matches_tag(query.region.as_deref(), &record.region)
                && query.window.contains(record.parsed_date(), today)
        })
        .cloned()
        .collect()
}

/// Stable-sorts expenses in place by the selected column and direction.
pub fn sort_expenses(records: &mut [ExpenseRecord], sort: SortState<ExpenseSortKey>) {
    match sort.key {
        ExpenseSortKey::Date => records
            .sort_by(|a, b| compare_dates(sort.direction, a.parsed_date(), b.parsed_date())),
        ExpenseSortKey::Amount => {
            records.sort_by(|a, b| compare_numbers(sort.direction, a.amount, b.amount))
        }
        ExpenseSortKey::PaidTo => {
            records.sort_by(|a, b| compare_text(sort.direction, &a.paid_to, &b.paid_to))
        }
        ExpenseSortKey::Reason => {
            records.sort_by(|a, b| compare_text(sort.direction, &a.reason, &b.reason))
        }
        ExpenseSortKey::User => {
            records.sort_by(|a, b| compare_text(sort.direction, a.user_name(), b.user_name()))
        }
    }
}

/// Runs the full expenses pipeline for one query snapshot.
///
/// `today` must be captured once by the caller and reused for the whole
/// pass; it anchors the date window, the today-total, and the trend series.
pub fn build_expenses_view(
    records: &[ExpenseRecord],
    query: &ExpenseQuery,
    today: Date,
) -> ExpensesView {
    let mut filtered = filter_expenses(records, query, today);
    sort_expenses(&mut filtered, query.sort);
    tracing::debug!(
        "expenses query matched {} of {} records",
        filtered.len(),
        records.len()
    );

    let (page, page_info) = paginate(&filtered, query.page_size, query.page);

    let totals = ExpenseTotals {
        total: sum_of(&filtered, |record| record.amount),
        largest: max_of(&filtered, |record| record.amount),
        today: sum_on_day(
            &filtered,
            today,
            ExpenseRecord::parsed_date,
            |record| record.amount,
        ),
        count: filtered.len() as u64,
    };

    let by_region = Series::from_buckets(&sum_by_keys(
        &filtered,
        |record| record.region.clone(),
        |record| record.amount,
    ));
    let by_category = Series::from_buckets(&sum_by_keys(
        &filtered,
        |record| {
            let reason = if record.reason.is_empty() {
                UNCATEGORIZED_LABEL.to_owned()
            } else {
                record.reason.clone()
            };
            [reason]
        },
        |record| record.amount,
    ));
    let top_recipients = Series::from_buckets(&sum_by_keys(
        &filtered,
        |record| {
            if record.paid_to.is_empty() {
                Vec::new()
            } else {
                vec![record.paid_to.clone()]
            }
        },
        |record| record.amount,
    ))
    .top_n(TOP_RECIPIENTS);
    let trend = daily_trend(
        &filtered,
        today,
        ExpenseRecord::parsed_date,
        |record| record.amount,
    );

    ExpensesView {
        filtered,
        page,
        page_info,
        totals,
        by_region,
        by_category,
        top_recipients,
        trend,
    }
}
