//! Projection of aggregation buckets into chart-ready label/value series.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Duration};

/// How many daily points the trend series always contains.
pub const TREND_DAYS: usize = 30;

/// A labeled numeric series in the shape charting surfaces consume.
///
/// Labels and values are parallel: `values[i]` belongs to `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// The category or date label for each point.
    pub labels: Vec<String>,
    /// The numeric value for each point.
    pub values: Vec<f64>,
}

impl Series {
    /// Projects aggregation buckets into a series, preserving the buckets'
    /// key-ordered iteration as label order.
    pub fn from_buckets(buckets: &BTreeMap<String, f64>) -> Self {
        Self {
            labels: buckets.keys().cloned().collect(),
            values: buckets.values().copied().collect(),
        }
    }

    /// The largest `n` points by value, in descending value order.
    ///
    /// The underlying sort is stable, so points with equal values keep their
    /// original label order.
    pub fn top_n(&self, n: usize) -> Self {
        let mut ranked: Vec<(usize, f64)> = self.values.iter().copied().enumerate().collect();
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        ranked.truncate(n);

        Self {
            labels: ranked
                .iter()
                .map(|(index, _)| self.labels[*index].clone())
                .collect(),
            values: ranked.iter().map(|(_, value)| *value).collect(),
        }
    }

    /// How many points the series contains.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Builds the fixed-length daily trend series ending today.
///
/// One point per calendar day for the last [TREND_DAYS] days, oldest first,
/// labeled with the ISO date. Days with no matching records get an explicit
/// `0.0` so the series is always exactly [TREND_DAYS] points long. Records
/// without a parseable date are excluded.
pub fn daily_trend<R>(
    records: &[R],
    today: Date,
    date_of: impl Fn(&R) -> Option<Date>,
    value_of: impl Fn(&R) -> f64,
) -> Series {
    let days: Vec<Date> = (0..TREND_DAYS as i64)
        .rev()
        .filter_map(|offset| today.checked_sub(Duration::days(offset)))
        .collect();
    let Some(&start) = days.first() else {
        return Series::default();
    };

    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();
    for record in records {
        let Some(date) = date_of(record) else {
            continue;
        };
        if start <= date && date <= today {
            *totals.entry(date).or_insert(0.0) += value_of(record);
        }
    }

    Series {
        labels: days.iter().map(|day| day.to_string()).collect(),
        values: days
            .iter()
            .map(|day| totals.get(day).copied().unwrap_or(0.0))
            .collect(),
    }
}
