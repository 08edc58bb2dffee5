//! Stable comparators for the three sortable column types and the sort-state
//! toggle contract.
//!
//! The comparator for a column is chosen once from the column's declared sort
//! key, never by inspecting value types at runtime. All sorts in this crate
//! go through [slice::sort_by], which is stable, so equal-key records keep
//! their filtered order.

use std::cmp::Ordering;

use time::Date;

/// The direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first. The default: a freshly selected column shows the most
    /// relevant records at the top.
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The currently selected sort column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState<K> {
    /// The selected sort column.
    pub key: K,
    /// The selected direction.
    pub direction: SortDirection,
}

impl<K: PartialEq> SortState<K> {
    /// A fresh sort on `key` in the default (descending) direction.
    pub fn new(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::default(),
        }
    }

    /// The state after the user selects `key`.
    ///
    /// Selecting the current column flips the direction; selecting a new
    /// column resets to the default direction.
    pub fn toggled(self, key: K) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self::new(key)
        }
    }
}

/// Compares two text values case-insensitively.
pub fn compare_text(direction: SortDirection, a: &str, b: &str) -> Ordering {
    direction.apply(a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Compares two numeric values.
pub fn compare_numbers(direction: SortDirection, a: f64, b: f64) -> Ordering {
    direction.apply(a.total_cmp(&b))
}

/// Compares two normalized dates.
///
/// Records without a parseable date sort after all dated records in both
/// directions; the direction only reorders the dated records.
pub fn compare_dates(direction: SortDirection, a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
    }
}
