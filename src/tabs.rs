//! The dashboard tab registry as an immutable configuration list.
//!
//! The caller owns the list; add, remove, and toggle are pure functions that
//! return a new list, so concurrent callers can never observe a half-updated
//! registry.

/// One dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardTab {
    /// Stable identifier used by the other tab operations.
    pub id: String,
    /// The label the navigation surface shows.
    pub label: String,
    /// Whether the tab is currently shown.
    pub enabled: bool,
}

impl DashboardTab {
    /// A new enabled tab.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }
}

/// The tabs a fresh dashboard starts with.
pub fn default_tabs() -> Vec<DashboardTab> {
    vec![
        DashboardTab::new("expenses", "Expenses"),
        DashboardTab::new("campaigns", "Ad Campaigns"),
    ]
}

/// Returns the list with `tab` appended, or with the same-id entry replaced.
pub fn add_tab(tabs: &[DashboardTab], tab: DashboardTab) -> Vec<DashboardTab> {
    let mut next: Vec<DashboardTab> = tabs
        .iter()
        .filter(|existing| existing.id != tab.id)
        .cloned()
        .collect();
    next.push(tab);
    next
}

/// Returns the list without the tab identified by `id`.
///
/// Removing an unknown id returns the list unchanged.
pub fn remove_tab(tabs: &[DashboardTab], id: &str) -> Vec<DashboardTab> {
    tabs.iter().filter(|tab| tab.id != id).cloned().collect()
}

/// Returns the list with the identified tab's `enabled` flag flipped.
///
/// Toggling an unknown id returns the list unchanged.
pub fn toggle_tab(tabs: &[DashboardTab], id: &str) -> Vec<DashboardTab> {
    tabs.iter()
        .map(|tab| {
            if tab.id == id {
                DashboardTab {
                    enabled: !tab.enabled,
                    ..tab.clone()
                }
            } else {
                tab.clone()
            }
        })
        .collect()
}
