//! Predicate helpers shared by the per-dataset filter chains.
//!
//! Each helper is one predicate in the AND-chain a query applies to a record.
//! A predicate whose filter value is unset (empty search, no selection) is
//! inactive and matches every record, so callers can apply the full chain
//! unconditionally. Filtering never reorders records.

/// Case-insensitive substring search across a record's text fields.
///
/// Inactive (matches everything) when the needle is empty or whitespace-only
/// after trimming.
pub fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }

    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Case-insensitive equality against a selected scalar category.
///
/// Inactive when no category is selected.
pub fn matches_category(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None => true,
        Some(selected) => value.to_lowercase() == selected.to_lowercase(),
    }
}

/// Case-sensitive membership test against a record's tag list.
///
/// Inactive when no tag is selected.
pub fn matches_tag(selected: Option<&str>, tags: &[String]) -> bool {
    match selected {
        None => true,
        Some(selected) => tags.iter().any(|tag| tag == selected),
    }
}

#[cfg(test)]
mod tests {
    use super::{matches_category, matches_search, matches_tag};

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("fuel", &["Diesel Fuel Ltd", ""]));
        assert!(matches_search("FUEL", &["diesel fuel ltd"]));
        assert!(!matches_search("fuel", &["Office rent", "Stationery"]));
    }

    #[test]
    fn whitespace_only_search_is_inactive() {
        assert!(matches_search("   ", &["anything"]));
        assert!(matches_search("", &[]));
    }

    #[test]
    fn search_checks_every_haystack() {
        assert!(matches_search("asha", &["Office rent", "Asha"]));
    }

    #[test]
    fn category_equality_is_case_insensitive() {
        assert!(matches_category(Some("fuel"), "Fuel"));
        assert!(!matches_category(Some("fuel"), "Fuel surcharge"));
    }

    #[test]
    fn no_selected_category_matches_everything() {
        assert!(matches_category(None, "anything"));
        assert!(matches_category(None, ""));
    }

    #[test]
    fn tag_membership_is_case_sensitive() {
        let tags = vec!["North".to_owned(), "West".to_owned()];

        assert!(matches_tag(Some("North"), &tags));
        assert!(!matches_tag(Some("north"), &tags));
        assert!(!matches_tag(Some("South"), &tags));
    }

    #[test]
    fn no_selected_tag_matches_untagged_records() {
        assert!(matches_tag(None, &[]));
    }
}
