//! Resource ordering.
//!
//! Active resources come first, then the caller's key. Text keys compare
//! with accents folded and case ignored ("Émile" sorts with the E's), with
//! the accented spelling only breaking ties. The sort is stable, so equal
//! keys keep insertion order.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Resource;

use super::SortKey;

/// Sorts resources in place: Active before Inactive, then by `key`.
pub fn sort_resources(resources: &mut [Resource], key: SortKey) {
    resources.sort_by(|a, b| compare(a, b, key));
}

/// Returns a sorted copy.
pub fn sorted_resources(resources: &[Resource], key: SortKey) -> Vec<Resource> {
    let mut sorted = resources.to_vec();
    sort_resources(&mut sorted, key);
    sorted
}

fn compare(a: &Resource, b: &Resource, key: SortKey) -> Ordering {
    // `false < true`, so inactive sorts after active
    (!a.is_active())
        .cmp(&!b.is_active())
        .then_with(|| match key {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::Role => compare_text(a.role.as_str(), b.role.as_str()),
        })
}

/// Accent- and case-insensitive comparison; accents decide ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Lowercase with combining marks stripped after canonical decomposition.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceStatus, Role};

    fn ids(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let resources = vec![
            Resource::new("1", "marcus", Role::Qa),
            Resource::new("2", "Emily", Role::Qa),
            Resource::new("3", "anna", Role::Qa),
        ];
        let sorted = sorted_resources(&resources, SortKey::Name);
        assert_eq!(ids(&sorted), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_sort_by_name_folds_accents() {
        let resources = vec![
            Resource::new("1", "Zoe", Role::Qa),
            Resource::new("2", "Émile", Role::Qa),
            Resource::new("3", "Eve", Role::Qa),
        ];
        let sorted = sorted_resources(&resources, SortKey::Name);
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_accent_only_difference_keeps_both_ordered() {
        let resources = vec![
            Resource::new("1", "Rene", Role::Qa),
            Resource::new("2", "rené", Role::Qa),
            Resource::new("3", "René", Role::Qa),
        ];
        let sorted = sorted_resources(&resources, SortKey::Name);
        // "rene" < "rené"; the two spellings of René stay in insertion order
        assert_eq!(ids(&sorted), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_inactive_last() {
        let resources = vec![
            Resource::new("1", "Aaron", Role::Qa).with_status(ResourceStatus::Inactive),
            Resource::new("2", "Zoe", Role::Qa),
        ];
        let sorted = sorted_resources(&resources, SortKey::Name);
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_by_role_stable() {
        let resources = vec![
            Resource::new("1", "Zed", Role::Qa),
            Resource::new("2", "Amy", Role::Manager),
            Resource::new("3", "Bob", Role::Qa),
            Resource::new("4", "Cat", Role::Developer),
        ];
        let sorted = sorted_resources(&resources, SortKey::Role);
        // Developer < Manager < QA; the two QA keep insertion order
        assert_eq!(ids(&sorted), vec!["4", "2", "1", "3"]);
    }
}
