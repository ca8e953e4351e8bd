//! View query passed to the allocation engine.

use serde::{Deserialize, Serialize};

use crate::models::{Caller, DateRange, Priority};

/// Task priority filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Whether a task with `priority` passes the filter.
    #[inline]
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => *p == priority,
        }
    }
}

/// Secondary sort key (after Active-before-Inactive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Name,
    Role,
}

/// Everything the engine needs besides the resource collection.
///
/// An empty `project_ids` list means "all projects".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub caller: Caller,
    pub range: DateRange,
    pub project_ids: Vec<String>,
    pub priority: PriorityFilter,
    pub show_inactive: bool,
    pub sort_key: SortKey,
}

impl ViewQuery {
    /// Query over `range` with no project/priority filter, hiding inactive resources.
    pub fn new(caller: Caller, range: DateRange) -> Self {
        Self {
            caller,
            range,
            project_ids: Vec::new(),
            priority: PriorityFilter::All,
            show_inactive: false,
            sort_key: SortKey::Name,
        }
    }

    /// Restricts to resources with open work on these projects.
    pub fn with_projects(mut self, project_ids: Vec<String>) -> Self {
        self.project_ids = project_ids;
        self
    }

    /// Sets the priority filter.
    pub fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    /// Includes inactive resources.
    pub fn with_inactive(mut self, show_inactive: bool) -> Self {
        self.show_inactive = show_inactive;
        self
    }

    /// Sets the sort key.
    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Inclusive day count of the range.
    pub fn days(&self) -> u32 {
        self.range.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_filter() {
        assert!(PriorityFilter::All.matches(Priority::Low));
        assert!(PriorityFilter::Only(Priority::High).matches(Priority::High));
        assert!(!PriorityFilter::Only(Priority::High).matches(Priority::Medium));
    }

    #[test]
    fn test_query_builder() {
        let q = ViewQuery::new(Caller::admin(), DateRange::new("2024-01-01", "2024-01-07"))
            .with_projects(vec!["p1".into()])
            .with_priority(PriorityFilter::Only(Priority::Low))
            .with_inactive(true)
            .sorted_by(SortKey::Role);
        assert_eq!(q.project_ids, vec!["p1".to_string()]);
        assert!(q.show_inactive);
        assert_eq!(q.sort_key, SortKey::Role);
        assert_eq!(q.days(), 7);
    }
}
