//! Visibility, project, status, date, and priority filtering.
//!
//! # Pipeline
//!
//! 1. Visibility: viewers see only their own resource.
//! 2. Project: keep resources with at least one open task on a selected
//!    project (no-op when nothing is selected).
//! 3. Status: drop inactive resources unless `show_inactive` is set.
//! 4. Tasks: narrow each kept resource's tasks to the date range and
//!    priority filter.
//!
//! Steps 1–3 look at the full task list; step 4 produces the narrowed
//! list every downstream metric uses. The input collection is untouched.

use crate::models::{Resource, Task};

use super::ViewQuery;

/// Applies the filter pipeline and returns narrowed copies of the kept resources.
pub fn compute_visible_resources(resources: &[Resource], query: &ViewQuery) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| query.caller.can_see(r))
        .filter(|r| has_selected_project_work(r, &query.project_ids))
        .filter(|r| query.show_inactive || r.is_active())
        .map(|r| Resource {
            tasks: filtered_tasks(r, query).into_iter().cloned().collect(),
            ..r.clone()
        })
        .collect()
}

/// Tasks of `resource` inside the query's date range and priority filter.
pub fn filtered_tasks<'a>(resource: &'a Resource, query: &ViewQuery) -> Vec<&'a Task> {
    resource
        .tasks
        .iter()
        .filter(|t| t.is_within(&query.range) && query.priority.matches(t.priority))
        .collect()
}

fn has_selected_project_work(resource: &Resource, project_ids: &[String]) -> bool {
    if project_ids.is_empty() {
        return true;
    }
    resource
        .tasks
        .iter()
        .any(|t| t.is_open() && project_ids.iter().any(|id| *id == t.project_id))
}
