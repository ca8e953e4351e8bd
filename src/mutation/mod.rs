//! Mutation service.
//!
//! Small pure reducers over the resource collection. Each operation takes
//! the current collection and returns a new one; the input is never
//! modified. Rejected or not-found operations return an unchanged copy
//! and log at `debug`, they never fail.
//!
//! # Operations
//!
//! | Action | Rejected when |
//! |--------|---------------|
//! | `AddResource` | name or email blank |
//! | `ToggleResourceStatus` | id not found |
//! | `ToggleBillable` | caller not Admin, id not found |
//! | `AssignTask` | resource missing or Inactive, hours ≤ 0 |
//! | `ToggleTaskCompletion` | task not found under resource |
//! | `BulkCompleteTasks` | never (unknown ids ignored) |
//! | `UpdateCapacity` | never (negative clamps to 0) |
//!
//! Toggles are not idempotent; everything else is.

mod ids;

pub use ids::{generate_id, new_resource_id, new_task_id, PROJECT_PREFIX, RESOURCE_PREFIX, TASK_PREFIX};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::models::{Caller, Priority, Resource, ResourceStatus, Role, Task};

/// Default weekly capacity of a newly added resource.
pub const DEFAULT_WEEKLY_CAPACITY: f64 = 40.0;

/// Details of a task to assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub resource_id: String,
    pub name: String,
    pub project_id: String,
    pub project_name: String,
    pub hours: f64,
    pub date: String,
    pub priority: Priority,
}

/// A user action against the resource collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    AddResource {
        name: String,
        role: Role,
        email: String,
        billable: bool,
    },
    ToggleResourceStatus {
        resource_id: String,
    },
    ToggleBillable {
        resource_id: String,
    },
    AssignTask(TaskAssignment),
    ToggleTaskCompletion {
        resource_id: String,
        task_id: String,
    },
    BulkCompleteTasks {
        task_ids: Vec<String>,
    },
    UpdateCapacity {
        resource_id: String,
        capacity: f64,
    },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddResource { .. } => "add_resource",
            Action::ToggleResourceStatus { .. } => "toggle_resource_status",
            Action::ToggleBillable { .. } => "toggle_billable",
            Action::AssignTask(_) => "assign_task",
            Action::ToggleTaskCompletion { .. } => "toggle_task_completion",
            Action::BulkCompleteTasks { .. } => "bulk_complete_tasks",
            Action::UpdateCapacity { .. } => "update_capacity",
        }
    }
}

/// Applies `action` on behalf of `caller` and returns the new collection.
pub fn apply(resources: &[Resource], caller: &Caller, action: &Action) -> Vec<Resource> {
    match action {
        Action::AddResource {
            name,
            role,
            email,
            billable,
        } => add_resource(resources, name, *role, email, *billable),
        Action::ToggleResourceStatus { resource_id } => {
            toggle_resource_status(resources, resource_id)
        }
        Action::ToggleBillable { resource_id } => toggle_billable(resources, caller, resource_id),
        Action::AssignTask(assignment) => assign_task(resources, assignment),
        Action::ToggleTaskCompletion {
            resource_id,
            task_id,
        } => toggle_task_completion(resources, resource_id, task_id),
        Action::BulkCompleteTasks { task_ids } => bulk_complete_tasks(resources, task_ids),
        Action::UpdateCapacity {
            resource_id,
            capacity,
        } => update_capacity(resources, resource_id, *capacity),
    }
}

/// Appends a new active resource with no tasks and a 40h week.
pub fn add_resource(
    resources: &[Resource],
    name: &str,
    role: Role,
    email: &str,
    billable: bool,
) -> Vec<Resource> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() {
        debug!("add_resource rejected: name and email are required");
        return resources.to_vec();
    }

    let resource = Resource::new(new_resource_id(resources), name, role)
        .with_email(email)
        .with_capacity(DEFAULT_WEEKLY_CAPACITY)
        .with_billable(billable);

    let mut next = resources.to_vec();
    next.push(resource);
    next
}

/// Flips Active ↔ Inactive ("ramp down" / "ramp up"). Tasks are kept.
pub fn toggle_resource_status(resources: &[Resource], resource_id: &str) -> Vec<Resource> {
    update_resource(resources, resource_id, "toggle_resource_status", |r| {
        r.status = r.status.toggled();
    })
}

/// Flips the billable flag. Admin only.
pub fn toggle_billable(resources: &[Resource], caller: &Caller, resource_id: &str) -> Vec<Resource> {
    if !caller.is_admin() {
        debug!(resource_id, "toggle_billable rejected: caller is not an admin");
        return resources.to_vec();
    }
    update_resource(resources, resource_id, "toggle_billable", |r| {
        r.billable = !r.billable;
    })
}

/// Appends an open task to an active resource.
pub fn assign_task(resources: &[Resource], assignment: &TaskAssignment) -> Vec<Resource> {
    if !(assignment.hours > 0.0 && assignment.hours.is_finite()) {
        debug!(hours = assignment.hours, "assign_task rejected: hours must be positive");
        return resources.to_vec();
    }

    match resources.iter().find(|r| r.id == assignment.resource_id) {
        None => {
            debug!(resource_id = %assignment.resource_id, "assign_task rejected: resource not found");
            return resources.to_vec();
        }
        Some(r) if r.status == ResourceStatus::Inactive => {
            debug!(resource_id = %assignment.resource_id, "assign_task rejected: resource is inactive");
            return resources.to_vec();
        }
        Some(_) => {}
    }

    let task = Task::new(new_task_id(resources), assignment.name.clone())
        .with_project(assignment.project_id.clone(), assignment.project_name.clone())
        .with_hours(assignment.hours)
        .with_date(assignment.date.clone())
        .with_priority(assignment.priority);

    resources
        .iter()
        .map(|r| {
            if r.id == assignment.resource_id {
                r.clone().with_task(task.clone())
            } else {
                r.clone()
            }
        })
        .collect()
}

/// Flips the completion flag of one task.
pub fn toggle_task_completion(resources: &[Resource], resource_id: &str, task_id: &str) -> Vec<Resource> {
    let found = resources
        .iter()
        .any(|r| r.id == resource_id && r.task(task_id).is_some());
    if !found {
        debug!(resource_id, task_id, "toggle_task_completion: task not found");
        return resources.to_vec();
    }

    update_resource(resources, resource_id, "toggle_task_completion", |r| {
        if let Some(task) = r.tasks.iter_mut().find(|t| t.id == task_id) {
            task.completed = !task.completed;
        }
    })
}

/// Marks every listed task completed, across all resources.
pub fn bulk_complete_tasks(resources: &[Resource], task_ids: &[String]) -> Vec<Resource> {
    let wanted: HashSet<&str> = task_ids.iter().map(String::as_str).collect();
    resources
        .iter()
        .map(|r| {
            let mut r = r.clone();
            for task in r.tasks.iter_mut().filter(|t| wanted.contains(t.id.as_str())) {
                task.completed = true;
            }
            r
        })
        .collect()
}

/// Sets the weekly capacity, clamping negative (and NaN) input to 0.
pub fn update_capacity(resources: &[Resource], resource_id: &str, capacity: f64) -> Vec<Resource> {
    let capacity = if capacity.is_nan() { 0.0 } else { capacity.max(0.0) };
    update_resource(resources, resource_id, "update_capacity", |r| {
        r.max_capacity = capacity;
    })
}

fn update_resource(
    resources: &[Resource],
    resource_id: &str,
    action: &str,
    mut edit: impl FnMut(&mut Resource),
) -> Vec<Resource> {
    let mut found = false;
    let next = resources
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if r.id == resource_id {
                found = true;
                edit(&mut r);
            }
            r
        })
        .collect();
    if !found {
        debug!(resource_id, action, "resource not found");
    }
    next
}
