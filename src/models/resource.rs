//! Resource model.
//!
//! Resources are the people work is allocated to. Each resource has a
//! role, a weekly capacity in hours, a billable flag, a lifecycle status,
//! and exclusively owns its ordered task list.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Task;

/// A person that can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource identifier. Never reused or mutated.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job role.
    pub role: Role,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Avatar URL for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Weekly capacity in hours (5-workday week, non-negative).
    pub max_capacity: f64,
    /// Whether this resource's time is billable.
    #[serde(default = "default_billable")]
    pub billable: bool,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ResourceStatus,
    /// Owned tasks, in assignment order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

fn default_billable() -> bool {
    true
}

/// Job role of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Developer,
    Designer,
    Manager,
    #[serde(rename = "QA")]
    Qa,
    Product,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 5] = [
        Role::Developer,
        Role::Designer,
        Role::Manager,
        Role::Qa,
        Role::Product,
    ];

    /// Display label ("QA" for quality assurance).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Designer => "Designer",
            Role::Manager => "Manager",
            Role::Qa => "QA",
            Role::Product => "Product",
        }
    }

    /// Parses a role label case-insensitively. Returns `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Role> {
        let label = label.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. Resources are ramped down/up, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
}

impl ResourceStatus {
    /// The opposite status.
    pub fn toggled(self) -> Self {
        match self {
            ResourceStatus::Active => ResourceStatus::Inactive,
            ResourceStatus::Inactive => ResourceStatus::Active,
        }
    }
}

impl Resource {
    /// Creates an active, billable resource with a 40h week and no tasks.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            email: String::new(),
            avatar: None,
            max_capacity: 40.0,
            billable: true,
            status: ResourceStatus::Active,
            tasks: Vec::new(),
        }
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the weekly capacity (clamped to non-negative).
    pub fn with_capacity(mut self, hours: f64) -> Self {
        self.max_capacity = hours.max(0.0);
        self
    }

    /// Sets the billable flag.
    pub fn with_billable(mut self, billable: bool) -> Self {
        self.billable = billable;
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    /// Appends a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Whether the resource is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ResourceStatus::Active
    }

    /// Sum of hours over incomplete tasks.
    pub fn open_hours(&self) -> f64 {
        self.tasks
            .iter()
            .filter(|t| t.is_open())
            .map(|t| t.hours)
            .sum()
    }

    /// Looks up an owned task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// First word of the name, used for compact chart labels.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::new("r1", "Sarah Chen", Role::Qa)
            .with_email("sarah.c@company.com")
            .with_capacity(32.0)
            .with_billable(false)
            .with_task(Task::new("t1", "Checkout Regression").with_hours(6.0));

        assert_eq!(r.id, "r1");
        assert_eq!(r.name, "Sarah Chen");
        assert_eq!(r.role, Role::Qa);
        assert!((r.max_capacity - 32.0).abs() < 1e-10);
        assert!(!r.billable);
        assert!(r.is_active());
        assert_eq!(r.tasks.len(), 1);
        assert!(r.task("t1").is_some());
        assert!(r.task("missing").is_none());
        assert_eq!(r.first_name(), "Sarah");
    }

    #[test]
    fn test_negative_capacity_clamped() {
        let r = Resource::new("r1", "A", Role::Developer).with_capacity(-5.0);
        assert!((r.max_capacity - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_open_hours_skip_completed() {
        let r = Resource::new("r1", "A", Role::Developer)
            .with_task(Task::new("t1", "Open").with_hours(3.0))
            .with_task(Task::new("t2", "Done").with_hours(5.0).completed());
        assert!((r.open_hours() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("qa"), Some(Role::Qa));
        assert_eq!(Role::parse(" Developer "), Some(Role::Developer));
        assert_eq!(Role::parse("PRODUCT"), Some(Role::Product));
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Tester"), None);
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(ResourceStatus::Active.toggled(), ResourceStatus::Inactive);
        assert_eq!(ResourceStatus::Inactive.toggled(), ResourceStatus::Active);
    }

    #[test]
    fn test_deserialize_legacy_record_defaults() {
        let json = r#"{
            "id": "r2",
            "name": "Marcus Johnson",
            "role": "QA",
            "email": "marcus.j@company.com",
            "avatar": "https://picsum.photos/id/91/100/100",
            "maxCapacity": 40,
            "tasks": []
        }"#;
        let r: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(r.role, Role::Qa);
        assert!(r.billable);
        assert_eq!(r.status, ResourceStatus::Active);
        assert!((r.max_capacity - 40.0).abs() < 1e-10);
    }
}
