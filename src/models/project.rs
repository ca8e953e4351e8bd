//! Project model.

use serde::{Deserialize, Serialize};

use super::Role;

/// A project tasks are booked against.
///
/// Names are unique case-insensitively; the import resolver uses the
/// name as its dedup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Role the project mostly needs, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Pending,
    Completed,
}

impl Project {
    /// Creates an active project.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ProjectStatus::Active,
            required_role: None,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the required role.
    pub fn with_required_role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Case-insensitive name match.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
