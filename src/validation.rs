//! Integrity checks for loaded collections.
//!
//! The reducers keep these invariants by construction, but stored or
//! hand-edited data may not. Detects:
//! - Duplicate resource, task, or project IDs
//! - Project names that collide ignoring case
//! - Tasks referencing unknown projects
//! - Negative or non-finite task hours (0 is allowed: import stores 0
//!   for an hours field with no number)
//! - Negative capacity
//! - Task dates that are not `YYYY-MM-DD`
//!
//! Findings are reported, never repaired; the engine stays total over
//! invalid data.

use crate::models::{parse_date, Project, Resource};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Two projects share a name (case-insensitive).
    DuplicateProjectName,
    /// A task references a project that doesn't exist.
    InvalidProjectReference,
    /// A task has negative or non-finite hours.
    InvalidHours,
    /// A resource has negative or non-finite capacity.
    InvalidCapacity,
    /// A task date isn't an ISO calendar date.
    InvalidDate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates resources and projects together.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_collections(resources: &[Resource], projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut project_ids = HashSet::new();
    let mut project_names = HashSet::new();
    for p in projects {
        if !project_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate project ID: {}", p.id),
            ));
        }
        if !project_names.insert(p.name.to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProjectName,
                format!("Duplicate project name: {}", p.name),
            ));
        }
    }

    let mut resource_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }

        if !(r.max_capacity >= 0.0 && r.max_capacity.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Resource '{}' has invalid capacity {}", r.id, r.max_capacity),
            ));
        }

        for t in &r.tasks {
            if !task_ids.insert(t.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate task ID: {}", t.id),
                ));
            }

            if !project_ids.contains(t.project_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidProjectReference,
                    format!("Task '{}' references unknown project '{}'", t.id, t.project_id),
                ));
            }

            if !(t.hours >= 0.0 && t.hours.is_finite()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidHours,
                    format!("Task '{}' has invalid hours {}", t.id, t.hours),
                ));
            }

            if parse_date(&t.date).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDate,
                    format!("Task '{}' has invalid date '{}'", t.id, t.date),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
