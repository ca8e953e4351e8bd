//! Task model.
//!
//! A task is a dated unit of work owned by exactly one resource. It
//! references its project by id (weak reference) and caches the project
//! name for display.
//!
//! # Date Representation
//! Dates are ISO `YYYY-MM-DD` strings. Range checks compare them as
//! opaque strings, which sorts correctly for zero-padded ISO dates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DateRange;

/// A unit of work assigned to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier. Never reused or mutated.
    pub id: String,
    /// Referenced project id.
    #[serde(default)]
    pub project_id: String,
    /// Denormalized project name.
    #[serde(default)]
    pub project_name: String,
    /// Task name.
    pub name: String,
    /// Estimated hours.
    pub hours: f64,
    /// Calendar date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Completion flag. Completed tasks are excluded from capacity math.
    #[serde(default)]
    pub completed: bool,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Normalizes free text: "high"/"low" in any case, anything else Medium.
    pub fn normalize(label: &str) -> Priority {
        let label = label.trim();
        if label.eq_ignore_ascii_case("high") {
            Priority::High
        } else if label.eq_ignore_ascii_case("low") {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Task {
    /// Creates an open, medium-priority task with zero hours and no date.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: String::new(),
            project_name: String::new(),
            name: name.into(),
            hours: 0.0,
            date: String::new(),
            priority: Priority::Medium,
            completed: false,
        }
    }

    /// Sets the project reference.
    pub fn with_project(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.project_id = id.into();
        self.project_name = name.into();
        self
    }

    /// Sets the estimated hours.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the task completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Whether the task still counts toward workload.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Whether the task date lies within the inclusive range.
    #[inline]
    pub fn is_within(&self, range: &DateRange) -> bool {
        range.contains(&self.date)
    }
}
