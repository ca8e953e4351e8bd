//! Bulk assignment import.
//!
//! Parses comma-separated assignment rows and merges them into the
//! resource and project collections.
//!
//! # Format
//!
//! ```text
//! Resource, Role, Project, Task, Date, Hours, Priority
//! John Doe, QA, Alpha, Login Test, 2024-03-20, 4, High
//! ```
//!
//! The header row is optional and detected by the first column containing
//! "resource" (any case). Priority may be omitted.
//!
//! # Resolution Rules
//!
//! 1. Rows with fewer than six columns (or a blank resource name) are skipped.
//! 2. Projects and resources are matched by name, ignoring case, and
//!    created on first sight.
//! 3. Hours are read from the leading number of the field (`4h` is 4);
//!    a field with no leading number becomes 0. Hours are not range-checked.
//! 4. Priority is High/Low when it says so (any case), Medium otherwise.
//! 5. A task is skipped when its resource already has a task with the same
//!    name and date, so importing the same text twice adds nothing.
//!
//! Malformed rows never abort the batch.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::models::{Priority, Project, Resource, Role, Task};
use crate::mutation::{generate_id, new_resource_id, new_task_id, PROJECT_PREFIX};

/// Minimum number of columns for a row to be considered.
const MIN_COLUMNS: usize = 6;

/// Import counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Non-blank data rows seen (header excluded).
    pub rows_read: usize,
    /// Rows dropped as malformed.
    pub rows_skipped: usize,
    pub tasks_created: usize,
    /// Rows whose task already existed on the resource.
    pub duplicates_skipped: usize,
    pub resources_created: usize,
    pub projects_created: usize,
}

/// Result of an import: the updated collections plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub resources: Vec<Resource>,
    pub projects: Vec<Project>,
    pub report: ImportReport,
}

/// One parsed data row.
#[derive(Debug, Clone, PartialEq)]
struct ImportRow<'a> {
    resource: &'a str,
    role: &'a str,
    project: &'a str,
    task: &'a str,
    date: &'a str,
    hours: f64,
    priority: Priority,
}

impl<'a> ImportRow<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        if cols.len() < MIN_COLUMNS || cols[0].is_empty() {
            return None;
        }
        Some(Self {
            resource: cols[0],
            role: cols[1],
            project: cols[2],
            task: cols[3],
            date: cols[4],
            hours: parse_hours(cols[5]),
            priority: Priority::normalize(cols.get(6).copied().unwrap_or_default()),
        })
    }
}

/// Imports `text` into copies of the given collections.
pub fn import_csv(
    text: &str,
    resources: &[Resource],
    projects: &[Project],
    config: &PlannerConfig,
) -> ImportOutcome {
    let mut resources = resources.to_vec();
    let mut projects = projects.to_vec();
    let mut report = ImportReport::default();

    let mut lines = text.lines().filter(|l| !l.trim().is_empty()).peekable();
    if lines.peek().is_some_and(|first| is_header(first)) {
        lines.next();
    }

    for (index, line) in lines.enumerate() {
        report.rows_read += 1;
        let Some(row) = ImportRow::parse(line) else {
            debug!(row = index + 1, "skipping malformed import row");
            report.rows_skipped += 1;
            continue;
        };

        let project = resolve_project(&mut projects, row.project, &mut report);
        let owner = resolve_resource(&mut resources, &row, config, &mut report);

        let duplicate = resources[owner]
            .tasks
            .iter()
            .any(|t| t.name == row.task && t.date == row.date);
        if duplicate {
            report.duplicates_skipped += 1;
            continue;
        }

        let task = Task::new(new_task_id(&resources), row.task)
            .with_project(project.id, project.name)
            .with_hours(row.hours)
            .with_date(row.date)
            .with_priority(row.priority);
        resources[owner].tasks.push(task);
        report.tasks_created += 1;
    }

    info!(
        rows = report.rows_read,
        skipped = report.rows_skipped,
        tasks = report.tasks_created,
        duplicates = report.duplicates_skipped,
        new_resources = report.resources_created,
        new_projects = report.projects_created,
        "import finished"
    );

    ImportOutcome {
        resources,
        projects,
        report,
    }
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|first| first.to_lowercase().contains("resource"))
}

/// Parses the leading number of an hours field (`"4h"` is 4,
/// `"2.5 hrs"` is 2.5). No leading number, or a non-finite one, is 0.
fn parse_hours(raw: &str) -> f64 {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }

    // Exponent only counts when it has digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if is_digit(exp) {
            while is_digit(exp) {
                exp += 1;
            }
            end = exp;
        }
    }

    raw[..end]
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
}

/// Finds a project by name or creates one; returns a copy of it.
fn resolve_project(projects: &mut Vec<Project>, name: &str, report: &mut ImportReport) -> Project {
    if let Some(existing) = projects.iter().find(|p| p.matches_name(name)) {
        return existing.clone();
    }
    let id = generate_id(PROJECT_PREFIX, |id| projects.iter().any(|p| p.id == id));
    let project = Project::new(id, name);
    projects.push(project.clone());
    report.projects_created += 1;
    project
}

/// Finds a resource by name or creates one; returns its index.
fn resolve_resource(
    resources: &mut Vec<Resource>,
    row: &ImportRow<'_>,
    config: &PlannerConfig,
    report: &mut ImportReport,
) -> usize {
    let wanted = row.resource.to_lowercase();
    if let Some(index) = resources.iter().position(|r| r.name.to_lowercase() == wanted) {
        return index;
    }

    let role = Role::parse(row.role).unwrap_or(config.import.default_role);
    let resource = Resource::new(new_resource_id(resources), row.resource, role)
        .with_email(synthesize_email(row.resource, &config.import.email_domain))
        .with_capacity(config.import.default_capacity)
        .with_billable(true);
    resources.push(resource);
    report.resources_created += 1;
    resources.len() - 1
}

/// `"John Doe"` → `"john.doe@company.com"`. Only the first space becomes a dot.
fn synthesize_email(name: &str, domain: &str) -> String {
    format!("{}@{}", name.to_lowercase().replacen(' ', ".", 1), domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceStatus;

    const SAMPLE: &str = "Resource, Role, Project, Task, Date, Hours, Priority\n\
                          John Doe, QA, Alpha, Login Test, 2024-03-20, 4, High";

    fn import(text: &str, resources: &[Resource], projects: &[Project]) -> ImportOutcome {
        import_csv(text, resources, projects, &PlannerConfig::default())
    }

    #[test]
    fn test_import_creates_records() {
        let out = import(SAMPLE, &[], &[]);

        assert_eq!(out.projects.len(), 1);
        assert_eq!(out.projects[0].name, "Alpha");

        assert_eq!(out.resources.len(), 1);
        let john = &out.resources[0];
        assert_eq!(john.name, "John Doe");
        assert_eq!(john.role, Role::Qa);
        assert_eq!(john.email, "john.doe@company.com");
        assert!(john.billable);
        assert_eq!(john.status, ResourceStatus::Active);
        assert!((john.max_capacity - 40.0).abs() < 1e-10);

        assert_eq!(john.tasks.len(), 1);
        let task = &john.tasks[0];
        assert_eq!(task.name, "Login Test");
        assert_eq!(task.date, "2024-03-20");
        assert!((task.hours - 4.0).abs() < 1e-10);
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
        assert_eq!(task.project_id, out.projects[0].id);
        assert_eq!(task.project_name, "Alpha");

        assert_eq!(out.report.rows_read, 1);
        assert_eq!(out.report.tasks_created, 1);
        assert_eq!(out.report.resources_created, 1);
        assert_eq!(out.report.projects_created, 1);
    }

    #[test]
    fn test_import_twice_no_duplicates() {
        let first = import(SAMPLE, &[], &[]);
        let second = import(SAMPLE, &first.resources, &first.projects);
        assert_eq!(second.resources.len(), 1);
        assert_eq!(second.resources[0].tasks.len(), 1);
        assert_eq!(second.projects.len(), 1);
        assert_eq!(second.report.duplicates_skipped, 1);
        assert_eq!(second.report.tasks_created, 0);
    }

    #[test]
    fn test_matches_existing_case_insensitively() {
        let resources = vec![Resource::new("r1", "Sarah Chen", Role::Developer)];
        let projects = vec![Project::new("p1", "E-commerce Web")];
        let text = "sarah chen, QA, e-commerce web, Cart, 2024-03-21, 2, low";
        let out = import(text, &resources, &projects);

        assert_eq!(out.resources.len(), 1);
        assert_eq!(out.resources[0].role, Role::Developer);
        assert_eq!(out.projects.len(), 1);
        let task = &out.resources[0].tasks[0];
        assert_eq!(task.project_id, "p1");
        assert_eq!(task.project_name, "E-commerce Web");
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let text = "Resource,Role,Project,Task,Date,Hours\n\
                    Too, Short, Row\n\
                    \n\
                    Ann Lee, , Beta, Review, 2024-03-22, lots\n\
                    , QA, Beta, Orphan, 2024-03-22, 1";
        let out = import(text, &[], &[]);
        assert_eq!(out.report.rows_read, 3);
        assert_eq!(out.report.rows_skipped, 2);
        assert_eq!(out.resources.len(), 1);

        let ann = &out.resources[0];
        assert_eq!(ann.role, Role::Qa);
        assert!((ann.tasks[0].hours - 0.0).abs() < 1e-10);
        assert_eq!(ann.tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn test_no_header_first_row_imported() {
        let text = "Ann Lee, Designer, Beta, Mockups, 2024-03-22, 3\n\
                    Ann Lee, Designer, Beta, Mockups, 2024-03-23, 3";
        let out = import(text, &[], &[]);
        assert_eq!(out.resources.len(), 1);
        assert_eq!(out.resources[0].role, Role::Designer);
        // same name, different date is not a duplicate
        assert_eq!(out.resources[0].tasks.len(), 2);
    }

    #[test]
    fn test_input_order_preserved_and_unbounded_hours() {
        let text = "A Person, QA, P, First, 2024-03-01, 30\n\
                    A Person, QA, P, Second, 2024-03-01, 0.25";
        let out = import(text, &[], &[]);
        let names: Vec<&str> = out.resources[0].tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!((out.resources[0].tasks[0].hours - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_hours_leading_number() {
        let text = "A B, QA, P, Morning, 2024-03-20, 4h\n\
                    A B, QA, P, Evening, 2024-03-20, 2.5 hrs";
        let out = import(text, &[], &[]);
        let hours: Vec<f64> = out.resources[0].tasks.iter().map(|t| t.hours).collect();
        assert!((hours[0] - 4.0).abs() < 1e-10);
        assert!((hours[1] - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_parse_hours_prefixes() {
        assert!((parse_hours(" 3 ") - 3.0).abs() < 1e-10);
        assert!((parse_hours(".5h") - 0.5).abs() < 1e-10);
        assert!((parse_hours("1.5.2") - 1.5).abs() < 1e-10);
        assert!((parse_hours("2e1x") - 20.0).abs() < 1e-10);
        assert!((parse_hours("6e") - 6.0).abs() < 1e-10);
        assert!((parse_hours("-2") + 2.0).abs() < 1e-10);
        assert!((parse_hours("h4") - 0.0).abs() < 1e-10);
        assert!((parse_hours("-") - 0.0).abs() < 1e-10);
        assert!((parse_hours("1e999") - 0.0).abs() < 1e-10);
        assert!((parse_hours("") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_email_replaces_first_space_only() {
        assert_eq!(
            synthesize_email("Mary Ann Lee", "company.com"),
            "mary.ann lee@company.com"
        );
    }

    #[test]
    fn test_empty_text() {
        let out = import("", &[], &[]);
        assert_eq!(out.report, ImportReport::default());
        assert!(out.resources.is_empty());
    }
}
