//! Persistence collaborator.
//!
//! The engine never touches storage. The `Planner` (or any other shell)
//! loads collections once and saves them after each change through a
//! `Store`.
//!
//! Loading never fails: missing or corrupt data falls back to the seed
//! dataset returned by `seed_resources` / `seed_projects`. Saving reports
//! I/O errors to the caller.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{format_date, Priority, Project, ProjectStatus, Resource, Role, Task};
use crate::validation::validate_collections;

const RESOURCES_FILE: &str = "resources.json";
const PROJECTS_FILE: &str = "projects.json";

/// Read/write access to the stored collections.
pub trait Store: Send + Sync {
    /// Stored resources, or the seed set if none or unreadable.
    fn load_resources(&self) -> Vec<Resource>;

    /// Stored projects, or the seed set if none or unreadable.
    fn load_projects(&self) -> Vec<Project>;

    fn save_resources(&self, resources: &[Resource]) -> Result<()>;

    fn save_projects(&self, projects: &[Project]) -> Result<()>;
}

/// JSON files in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    seed_date: NaiveDate,
}

impl JsonFileStore {
    /// Store rooted at `dir`. Seed tasks are dated today (UTC).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seed_date: Utc::now().date_naive(),
        }
    }

    /// Dates seed tasks on `date` instead of today.
    pub fn with_seed_date(mut self, date: NaiveDate) -> Self {
        self.seed_date = date;
        self
    }

    pub fn resources_path(&self) -> PathBuf {
        self.dir.join(RESOURCES_FILE)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    /// Loads both collections and logs integrity findings.
    pub fn load_all(&self) -> (Vec<Resource>, Vec<Project>) {
        let resources = self.load_resources();
        let projects = self.load_projects();
        if let Err(errors) = validate_collections(&resources, &projects) {
            for e in &errors {
                warn!(kind = ?e.kind, "{}", e.message);
            }
        }
        (resources, projects)
    }

    fn load_or<T: DeserializeOwned>(&self, path: &Path, fallback: impl FnOnce() -> T) -> T {
        if !path.exists() {
            return fallback();
        }
        match read_json(path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stored data unreadable, using seed data");
                fallback()
            }
        }
    }
}

impl Store for JsonFileStore {
    fn load_resources(&self) -> Vec<Resource> {
        self.load_or(&self.resources_path(), || seed_resources(self.seed_date))
    }

    fn load_projects(&self) -> Vec<Project> {
        self.load_or(&self.projects_path(), seed_projects)
    }

    fn save_resources(&self, resources: &[Resource]) -> Result<()> {
        write_json(&self.resources_path(), &resources)?;
        info!(count = resources.len(), "saved resources");
        Ok(())
    }

    fn save_projects(&self, projects: &[Project]) -> Result<()> {
        write_json(&self.projects_path(), &projects)?;
        info!(count = projects.len(), "saved projects");
        Ok(())
    }
}

/// In-process store. Starts empty (loads return seed data until saved).
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: Mutex<Option<Vec<Resource>>>,
    projects: Mutex<Option<Vec<Project>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the given collections.
    pub fn with_data(resources: Vec<Resource>, projects: Vec<Project>) -> Self {
        Self {
            resources: Mutex::new(Some(resources)),
            projects: Mutex::new(Some(projects)),
        }
    }
}

impl Store for MemoryStore {
    fn load_resources(&self) -> Vec<Resource> {
        lock(&self.resources)
            .clone()
            .unwrap_or_else(|| seed_resources(Utc::now().date_naive()))
    }

    fn load_projects(&self) -> Vec<Project> {
        lock(&self.projects).clone().unwrap_or_else(seed_projects)
    }

    fn save_resources(&self, resources: &[Resource]) -> Result<()> {
        *lock(&self.resources) = Some(resources.to_vec());
        Ok(())
    }

    fn save_projects(&self, projects: &[Project]) -> Result<()> {
        *lock(&self.projects) = Some(projects.to_vec());
        Ok(())
    }
}

/// Locks `slot`, recovering the data if a previous holder panicked.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Write JSON atomically (temp file, then rename).
fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Default project set.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project::new("p1", "E-commerce Web"),
        Project::new("p2", "Mobile App v2.0"),
        Project::new("p3", "Payment Gateway").with_status(ProjectStatus::Pending),
        Project::new("p4", "Admin Dashboard"),
    ]
}

/// Default team, with seed tasks dated `today`.
pub fn seed_resources(today: NaiveDate) -> Vec<Resource> {
    let today = format_date(today);
    let task = |id: &str, project: (&str, &str), name: &str, hours: f64, priority: Priority| {
        Task::new(id, name)
            .with_project(project.0, project.1)
            .with_hours(hours)
            .with_date(today.clone())
            .with_priority(priority)
    };

    vec![
        Resource::new("r1", "Sarah Chen", Role::Qa)
            .with_email("sarah.c@company.com")
            .with_avatar("https://picsum.photos/id/64/100/100")
            .with_task(task(
                "t1",
                ("p1", "E-commerce Web"),
                "Checkout Flow Regression",
                6.0,
                Priority::High,
            )),
        Resource::new("r2", "Marcus Johnson", Role::Qa)
            .with_email("marcus.j@company.com")
            .with_avatar("https://picsum.photos/id/91/100/100")
            .with_task(task("t3", ("p2", "Mobile App v2.0"), "Login Smoke Test", 4.0, Priority::High))
            .with_task(task(
                "t4",
                ("p2", "Mobile App v2.0"),
                "UI Glitch Verification",
                3.0,
                Priority::Low,
            )),
        Resource::new("r3", "Emily Davis", Role::Qa)
            .with_email("emily.d@company.com")
            .with_avatar("https://picsum.photos/id/177/100/100")
            .with_task(task(
                "t5",
                ("p4", "Admin Dashboard"),
                "Permission Testing",
                8.0,
                Priority::Medium,
            )),
        Resource::new("r4", "James Wilson", Role::Manager)
            .with_email("james.w@company.com")
            .with_avatar("https://picsum.photos/id/203/100/100"),
    ]
}
