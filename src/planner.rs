//! Planner: the single writer over the current collections.
//!
//! Holds resources and projects behind a mutex. Every change goes through
//! `dispatch` or `import`: the pure reducer runs on the current snapshot,
//! the result is persisted, and only then swapped in. Concurrent callers
//! are serialized by the lock; reads clone a snapshot and release it.
//!
//! # Example
//!
//! ```
//! use u_allocate::models::{Caller, DateRange, Role};
//! use u_allocate::mutation::Action;
//! use u_allocate::engine::ViewQuery;
//! use u_allocate::planner::Planner;
//! use u_allocate::storage::MemoryStore;
//! use u_allocate::config::PlannerConfig;
//!
//! let planner = Planner::open(MemoryStore::with_data(vec![], vec![]), PlannerConfig::default());
//! let admin = Caller::admin();
//! planner
//!     .dispatch(&admin, &Action::AddResource {
//!         name: "Ann Lee".into(),
//!         role: Role::Qa,
//!         email: "ann.lee@company.com".into(),
//!         billable: true,
//!     })
//!     .unwrap();
//!
//! let view = planner.view(&ViewQuery::new(admin, DateRange::today()));
//! assert_eq!(view.cards.len(), 1);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::analysis::{run_analysis, AnalysisResult, Analyzer};
use crate::config::PlannerConfig;
use crate::engine::{compute_view, compute_visible_resources, DashboardView, ViewQuery};
use crate::error::Result;
use crate::import::{import_csv, ImportReport};
use crate::models::{AccessLevel, Caller, Project, Resource};
use crate::mutation::{apply, Action};
use crate::storage::Store;

#[derive(Debug, Clone, Default)]
struct State {
    resources: Vec<Resource>,
    projects: Vec<Project>,
}

/// Current collections plus the store they persist to.
pub struct Planner<S: Store> {
    store: S,
    config: PlannerConfig,
    state: Mutex<State>,
}

impl<S: Store> Planner<S> {
    /// Loads the collections from `store`.
    pub fn open(store: S, config: PlannerConfig) -> Self {
        let state = State {
            resources: store.load_resources(),
            projects: store.load_projects(),
        };
        info!(
            resources = state.resources.len(),
            projects = state.projects.len(),
            "planner opened"
        );
        Self {
            store,
            config,
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of all resources.
    pub fn resources(&self) -> Vec<Resource> {
        self.lock().resources.clone()
    }

    /// Snapshot of all projects.
    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    /// Signs in against the current resources.
    pub fn login(&self, access: AccessLevel, resource_id: Option<&str>) -> Option<Caller> {
        Caller::login(access, resource_id, &self.lock().resources)
    }

    /// Applies `action` and persists the result.
    ///
    /// Rejected actions leave the collections untouched and skip the save.
    /// If saving fails the in-memory state is not changed either.
    pub fn dispatch(&self, caller: &Caller, action: &Action) -> Result<Vec<Resource>> {
        let mut state = self.lock();
        let next = apply(&state.resources, caller, action);
        if next == state.resources {
            debug!(action = action.name(), "no change, skipping save");
            return Ok(next);
        }

        self.store.save_resources(&next)?;
        state.resources = next.clone();
        Ok(next)
    }

    /// Imports assignment rows and persists both collections.
    ///
    /// Projects are saved before resources so stored tasks never reference
    /// an unsaved project. The two saves are not atomic together: if the
    /// resource save fails, the new projects stay (in the store and in
    /// memory) and the resources are left as they were.
    pub fn import(&self, text: &str) -> Result<ImportReport> {
        let mut state = self.lock();
        let outcome = import_csv(text, &state.resources, &state.projects, &self.config);

        if outcome.report.projects_created > 0 {
            self.store.save_projects(&outcome.projects)?;
            state.projects = outcome.projects;
        }
        if outcome.resources != state.resources {
            self.store.save_resources(&outcome.resources)?;
            state.resources = outcome.resources;
        }
        Ok(outcome.report)
    }

    /// Dashboard view for `query`.
    pub fn view(&self, query: &ViewQuery) -> DashboardView {
        let resources = self.resources();
        compute_view(&resources, query, &self.config)
    }

    /// Runs `analyzer` over the resources visible to `query`.
    pub fn analyze(&self, query: &ViewQuery, analyzer: Option<&dyn Analyzer>) -> AnalysisResult {
        let visible = compute_visible_resources(&self.resources(), query);
        run_analysis(analyzer, &visible)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ThresholdAnalyzer;
    use crate::error::Error;
    use crate::models::{DateRange, Role};
    use crate::storage::{seed_projects, seed_resources, MemoryStore};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::thread;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn seeded() -> Planner<MemoryStore> {
        let store = MemoryStore::with_data(seed_resources(day()), seed_projects());
        Planner::open(store, PlannerConfig::default())
    }

    fn range() -> DateRange {
        DateRange::single("2024-03-20")
    }

    /// Store whose saves always fail.
    struct ReadOnly(MemoryStore);

    impl Store for ReadOnly {
        fn load_resources(&self) -> Vec<Resource> {
            self.0.load_resources()
        }
        fn load_projects(&self) -> Vec<Project> {
            self.0.load_projects()
        }
        fn save_resources(&self, _resources: &[Resource]) -> Result<()> {
            Err(Error::Io(std::io::Error::other("read-only")))
        }
        fn save_projects(&self, _projects: &[Project]) -> Result<()> {
            Err(Error::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_dispatch_persists() {
        let planner = seeded();
        let action = Action::ToggleResourceStatus {
            resource_id: "r1".into(),
        };
        let next = planner.dispatch(&Caller::admin(), &action).unwrap();
        assert!(!next[0].is_active());
        assert!(!planner.store().load_resources()[0].is_active());
        assert_eq!(planner.resources(), next);
    }

    #[test]
    fn test_rejected_action_keeps_state() {
        let planner = seeded();
        let before = planner.resources();
        let action = Action::ToggleBillable {
            resource_id: "r1".into(),
        };
        let next = planner.dispatch(&Caller::viewer("r1"), &action).unwrap();
        assert_eq!(next, before);
    }

    #[test]
    fn test_failed_save_leaves_state() {
        let store = ReadOnly(MemoryStore::with_data(seed_resources(day()), seed_projects()));
        let planner = Planner::open(store, PlannerConfig::default());
        let before = planner.resources();
        let action = Action::UpdateCapacity {
            resource_id: "r1".into(),
            capacity: 10.0,
        };
        assert!(planner.dispatch(&Caller::admin(), &action).is_err());
        assert_eq!(planner.resources(), before);
    }

    /// Store that keeps projects but cannot save resources.
    struct ProjectsOnly(MemoryStore);

    impl Store for ProjectsOnly {
        fn load_resources(&self) -> Vec<Resource> {
            self.0.load_resources()
        }
        fn load_projects(&self) -> Vec<Project> {
            self.0.load_projects()
        }
        fn save_resources(&self, _resources: &[Resource]) -> Result<()> {
            Err(Error::Io(std::io::Error::other("disk full")))
        }
        fn save_projects(&self, projects: &[Project]) -> Result<()> {
            self.0.save_projects(projects)
        }
    }

    #[test]
    fn test_import_partial_save_matches_store() {
        let store = ProjectsOnly(MemoryStore::with_data(seed_resources(day()), seed_projects()));
        let planner = Planner::open(store, PlannerConfig::default());
        let before = planner.resources();

        let result = planner.import("Ann Lee, Designer, Website Revamp, Wireframes, 2024-03-20, 5");
        assert!(result.is_err());
        assert_eq!(planner.resources(), before);
        assert_eq!(planner.projects(), planner.store().load_projects());
        assert_eq!(planner.projects().len(), 5);
    }

    #[test]
    fn test_import_updates_both_collections() {
        let planner = seeded();
        let report = planner
            .import("Ann Lee, Designer, Website Revamp, Wireframes, 2024-03-20, 5, High")
            .unwrap();
        assert_eq!(report.tasks_created, 1);
        assert_eq!(planner.projects().len(), 5);
        assert_eq!(planner.store().load_projects().len(), 5);
        assert_eq!(planner.store().load_resources().len(), 5);
    }

    #[test]
    fn test_viewer_sees_only_self() {
        let planner = seeded();
        let caller = planner.login(AccessLevel::Viewer, Some("r2")).unwrap();
        let view = planner.view(&ViewQuery::new(caller, range()));
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].resource.id, "r2");
        assert!(planner.login(AccessLevel::Viewer, Some("nobody")).is_none());
    }

    #[test]
    fn test_analyze_visible_only() {
        let planner = seeded();
        let query = ViewQuery::new(Caller::viewer("r3"), range());
        let result = planner.analyze(&query, Some(&ThresholdAnalyzer::default()));
        assert_eq!(result.underutilized, vec!["Emily Davis".to_string()]);
        assert_eq!(planner.analyze(&query, None), AnalysisResult::unavailable());
    }

    #[test]
    fn test_concurrent_dispatch_serialized() {
        let planner = Arc::new(Planner::open(
            MemoryStore::with_data(vec![], vec![]),
            PlannerConfig::default(),
        ));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let planner = Arc::clone(&planner);
                thread::spawn(move || {
                    let action = Action::AddResource {
                        name: format!("Person {i}"),
                        role: Role::Developer,
                        email: format!("p{i}@company.com"),
                        billable: true,
                    };
                    planner.dispatch(&Caller::admin(), &action).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(planner.resources().len(), 8);
        assert_eq!(planner.store().load_resources().len(), 8);
    }
}
