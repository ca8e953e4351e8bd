//! Allocation engine.
//!
//! Pure functions turning a resource collection and a `ViewQuery` into the
//! dashboard view: filtered resources, per-resource utilization, team
//! metrics, and sorted cards.
//!
//! # Pipeline
//!
//! ```text
//! resources ─▶ compute_visible_resources ─▶ Utilization (per card)
//!                                       └─▶ TeamMetrics (header)
//!                                       └─▶ sort_resources
//! ```
//!
//! # Two classifications
//!
//! Cards are classified by percentage of each resource's own capacity;
//! team counts use flat hours per day. They can disagree for the same
//! person and are intentionally computed independently.
//!
//! Every function here is total: empty collections, single-day ranges and
//! zero capacities never panic.

mod chart;
mod filter;
mod kpi;
mod query;
mod sort;
mod utilization;

pub use chart::{task_history, workload_series, ChartBand, WorkloadBar};
pub use filter::{compute_visible_resources, filtered_tasks};
pub use kpi::{compute_team_metrics, TeamMetrics};
pub use query::{PriorityFilter, SortKey, ViewQuery};
pub use sort::{sort_resources, sorted_resources};
pub use utilization::{classify, compute_utilization, Availability, LoadBand, Utilization};

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::Resource;

/// A resource card: the narrowed resource and its utilization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCard {
    pub resource: Resource,
    pub utilization: Utilization,
}

/// Everything the dashboard renders for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub days_in_range: u32,
    /// Sorted cards.
    pub cards: Vec<ResourceCard>,
    pub metrics: TeamMetrics,
    pub chart: Vec<WorkloadBar>,
}

/// Computes the full dashboard view.
pub fn compute_view(resources: &[Resource], query: &ViewQuery, config: &PlannerConfig) -> DashboardView {
    let days = query.days();
    let mut visible = compute_visible_resources(resources, query);

    let metrics = TeamMetrics::calculate(&visible, days, config);
    let chart = workload_series(&visible, days, config);

    sort_resources(&mut visible, query.sort_key);
    let cards = visible
        .into_iter()
        .map(|resource| ResourceCard {
            utilization: Utilization::calculate(&resource, days, config),
            resource,
        })
        .collect();

    tracing::debug!(
        days,
        visible = metrics.total_visible,
        utilization_rate = metrics.utilization_rate,
        "computed dashboard view"
    );

    DashboardView {
        days_in_range: days,
        cards,
        metrics,
        chart,
    }
}
