//! Team-level workload metrics.
//!
//! Aggregates the filtered, visible resource set into the numbers shown
//! in the dashboard header.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total capacity | active resources × 8h × days |
//! | Allocated hours | open task hours of active resources |
//! | Utilization rate | round(allocated / capacity × 100), 0 without capacity |
//! | Underutilized | active resources with open hours < 4h × days |
//! | Overloaded | active resources with open hours > 7h × days |
//! | Balanced | active − underutilized − overloaded |
//!
//! The hour thresholds are flat and ignore each resource's own weekly
//! capacity, unlike the per-card percentage classification. Both views
//! are kept side by side.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::Resource;

/// Dashboard header metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics {
    /// Days in the selected range.
    pub days_in_range: u32,
    /// Visible resources (any status).
    pub total_visible: usize,
    pub total_active: usize,
    pub inactive_count: usize,
    /// Active billable resources.
    pub billable_count: usize,
    /// Active non-billable resources.
    pub non_billable_count: usize,
    /// Active resources × team daily hours × days.
    pub total_capacity_hours: f64,
    /// Open task hours of active resources.
    pub allocated_hours: f64,
    pub completed_task_count: usize,
    pub completed_hours: f64,
    pub pending_task_count: usize,
    /// Rounded percentage of capacity allocated.
    pub utilization_rate: u32,
    /// Open-hours threshold below which a resource is underutilized.
    pub underutilized_threshold: f64,
    /// Open-hours threshold above which a resource is overloaded.
    pub overloaded_threshold: f64,
    pub underutilized_count: usize,
    pub overloaded_count: usize,
    pub balanced_count: usize,
}

impl TeamMetrics {
    /// Computes metrics from an already-filtered resource set.
    ///
    /// Task counts (completed/pending) cover every visible resource;
    /// capacity and hour-threshold figures cover active resources only.
    pub fn calculate(visible: &[Resource], days_in_range: u32, config: &PlannerConfig) -> Self {
        let days = f64::from(days_in_range);
        let active: Vec<&Resource> = visible.iter().filter(|r| r.is_active()).collect();

        let total_active = active.len();
        let billable_count = active.iter().filter(|r| r.billable).count();
        let total_capacity_hours = total_active as f64 * config.team_daily_hours * days;
        let allocated_hours: f64 = active.iter().map(|r| r.open_hours()).sum();

        let mut completed_task_count = 0;
        let mut completed_hours = 0.0;
        let mut pending_task_count = 0;
        for task in visible.iter().flat_map(|r| r.tasks.iter()) {
            if task.completed {
                completed_task_count += 1;
                completed_hours += task.hours;
            } else {
                pending_task_count += 1;
            }
        }

        let utilization_rate = if total_capacity_hours > 0.0 {
            (allocated_hours / total_capacity_hours * 100.0).round().max(0.0) as u32
        } else {
            0
        };

        let underutilized_threshold = config.thresholds.underutilized_hours_per_day * days;
        let overloaded_threshold = config.thresholds.overloaded_hours_per_day * days;
        let underutilized_count = active
            .iter()
            .filter(|r| r.open_hours() < underutilized_threshold)
            .count();
        let overloaded_count = active
            .iter()
            .filter(|r| r.open_hours() > overloaded_threshold)
            .count();

        Self {
            days_in_range,
            total_visible: visible.len(),
            total_active,
            inactive_count: visible.len() - total_active,
            billable_count,
            non_billable_count: total_active - billable_count,
            total_capacity_hours,
            allocated_hours,
            completed_task_count,
            completed_hours,
            pending_task_count,
            utilization_rate,
            underutilized_threshold,
            overloaded_threshold,
            underutilized_count,
            overloaded_count,
            balanced_count: total_active
                .saturating_sub(underutilized_count)
                .saturating_sub(overloaded_count),
        }
    }
}

/// Team metrics with the default thresholds.
pub fn compute_team_metrics(visible: &[Resource], days_in_range: u32) -> TeamMetrics {
    TeamMetrics::calculate(visible, days_in_range, &PlannerConfig::default())
}
