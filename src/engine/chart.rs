//! Chart series and task history.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::{Resource, Task};

/// Bar colour band in the workload chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartBand {
    /// Above the cap line.
    Over,
    /// Below half the cap line.
    Under,
    Normal,
}

/// One bar of the workload chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadBar {
    pub resource_id: String,
    /// First name, for compact axis labels.
    pub label: String,
    /// Open task hours.
    pub hours: f64,
    /// Cap line: team daily hours × days.
    pub cap: f64,
    pub band: ChartBand,
}

/// Builds chart bars for the (filtered) resources, in input order.
///
/// Uses the flat team daily hours, not per-resource capacity.
pub fn workload_series(resources: &[Resource], days_in_range: u32, config: &PlannerConfig) -> Vec<WorkloadBar> {
    let cap = config.team_daily_hours * f64::from(days_in_range);
    let under = cap / 2.0;

    resources
        .iter()
        .map(|r| {
            let hours = r.open_hours();
            let band = if hours > cap {
                ChartBand::Over
            } else if hours < under {
                ChartBand::Under
            } else {
                ChartBand::Normal
            };
            WorkloadBar {
                resource_id: r.id.clone(),
                label: r.first_name().to_string(),
                hours,
                cap,
                band,
            }
        })
        .collect()
}

/// Completed tasks of a resource, newest date first.
///
/// Reads the full task list, not a range-filtered one.
pub fn task_history(resource: &Resource) -> Vec<&Task> {
    let mut done: Vec<&Task> = resource.tasks.iter().filter(|t| t.completed).collect();
    done.sort_by(|a, b| b.date.cmp(&a.date));
    done
}
