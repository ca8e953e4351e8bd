//! Per-resource utilization and availability.
//!
//! # Capacity Normalization
//!
//! Capacity is stored as a weekly figure over a five-day week:
//!
//! ```text
//! daily      = weekly / 5
//! effective  = daily * days_in_range
//! pct        = open_hours / effective * 100     (100 when effective == 0)
//! ```
//!
//! # Availability
//!
//! | Condition | Availability |
//! |-----------|--------------|
//! | status Inactive | Inactive |
//! | pct > 90 | Overloaded |
//! | 50 ≤ pct ≤ 90 | Near Capacity |
//! | pct < 50 | Available |
//!
//! This is the per-card view. Team counts in `TeamMetrics` use flat hour
//! thresholds instead and are computed independently.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::Resource;

/// Availability classification of one resource card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    NearCapacity,
    Overloaded,
    Inactive,
}

impl Availability {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::NearCapacity => "Near Capacity",
            Availability::Overloaded => "Overloaded",
            Availability::Inactive => "Inactive (Ramped Down)",
        }
    }
}

/// Progress-bar band, finer than `Availability` at the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadBand {
    /// Under 40%.
    Low,
    Normal,
    /// Over 90%.
    High,
    /// Over 100%.
    Over,
    Inactive,
}

const LOAD_BAND_LOW_PCT: f64 = 40.0;
const LOAD_BAND_OVER_PCT: f64 = 100.0;

/// Utilization of a single resource over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    /// Weekly capacity / workdays.
    pub daily_capacity: f64,
    /// Daily capacity × days in range.
    pub effective_capacity: f64,
    /// Hours of incomplete tasks.
    pub active_hours: f64,
    /// Open hours as a percentage of effective capacity.
    pub utilization_pct: f64,
    pub availability: Availability,
    pub band: LoadBand,
}

impl Utilization {
    /// Computes utilization from the resource's (already filtered) tasks.
    pub fn calculate(resource: &Resource, days_in_range: u32, config: &PlannerConfig) -> Self {
        let daily_capacity = resource.max_capacity / config.workdays_per_week;
        let effective_capacity = daily_capacity * f64::from(days_in_range);
        let active_hours = resource.open_hours();

        let utilization_pct = if effective_capacity > 0.0 {
            active_hours / effective_capacity * 100.0
        } else {
            // No capacity at all reads as saturated
            100.0
        };

        let (availability, band) = if resource.is_active() {
            (
                classify(utilization_pct, config),
                band_for(utilization_pct, config),
            )
        } else {
            (Availability::Inactive, LoadBand::Inactive)
        };

        Self {
            daily_capacity,
            effective_capacity,
            active_hours,
            utilization_pct,
            availability,
            band,
        }
    }
}

/// Utilization with the default five-day week and thresholds.
pub fn compute_utilization(resource: &Resource, days_in_range: u32) -> Utilization {
    Utilization::calculate(resource, days_in_range, &PlannerConfig::default())
}

/// Classifies an active resource's utilization percentage.
pub fn classify(utilization_pct: f64, config: &PlannerConfig) -> Availability {
    let t = &config.thresholds;
    if utilization_pct > t.overloaded_pct {
        Availability::Overloaded
    } else if utilization_pct >= t.near_capacity_pct {
        Availability::NearCapacity
    } else {
        Availability::Available
    }
}

fn band_for(utilization_pct: f64, config: &PlannerConfig) -> LoadBand {
    if utilization_pct > LOAD_BAND_OVER_PCT {
        LoadBand::Over
    } else if utilization_pct > config.thresholds.overloaded_pct {
        LoadBand::High
    } else if utilization_pct < LOAD_BAND_LOW_PCT {
        LoadBand::Low
    } else {
        LoadBand::Normal
    }
}
