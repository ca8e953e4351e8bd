//! Planner configuration.
//!
//! Thresholds and defaults used by the engine and the import resolver,
//! loaded from a TOML file. Every field has a default, so an empty file
//! (or no file) yields the standard dashboard behavior.
//!
//! ```toml
//! workdays_per_week = 5
//! team_daily_hours = 8
//!
//! [thresholds]
//! overloaded_pct = 90
//! near_capacity_pct = 50
//! underutilized_hours_per_day = 4
//! overloaded_hours_per_day = 7
//!
//! [import]
//! default_role = "QA"
//! default_capacity = 40
//! email_domain = "company.com"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Role;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Workdays in a capacity week; daily capacity = weekly / this.
    #[serde(default = "default_workdays_per_week")]
    pub workdays_per_week: f64,

    /// Flat per-person daily hours used for team-level capacity.
    #[serde(default = "default_team_daily_hours")]
    pub team_daily_hours: f64,

    /// Classification thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Defaults applied to records created by import or add.
    #[serde(default)]
    pub import: ImportConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            workdays_per_week: default_workdays_per_week(),
            team_daily_hours: default_team_daily_hours(),
            thresholds: ThresholdConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

fn default_workdays_per_week() -> f64 {
    5.0
}

fn default_team_daily_hours() -> f64 {
    8.0
}

/// Classification thresholds.
///
/// The percentage pair drives per-resource availability; the hours pair
/// drives the team-level under/overloaded counts. They are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Utilization strictly above this is Overloaded.
    #[serde(default = "default_overloaded_pct")]
    pub overloaded_pct: f64,

    /// Utilization at or above this (and not overloaded) is Near Capacity.
    #[serde(default = "default_near_capacity_pct")]
    pub near_capacity_pct: f64,

    /// Open hours strictly below this × days count as underutilized.
    #[serde(default = "default_underutilized_hours_per_day")]
    pub underutilized_hours_per_day: f64,

    /// Open hours strictly above this × days count as overloaded.
    #[serde(default = "default_overloaded_hours_per_day")]
    pub overloaded_hours_per_day: f64,
}

fn default_overloaded_pct() -> f64 {
    90.0
}

fn default_near_capacity_pct() -> f64 {
    50.0
}

fn default_underutilized_hours_per_day() -> f64 {
    4.0
}

fn default_overloaded_hours_per_day() -> f64 {
    7.0
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            overloaded_pct: default_overloaded_pct(),
            near_capacity_pct: default_near_capacity_pct(),
            underutilized_hours_per_day: default_underutilized_hours_per_day(),
            overloaded_hours_per_day: default_overloaded_hours_per_day(),
        }
    }
}

/// Defaults for newly created resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Role given to imported resources with an empty or unknown role.
    #[serde(default = "default_role")]
    pub default_role: Role,

    /// Weekly capacity of newly created resources.
    #[serde(default = "default_capacity")]
    pub default_capacity: f64,

    /// Domain used when synthesizing emails for imported resources.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_role() -> Role {
    Role::Qa
}

fn default_capacity() -> f64 {
    40.0
}

fn default_email_domain() -> String {
    "company.com".to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            default_capacity: default_capacity(),
            email_domain: default_email_domain(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PlannerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists and is valid, or return defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                Self::default()
            }
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.workdays_per_week > 0.0) {
            return Err(Error::InvalidConfig(
                "workdays_per_week must be positive".to_string(),
            ));
        }
        if self.team_daily_hours < 0.0 {
            return Err(Error::InvalidConfig(
                "team_daily_hours cannot be negative".to_string(),
            ));
        }
        self.thresholds.validate()?;
        if self.import.default_capacity < 0.0 {
            return Err(Error::InvalidConfig(
                "import.default_capacity cannot be negative".to_string(),
            ));
        }
        if self.import.email_domain.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "import.email_domain cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ThresholdConfig {
    fn validate(&self) -> Result<()> {
        if self.near_capacity_pct > self.overloaded_pct {
            return Err(Error::InvalidConfig(format!(
                "thresholds.near_capacity_pct ({}) exceeds overloaded_pct ({})",
                self.near_capacity_pct, self.overloaded_pct
            )));
        }
        if self.underutilized_hours_per_day > self.overloaded_hours_per_day {
            return Err(Error::InvalidConfig(format!(
                "thresholds.underutilized_hours_per_day ({}) exceeds overloaded_hours_per_day ({})",
                self.underutilized_hours_per_day, self.overloaded_hours_per_day
            )));
        }
        Ok(())
    }
}
