//! Workload analysis collaborator.
//!
//! The engine hands an `Analyzer` a value snapshot of the visible active
//! resources and gets back a short textual assessment. Analyzers may call
//! out to external services; `run_analysis` absorbs every failure into a
//! neutral placeholder so nothing propagates to the caller.
//!
//! # Snapshot
//!
//! | Field | Source |
//! |-------|--------|
//! | name | resource name |
//! | role | resource role |
//! | totalHours | open (incomplete) task hours |
//! | capacity | weekly capacity |

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::{Resource, Role};

/// Per-resource figures an analyzer sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    pub name: String,
    pub role: Role,
    pub total_hours: f64,
    pub capacity: f64,
}

/// Analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub underutilized: Vec<String>,
    pub overloaded: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Placeholder when no analyzer is configured.
    pub fn unavailable() -> Self {
        Self {
            summary: "API Key missing. Cannot generate analysis.".to_string(),
            underutilized: Vec::new(),
            overloaded: Vec::new(),
            suggestions: vec!["Configure API Key to enable AI insights.".to_string()],
        }
    }

    /// Placeholder when the analyzer failed.
    pub fn failed() -> Self {
        Self {
            summary: "Failed to analyze data.".to_string(),
            underutilized: Vec::new(),
            overloaded: Vec::new(),
            suggestions: vec![
                "Check network connection.".to_string(),
                "Try again later.".to_string(),
            ],
        }
    }
}

/// Produces a workload assessment from a snapshot.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, snapshot: &[ResourceSnapshot]) -> Result<AnalysisResult>;
}

/// Snapshot of the active resources in `resources` (already filtered).
pub fn snapshot(resources: &[Resource]) -> Vec<ResourceSnapshot> {
    resources
        .iter()
        .filter(|r| r.is_active())
        .map(|r| ResourceSnapshot {
            name: r.name.clone(),
            role: r.role,
            total_hours: r.open_hours(),
            capacity: r.max_capacity,
        })
        .collect()
}

/// JSON payload for analyzers that talk to a remote service.
pub fn snapshot_json(snapshot: &[ResourceSnapshot]) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Runs `analyzer` over `resources`, never failing.
///
/// Returns `AnalysisResult::unavailable()` without an analyzer and
/// `AnalysisResult::failed()` if it errors.
pub fn run_analysis(analyzer: Option<&dyn Analyzer>, resources: &[Resource]) -> AnalysisResult {
    let Some(analyzer) = analyzer else {
        return AnalysisResult::unavailable();
    };
    match analyzer.analyze(&snapshot(resources)) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "workload analysis failed");
            AnalysisResult::failed()
        }
    }
}

/// Offline analyzer using flat weekly-hour cut-offs.
#[derive(Debug, Clone)]
pub struct ThresholdAnalyzer {
    /// Fewer open hours than this is underutilized.
    pub underutilized_hours: f64,
    /// More open hours than this is overloaded.
    pub overloaded_hours: f64,
}

impl Default for ThresholdAnalyzer {
    fn default() -> Self {
        Self {
            underutilized_hours: 20.0,
            overloaded_hours: 35.0,
        }
    }
}

const MAX_SUGGESTIONS: usize = 3;

impl Analyzer for ThresholdAnalyzer {
    fn analyze(&self, snapshot: &[ResourceSnapshot]) -> Result<AnalysisResult> {
        let underutilized: Vec<&ResourceSnapshot> = snapshot
            .iter()
            .filter(|s| s.total_hours < self.underutilized_hours)
            .collect();
        let overloaded: Vec<&ResourceSnapshot> = snapshot
            .iter()
            .filter(|s| s.total_hours > self.overloaded_hours)
            .collect();

        let total_hours: f64 = snapshot.iter().map(|s| s.total_hours).sum();
        let summary = if snapshot.is_empty() {
            "No active resources to analyze.".to_string()
        } else {
            format!(
                "{} active resources carry {:.1} open hours; {} underutilized, {} overloaded.",
                snapshot.len(),
                total_hours,
                underutilized.len(),
                overloaded.len()
            )
        };

        let mut suggestions = Vec::new();
        for (busy, free) in overloaded.iter().zip(underutilized.iter()) {
            suggestions.push(format!(
                "Move {:.1}h of work from {} to {}.",
                (busy.total_hours - self.overloaded_hours).max(0.0),
                busy.name,
                free.name
            ));
        }
        if suggestions.is_empty() && !overloaded.is_empty() {
            suggestions.push("Defer low-priority tasks for overloaded resources.".to_string());
        }
        if suggestions.is_empty() && !underutilized.is_empty() {
            suggestions.push("Assign upcoming work to underutilized resources first.".to_string());
        }
        if suggestions.is_empty() {
            suggestions.push("Workload is balanced; keep current assignments.".to_string());
        }
        suggestions.truncate(MAX_SUGGESTIONS);

        Ok(AnalysisResult {
            summary,
            underutilized: underutilized.iter().map(|s| s.name.clone()).collect(),
            overloaded: overloaded.iter().map(|s| s.name.clone()).collect(),
            suggestions,
        })
    }
}
