//! Best-effort narrative analysis of run history.
//!
//! The engine can hand its run history to an analyst (typically a remote
//! language-model backend) for free-text recommendations. The analyst is
//! always optional: failures degrade to "no analysis available" and never
//! disturb the decision path. [`HeuristicAnalyst`] is a local fallback that
//! reads the efficiency trend directly.

use std::fmt;

use thiserror::Error;

use crate::learning::MetricsSnapshot;
use crate::run::RunSummary;

/// Direction the fleet's efficiency is moving across recent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Degrading => write!(f, "degrading"),
        }
    }
}

/// Recommendations produced from run history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    pub recommendations: Vec<String>,
    pub trend: Trend,
}

/// Why an analyst could not produce an analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis backend unavailable")]
    Unavailable,

    #[error("analysis backend failed: {0}")]
    Backend(String),

    #[error("not enough run history to analyze")]
    InsufficientHistory,
}

/// Produces recommendations from recent run summaries.
pub trait RunAnalyst: Send + Sync {
    /// Analyzes recent runs together with the current learning snapshot.
    fn analyze(
        &self,
        history: &[RunSummary],
        learning: &MetricsSnapshot,
    ) -> Result<Analysis, AnalysisError>;

    /// Returns a human-readable name for this analyst.
    fn name(&self) -> &str;
}

/// Local analyst reading the efficiency-score trend.
///
/// Stands in when no remote backend is configured, so hosts always have a
/// working analysis path.
#[derive(Debug, Default)]
pub struct HeuristicAnalyst;

impl RunAnalyst for HeuristicAnalyst {
    fn analyze(
        &self,
        history: &[RunSummary],
        learning: &MetricsSnapshot,
    ) -> Result<Analysis, AnalysisError> {
        if history.len() < 2 {
            return Err(AnalysisError::InsufficientHistory);
        }
        let prev = &history[history.len() - 2];
        let last = &history[history.len() - 1];

        let delta = last.efficiency_score - prev.efficiency_score;
        let trend = if delta > 0.05 {
            Trend::Improving
        } else if delta < -0.05 {
            Trend::Degrading
        } else {
            Trend::Stable
        };

        let mut recommendations = Vec::new();
        if last.total_failures > prev.total_failures {
            recommendations
                .push("Failure count rising: review the failure grid for degraded aisles".into());
        }
        if last.avg_task_time > 60.0 {
            recommendations.push(format!(
                "Average route takes {:.1}s, above the 60s target: rebalance zone assignments",
                last.avg_task_time
            ));
        }
        if learning.total_experience > 0 && learning.success_rate < 0.8 {
            recommendations
                .push("Success rate below 80%: routes may cross degraded floor areas".into());
        }
        if recommendations.is_empty() {
            recommendations.push("Fleet performing within targets: keep current policy".into());
        }

        Ok(Analysis {
            recommendations,
            trend,
        })
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
