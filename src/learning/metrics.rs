//! Aggregate efficiency metrics derived from the value table.

use std::fmt;

use super::value_table::ValueTable;

/// A point-in-time view of what the engine has learned.
///
/// Capturing a snapshot never mutates engine state; two captures with no
/// intervening updates are identical.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// Distinct transitions ever referenced.
    pub routes_learned: usize,
    /// Mean learned value across all transitions; neutral for an empty table.
    pub average_value: f64,
    /// Total temporal-difference updates across all transitions.
    pub total_experience: u64,
    /// Fraction of observations that succeeded; zero when nothing observed.
    pub success_rate: f64,
    /// Configured exploration probability, reported for transparency.
    pub exploration_rate: f64,
}

impl MetricsSnapshot {
    /// Captures current aggregates from the value table.
    pub fn capture(table: &ValueTable, epsilon: f64) -> Self {
        let routes_learned = table.len();
        let average_value = if routes_learned > 0 {
            table.entries().map(|(_, e)| e.value).sum::<f64>() / routes_learned as f64
        } else {
            table.initial_value()
        };
        let total_experience: u64 = table.entries().map(|(_, e)| e.visits).sum();
        let total_successes: u64 = table.entries().map(|(_, e)| e.successes).sum();
        let success_rate = if total_experience > 0 {
            total_successes as f64 / total_experience as f64
        } else {
            0.0
        };

        Self {
            routes_learned,
            average_value,
            total_experience,
            success_rate,
            exploration_rate: epsilon,
        }
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Learning Metrics ===")?;
        writeln!(f, "  Routes learned:    {}", self.routes_learned)?;
        writeln!(f, "  Average value:     {:.2}", self.average_value)?;
        writeln!(f, "  Total experience:  {}", self.total_experience)?;
        writeln!(f, "  Success rate:      {:.1}%", self.success_rate * 100.0)?;
        writeln!(
            f,
            "  Exploration rate:  {:.0}%",
            self.exploration_rate * 100.0
        )
    }
}
