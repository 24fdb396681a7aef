//! Per-run aggregates and run history.
//!
//! A run is one operating window of the fleet. Closing a run produces a
//! summary and clears the per-run counters; learned state (value table,
//! failure grid) is deliberately retained. That retention is what lets the
//! fleet improve run over run.

use qtty::{Quantity, Second};

use crate::learning::MetricsSnapshot;
use crate::{generate_id, Id};

/// Transient counters for the current run. Reset at every run boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    pub tasks_completed: u32,
    /// Sum of route durations, seconds.
    pub total_duration: f64,
    pub total_energy: f64,
    pub total_failures: u32,
}

impl RunMetrics {
    /// Records one completed route.
    pub fn record_task(&mut self, duration: Quantity<Second>, energy: f64) {
        self.tasks_completed += 1;
        self.total_duration += duration.value();
        self.total_energy += energy;
    }

    /// Records one failure (stuck robot).
    pub fn record_failure(&mut self) {
        self.total_failures += 1;
    }

    /// Mean route duration in seconds; zero when nothing completed.
    pub fn avg_task_time(&self) -> f64 {
        if self.tasks_completed > 0 {
            self.total_duration / f64::from(self.tasks_completed)
        } else {
            0.0
        }
    }

    /// Clears all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Immutable summary of a closed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub run_id: Id,
    pub run_number: u32,
    pub tasks_completed: u32,
    /// Mean route duration, seconds.
    pub avg_task_time: f64,
    pub total_energy: f64,
    pub total_failures: u32,
    /// Higher is better: throughput discounted by time, energy, and failures.
    pub efficiency_score: f64,
    /// Learning state at close time.
    pub learning: MetricsSnapshot,
}

/// Tracks the current run and the history of closed runs.
#[derive(Debug, Clone)]
pub struct RunLedger {
    run_number: u32,
    metrics: RunMetrics,
    history: Vec<RunSummary>,
}

impl Default for RunLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLedger {
    /// Creates a ledger starting at run 1.
    pub fn new() -> Self {
        Self {
            run_number: 1,
            metrics: RunMetrics::default(),
            history: Vec::new(),
        }
    }

    /// The run number tasks are currently recorded under.
    pub fn run_number(&self) -> u32 {
        self.run_number
    }

    /// Counters for the current run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Mutable counters for the current run.
    pub fn metrics_mut(&mut self) -> &mut RunMetrics {
        &mut self.metrics
    }

    /// Closes the current run: summarizes it, appends it to history, resets
    /// the per-run counters, and advances the run number.
    pub fn close_run(&mut self, learning: MetricsSnapshot) -> RunSummary {
        let metrics = &self.metrics;
        let efficiency_score = if metrics.tasks_completed > 0 {
            f64::from(metrics.tasks_completed) * 100.0
                / ((metrics.avg_task_time() + 1.0)
                    * (metrics.total_energy + 1.0)
                    * (f64::from(metrics.total_failures) + 1.0))
        } else {
            0.0
        };

        let summary = RunSummary {
            run_id: generate_id(),
            run_number: self.run_number,
            tasks_completed: metrics.tasks_completed,
            avg_task_time: metrics.avg_task_time(),
            total_energy: metrics.total_energy,
            total_failures: metrics.total_failures,
            efficiency_score,
            learning,
        };

        self.history.push(summary.clone());
        self.run_number += 1;
        self.metrics.reset();
        summary
    }

    /// The most recent `n` closed runs, oldest first.
    pub fn recent(&self, n: usize) -> &[RunSummary] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// All closed runs, oldest first.
    pub fn history(&self) -> &[RunSummary] {
        &self.history
    }
}
