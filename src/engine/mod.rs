//! The advisor engine facade.
//!
//! [`FleetAdvisor`] owns every piece of shared mutable state (value table,
//! congestion counters, failure grid, run ledger, policy RNG) behind one
//! lock, and is the entry point hosts call. Every operation locks, mutates,
//! and returns in bounded time; nothing blocks on another robot's request.

pub mod error;


use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::analysis::{Analysis, RunAnalyst};
use crate::congestion::CongestionTracker;
use crate::failure_map::{FailureMap, GRID_SIZE};
use crate::learning::{
    EpsilonGreedy, Learner, LearningConfig, MetricsSnapshot, TaskOutcome, Transition, ValueEntry,
    ValueTable, ZonePolicy,
};
use crate::run::{RunLedger, RunSummary};
use crate::zones::{Position, ZoneSpec};

pub use error::AdvisorError;

/// Everything the advisor mutates, guarded as one unit so run-boundary
/// resets cannot interleave with in-flight updates.
struct EngineState {
    table: ValueTable,
    congestion: CongestionTracker,
    failures: FailureMap,
    policy: Box<dyn ZonePolicy>,
    runs: RunLedger,
}

/// Online zone-allocation advisor for a warehouse robot fleet.
///
/// Learned state (value table, failure grid) lives for the advisor's
/// lifetime and survives run boundaries; per-run counters and congestion
/// are cleared by [`FleetAdvisor::end_run`].
///
/// # Lifecycle
///
/// 1. Construct with [`FleetAdvisor::new`] (configuration + RNG seed).
/// 2. Robots call [`FleetAdvisor::select_target`] for their next zone, then
///    report completions via [`FleetAdvisor::absorb_task_outcome`] and stuck
///    events via [`FleetAdvisor::report_stuck`].
/// 3. A run coordinator calls [`FleetAdvisor::end_run`] at run boundaries.
pub struct FleetAdvisor {
    config: LearningConfig,
    state: Mutex<EngineState>,
}

impl FleetAdvisor {
    /// Creates an advisor with the epsilon-greedy policy.
    pub fn new(config: LearningConfig, seed: u64) -> Self {
        let policy = Box::new(EpsilonGreedy::new(&config, seed));
        Self::with_policy(config, policy)
    }

    /// Creates an advisor with a custom selection policy.
    pub fn with_policy(config: LearningConfig, policy: Box<dyn ZonePolicy>) -> Self {
        let state = EngineState {
            table: ValueTable::new(config.initial_value),
            congestion: CongestionTracker::new(),
            failures: FailureMap::new(),
            policy,
            runs: RunLedger::new(),
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Chooses the next target zone for a robot at `origin` and reserves it.
    ///
    /// # Errors
    ///
    /// [`AdvisorError::NoCandidates`] if `candidates` is empty.
    pub fn select_target(
        &self,
        origin: &str,
        candidates: &[ZoneSpec],
    ) -> Result<ZoneSpec, AdvisorError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let index = state
            .policy
            .choose(origin, candidates, &mut state.table, &state.congestion)?;
        let chosen = candidates[index].clone();
        state.congestion.adjust(&chosen.id, 1);
        tracing::debug!(
            "Selected {} for robot at {} ({})",
            chosen.id,
            origin,
            state.policy.name()
        );
        Ok(chosen)
    }

    /// Learns from one completed route and releases its zone reservations.
    pub fn absorb_task_outcome(&self, outcome: &TaskOutcome) {
        let mut guard = self.lock();
        let state = &mut *guard;
        let reward = Learner::absorb(
            outcome,
            &mut state.table,
            &mut state.congestion,
            &self.config,
        );
        state
            .runs
            .metrics_mut()
            .record_task(outcome.duration, outcome.energy_used);
        tracing::info!(
            "Route {}->{}->{} done in {:.1}s (reward {:.1})",
            outcome.pickup,
            outcome.shelf,
            outcome.delivery,
            outcome.duration.value(),
            reward
        );
    }

    /// Records a failure of the given severity at a world position.
    pub fn register_failure(&self, position: Position, severity: u32) {
        let mut state = self.lock();
        state.failures.register(position, severity);
        state.runs.metrics_mut().record_failure();
        tracing::warn!("Failure at {} (severity {})", position, severity);
    }

    /// Records a stuck robot with the configured default severity.
    pub fn report_stuck(&self, position: Position) {
        self.register_failure(position, self.config.stuck_severity);
    }

    /// Manually adjusts a zone's occupancy. Returns the new count.
    pub fn adjust_congestion(&self, zone: &str, delta: i32) -> u32 {
        self.lock().congestion.adjust(zone, delta)
    }

    /// Current occupancy for a zone.
    pub fn congestion(&self, zone: &str) -> u32 {
        self.lock().congestion.get(zone)
    }

    /// Captures current learning metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::capture(&self.lock().table, self.config.epsilon)
    }

    /// Copy of the raw failure grid for external consumers.
    pub fn failure_cells(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        *self.lock().failures.cells()
    }

    /// Closes the current run and returns its summary.
    ///
    /// Per-run counters and congestion are cleared; the value table and
    /// failure grid are retained.
    pub fn end_run(&self) -> RunSummary {
        let mut guard = self.lock();
        let state = &mut *guard;
        let learning = MetricsSnapshot::capture(&state.table, self.config.epsilon);
        let summary = state.runs.close_run(learning);
        state.congestion.clear();
        tracing::info!(
            "Run #{} closed: {} tasks, efficiency {:.3}",
            summary.run_number,
            summary.tasks_completed,
            summary.efficiency_score
        );
        summary
    }

    /// The run number tasks are currently recorded under.
    pub fn run_number(&self) -> u32 {
        self.lock().runs.run_number()
    }

    /// Summaries of the most recent `n` closed runs, oldest first.
    pub fn recent_runs(&self, n: usize) -> Vec<RunSummary> {
        self.lock().runs.recent(n).to_vec()
    }

    /// Exports all learned transition entries for external snapshotting.
    pub fn export_values(&self) -> Vec<(Transition, ValueEntry)> {
        self.lock().table.export()
    }

    /// Restores previously exported transition entries.
    pub fn restore_values(&self, entries: Vec<(Transition, ValueEntry)>) {
        self.lock().table.restore(entries);
    }

    /// Runs a best-effort analysis over recent run history.
    ///
    /// The engine lock is released before the analyst runs, so a slow or
    /// failing analyst cannot stall allocation. Analyst failures become
    /// `None`.
    pub fn analyze_with(&self, analyst: &dyn RunAnalyst) -> Option<Analysis> {
        let (history, learning) = {
            let state = self.lock();
            (
                state.runs.recent(3).to_vec(),
                MetricsSnapshot::capture(&state.table, self.config.epsilon),
            )
        };
        match analyst.analyze(&history, &learning) {
            Ok(analysis) => Some(analysis),
            Err(err) => {
                tracing::warn!("Analysis unavailable ({}): {}", analyst.name(), err);
                None
            }
        }
    }

    /// The advisor's configuration.
    pub fn config(&self) -> &LearningConfig {
        &self.config
    }
}
