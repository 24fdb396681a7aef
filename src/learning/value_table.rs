//! Learned state-action values over zone transitions.

use std::collections::HashMap;

use qtty::{Quantity, Second};

use super::types::Transition;

/// Learned statistics for a single zone transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueEntry {
    /// Current value estimate for this transition.
    pub value: f64,
    /// Number of temporal-difference updates applied.
    pub visits: u64,
    /// Cumulative duration attributed to this transition, seconds.
    pub total_time: f64,
    /// Running average duration, seconds.
    pub avg_time: f64,
    /// Routes through this transition that completed successfully.
    pub successes: u64,
    /// Routes through this transition that failed.
    pub failures: u64,
}

impl ValueEntry {
    fn with_value(value: f64) -> Self {
        Self {
            value,
            visits: 0,
            total_time: 0.0,
            avg_time: 0.0,
            successes: 0,
            failures: 0,
        }
    }
}

/// Table of learned transition values.
///
/// Entries are synthesized on first reference with a neutral initial value,
/// so lookups never fail. The table deliberately outlives run boundaries:
/// it is the knowledge the engine accumulates.
#[derive(Debug, Clone)]
pub struct ValueTable {
    entries: HashMap<Transition, ValueEntry>,
    initial_value: f64,
}

impl ValueTable {
    /// Creates an empty table with the given neutral initial value.
    pub fn new(initial_value: f64) -> Self {
        Self {
            entries: HashMap::new(),
            initial_value,
        }
    }

    /// The neutral value assigned to transitions on first reference.
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Returns the entry for `origin -> dest`, creating it if absent.
    pub fn get(&mut self, origin: &str, dest: &str) -> &ValueEntry {
        self.entry_mut(origin, dest)
    }

    fn entry_mut(&mut self, origin: &str, dest: &str) -> &mut ValueEntry {
        let initial = self.initial_value;
        self.entries
            .entry(Transition::new(origin, dest))
            .or_insert_with(|| ValueEntry::with_value(initial))
    }

    /// Applies one temporal-difference update and returns the new value.
    ///
    /// `new = old + alpha * (reward + gamma * next_max - old)`
    ///
    /// The visit count increments with every update; timing and outcome
    /// statistics are recorded separately via
    /// [`ValueTable::record_observation`].
    pub fn update(
        &mut self,
        origin: &str,
        dest: &str,
        reward: f64,
        next_max: f64,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let entry = self.entry_mut(origin, dest);
        entry.value += alpha * (reward + gamma * next_max - entry.value);
        entry.visits += 1;
        entry.value
    }

    /// Records observed timing and outcome for a transition.
    ///
    /// Callers attribute half of a route's measured duration to each of its
    /// two legs; no finer-grained per-leg timing exists.
    pub fn record_observation(
        &mut self,
        origin: &str,
        dest: &str,
        elapsed: Quantity<Second>,
        success: bool,
    ) {
        let entry = self.entry_mut(origin, dest);
        entry.total_time += elapsed.value();
        if entry.visits > 0 {
            entry.avg_time = entry.total_time / entry.visits as f64;
        }
        if success {
            entry.successes += 1;
        } else {
            entry.failures += 1;
        }
    }

    /// Best value among transitions from `state` to the given candidates.
    ///
    /// Returns the neutral initial value when there are no candidates, so
    /// terminal legs bootstrap against neutral rather than zero.
    pub fn best_value_from(&mut self, state: &str, candidates: &[&str]) -> f64 {
        if candidates.is_empty() {
            return self.initial_value;
        }
        let mut best = f64::NEG_INFINITY;
        for candidate in candidates {
            best = best.max(self.get(state, candidate).value);
        }
        best
    }

    /// Number of distinct transitions ever referenced.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no transition has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all transitions and their entries.
    pub fn entries(&self) -> impl Iterator<Item = (&Transition, &ValueEntry)> {
        self.entries.iter()
    }

    /// Exports all entries for external snapshotting.
    pub fn export(&self) -> Vec<(Transition, ValueEntry)> {
        self.entries
            .iter()
            .map(|(t, e)| (t.clone(), *e))
            .collect()
    }

    /// Restores previously exported entries, replacing any duplicates.
    pub fn restore(&mut self, entries: Vec<(Transition, ValueEntry)>) {
        self.entries.extend(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ValueTable {
        ValueTable::new(50.0)
    }

    #[test]
    fn unseen_transition_gets_neutral_value() {
        let mut t = table();
        let entry = t.get("A", "B");
        assert_eq!(entry.value, 50.0);
        assert_eq!(entry.visits, 0);
    }

    #[test]
    fn update_applies_td_rule() {
        let mut t = table();
        let new = t.update("A", "B", 100.0, 50.0, 0.15, 0.9);
        // 50 + 0.15 * (100 + 0.9*50 - 50) = 64.25
        assert!((new - 64.25).abs() < 1e-10);
        assert_eq!(t.get("A", "B").visits, 1);
    }

    #[test]
    fn directions_are_independent() {
        let mut t = table();
        t.update("A", "B", 100.0, 50.0, 0.15, 0.9);
        assert_eq!(t.get("B", "A").value, 50.0);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn best_value_defaults_to_neutral_without_candidates() {
        let mut t = table();
        assert_eq!(t.best_value_from("A", &[]), 50.0);
    }

    #[test]
    fn best_value_picks_maximum_candidate() {
        let mut t = table();
        t.update("S", "X", 100.0, 50.0, 0.15, 0.9); // 64.25
        assert!((t.best_value_from("S", &["X", "Y"]) - 64.25).abs() < 1e-10);
    }

    #[test]
    fn observation_maintains_running_average() {
        let mut t = table();
        t.update("A", "B", 100.0, 50.0, 0.15, 0.9);
        t.record_observation("A", "B", Quantity::new(22.5), true);
        t.update("A", "B", 100.0, 50.0, 0.15, 0.9);
        t.record_observation("A", "B", Quantity::new(17.5), true);

        let entry = t.get("A", "B");
        assert_eq!(entry.visits, 2);
        assert!((entry.total_time - 40.0).abs() < 1e-10);
        assert!((entry.avg_time - 20.0).abs() < 1e-10);
        assert_eq!(entry.successes, 2);
    }

    #[test]
    fn failed_observation_tallied() {
        let mut t = table();
        t.update("A", "B", -35.0, 50.0, 0.15, 0.9);
        t.record_observation("A", "B", Quantity::new(30.0), false);
        let entry = t.get("A", "B");
        assert_eq!(entry.successes, 0);
        assert_eq!(entry.failures, 1);
    }

    #[test]
    fn export_restore_round_trips() {
        let mut t = table();
        t.update("A", "B", 100.0, 50.0, 0.15, 0.9);
        let exported = t.export();

        let mut restored = table();
        restored.restore(exported);
        assert_eq!(restored.len(), 1);
        assert!((restored.get("A", "B").value - 64.25).abs() < 1e-10);
    }
}
