//! Absorbs completed task outcomes into the value table.

use qtty::Quantity;

use crate::congestion::CongestionTracker;

use super::config::LearningConfig;
use super::reward::RewardModel;
use super::types::TaskOutcome;
use super::value_table::ValueTable;

/// Applies the learning step for completed pickup→shelf→delivery routes.
pub struct Learner;

impl Learner {
    /// Absorbs one task outcome.
    ///
    /// One reward covers the whole route and is applied to both legs:
    /// pickup→shelf bootstraps against the shelf→delivery value (its only
    /// successor candidate), while the terminal shelf→delivery leg has no
    /// successors and bootstraps against the neutral initial value. Half of
    /// the measured duration is attributed to each leg. Occupancy for all
    /// three zones is released, floored at zero.
    ///
    /// Returns the reward that was applied.
    pub fn absorb(
        outcome: &TaskOutcome,
        table: &mut ValueTable,
        congestion: &mut CongestionTracker,
        config: &LearningConfig,
    ) -> f64 {
        let reward = RewardModel::compute(outcome.success, outcome.duration, config);

        let next_max = table.best_value_from(&outcome.shelf, &[outcome.delivery.as_str()]);
        table.update(
            &outcome.pickup,
            &outcome.shelf,
            reward,
            next_max,
            config.alpha,
            config.gamma,
        );

        let terminal = table.best_value_from(&outcome.delivery, &[]);
        table.update(
            &outcome.shelf,
            &outcome.delivery,
            reward,
            terminal,
            config.alpha,
            config.gamma,
        );

        // One measured duration, two legs: split evenly.
        let half = Quantity::new(outcome.duration.value() / 2.0);
        table.record_observation(&outcome.pickup, &outcome.shelf, half, outcome.success);
        table.record_observation(&outcome.shelf, &outcome.delivery, half, outcome.success);

        for zone in [&outcome.pickup, &outcome.shelf, &outcome.delivery] {
            congestion.adjust(zone, -1);
        }

        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(duration: f64, success: bool) -> TaskOutcome {
        TaskOutcome {
            pickup: "P1".into(),
            shelf: "S1".into(),
            delivery: "D1".into(),
            duration: Quantity::new(duration),
            energy_used: 2.5,
            success,
        }
    }

    #[test]
    fn absorb_updates_both_legs() {
        let cfg = LearningConfig::default();
        let mut table = ValueTable::new(cfg.initial_value);
        let mut congestion = CongestionTracker::new();

        let reward = Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);
        assert!((reward - 115.0).abs() < 1e-10);

        // Both legs: 50 + 0.15 * (115 + 0.9*50 - 50) = 66.5
        let first = *table.get("P1", "S1");
        let second = *table.get("S1", "D1");
        assert!((first.value - 66.5).abs() < 1e-10);
        assert!((second.value - 66.5).abs() < 1e-10);
        assert_eq!(first.visits, 1);
        assert_eq!(second.visits, 1);
    }

    #[test]
    fn duration_split_evenly_across_legs() {
        let cfg = LearningConfig::default();
        let mut table = ValueTable::new(cfg.initial_value);
        let mut congestion = CongestionTracker::new();

        Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);

        let first = *table.get("P1", "S1");
        assert!((first.total_time - 22.5).abs() < 1e-10);
        assert!((first.avg_time - 22.5).abs() < 1e-10);
        assert_eq!(first.successes, 1);
    }

    #[test]
    fn absorb_releases_route_zones() {
        let cfg = LearningConfig::default();
        let mut table = ValueTable::new(cfg.initial_value);
        let mut congestion = CongestionTracker::new();
        congestion.adjust("P1", 1);
        congestion.adjust("S1", 1);
        congestion.adjust("D1", 1);

        Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);
        assert_eq!(congestion.get("P1"), 0);
        assert_eq!(congestion.get("S1"), 0);
        assert_eq!(congestion.get("D1"), 0);

        // Releasing below zero is normalized, not an error.
        Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);
        assert_eq!(congestion.get("P1"), 0);
    }

    #[test]
    fn failed_route_learns_negative_reward() {
        let cfg = LearningConfig::default();
        let mut table = ValueTable::new(cfg.initial_value);
        let mut congestion = CongestionTracker::new();

        let reward = Learner::absorb(&outcome(45.0, false), &mut table, &mut congestion, &cfg);
        assert!((reward + 35.0).abs() < 1e-10);
        assert!(table.get("P1", "S1").value < 50.0);
        assert_eq!(table.get("P1", "S1").failures, 1);
    }

    #[test]
    fn second_leg_feeds_first_leg_bootstrap() {
        let cfg = LearningConfig::default();
        let mut table = ValueTable::new(cfg.initial_value);
        let mut congestion = CongestionTracker::new();

        // After a first absorb, shelf→delivery sits above neutral, so the
        // next pickup→shelf update bootstraps against the higher value.
        Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);
        let bootstrapped = table.best_value_from("S1", &["D1"]);
        assert!(bootstrapped > 50.0);

        Learner::absorb(&outcome(45.0, true), &mut table, &mut congestion, &cfg);
        let expected = 66.5 + 0.15 * (115.0 + 0.9 * bootstrapped - 66.5);
        assert!((table.get("P1", "S1").value - expected).abs() < 1e-9);
    }
}
