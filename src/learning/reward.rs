//! Reward shaping for completed routes.

use qtty::{Quantity, Second};

use super::config::LearningConfig;

/// Computes the scalar reward for a completed route.
pub struct RewardModel;

impl RewardModel {
    /// Reward = outcome base + under-target bonus − overrun penalty.
    ///
    /// Finishing under the target duration earns one point per second of
    /// slack; every second of overrun costs `overrun_penalty_rate`. The same
    /// reward is applied to both legs of a route.
    pub fn compute(success: bool, duration: Quantity<Second>, config: &LearningConfig) -> f64 {
        let secs = duration.value();
        let target = config.target_duration.value();
        let base = if success {
            config.success_base
        } else {
            config.failure_base
        };
        let bonus = (target - secs).max(0.0);
        let penalty = (secs - target).max(0.0) * config.overrun_penalty_rate;
        base + bonus - penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_success_earns_bonus() {
        let cfg = LearningConfig::default();
        let r = RewardModel::compute(true, Quantity::new(45.0), &cfg);
        // 100 + (60 - 45) - 0
        assert!((r - 115.0).abs() < 1e-10);
    }

    #[test]
    fn slow_success_pays_overrun() {
        let cfg = LearningConfig::default();
        let r = RewardModel::compute(true, Quantity::new(80.0), &cfg);
        // 100 + 0 - 20 * 0.5
        assert!((r - 90.0).abs() < 1e-10);
    }

    #[test]
    fn failure_is_negative_even_when_fast() {
        let cfg = LearningConfig::default();
        let r = RewardModel::compute(false, Quantity::new(45.0), &cfg);
        // -50 + 15 - 0
        assert!((r + 35.0).abs() < 1e-10);
    }

    #[test]
    fn exact_target_gets_base_only() {
        let cfg = LearningConfig::default();
        let r = RewardModel::compute(true, Quantity::new(60.0), &cfg);
        assert!((r - 100.0).abs() < 1e-10);
    }
}
