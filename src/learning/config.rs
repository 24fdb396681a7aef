//! Configuration for value updates, action selection, and reward shaping.

use qtty::{Quantity, Second};

/// Configuration for the online zone-allocation engine.
///
/// Controls the temporal-difference update, the exploration/exploitation
/// balance, congestion weighting, and reward shaping.
#[derive(Debug, Clone)]
pub struct LearningConfig {
    // --- Value updates ---
    /// Learning rate applied to each temporal-difference update.
    pub alpha: f64,
    /// Discount factor on the bootstrapped successor value.
    pub gamma: f64,
    /// Neutral value a transition starts from on first reference.
    pub initial_value: f64,

    // --- Action selection ---
    /// Probability of picking a candidate uniformly at random.
    pub epsilon: f64,
    /// Score subtracted per robot already occupying a candidate zone.
    pub congestion_weight: f64,

    // --- Reward shaping ---
    /// Base reward for a successfully completed route.
    pub success_base: f64,
    /// Base reward for a failed route.
    pub failure_base: f64,
    /// Target route duration; finishing under it earns a linear bonus.
    pub target_duration: Quantity<Second>,
    /// Penalty per second of overrun beyond the target duration.
    pub overrun_penalty_rate: f64,

    // --- Failure mapping ---
    /// Severity recorded for a stuck robot when the caller gives none.
    pub stuck_severity: u32,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            gamma: 0.9,
            initial_value: 50.0,
            epsilon: 0.15,
            congestion_weight: 15.0,
            success_base: 100.0,
            failure_base: -50.0,
            target_duration: Quantity::new(60.0),
            overrun_penalty_rate: 0.5,
            stuck_severity: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = LearningConfig::default();
        assert!(cfg.alpha > 0.0 && cfg.alpha < 1.0);
        assert!(cfg.gamma > 0.0 && cfg.gamma <= 1.0);
        assert!(cfg.epsilon >= 0.0 && cfg.epsilon <= 1.0);
        assert!(cfg.initial_value > 0.0);
        assert!(cfg.target_duration.value() > 0.0);
    }

    #[test]
    fn default_rewards_are_signed() {
        let cfg = LearningConfig::default();
        assert!(cfg.success_base > 0.0);
        assert!(cfg.failure_base < 0.0);
    }
}
