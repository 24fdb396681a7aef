//! Epsilon-greedy selection balancing learned value against congestion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::congestion::CongestionTracker;
use crate::engine::AdvisorError;
use crate::learning::config::LearningConfig;
use crate::learning::value_table::ValueTable;
use crate::zones::ZoneSpec;

use super::trait_::ZonePolicy;

/// Epsilon-greedy selection over candidate zones.
///
/// With probability `epsilon`, picks uniformly at random among the
/// candidates (exploration). Otherwise scores each candidate as its learned
/// transition value minus a congestion penalty and takes the maximum, ties
/// broken by first-encountered order (exploitation). The congestion penalty
/// keeps the fleet from piling onto a single historically-good zone.
pub struct EpsilonGreedy {
    epsilon: f64,
    congestion_weight: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Creates a policy from the engine configuration and an RNG seed.
    ///
    /// The seed makes exploration reproducible; tests force the exploration
    /// or exploitation branch by setting `epsilon` to 1 or 0.
    pub fn new(config: &LearningConfig, seed: u64) -> Self {
        Self {
            epsilon: config.epsilon,
            congestion_weight: config.congestion_weight,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ZonePolicy for EpsilonGreedy {
    fn choose(
        &mut self,
        origin: &str,
        candidates: &[ZoneSpec],
        table: &mut ValueTable,
        congestion: &CongestionTracker,
    ) -> Result<usize, AdvisorError> {
        if candidates.is_empty() {
            return Err(AdvisorError::NoCandidates);
        }

        if self.rng.gen::<f64>() < self.epsilon {
            return Ok(self.rng.gen_range(0..candidates.len()));
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, candidate) in candidates.iter().enumerate() {
            let value = table.get(origin, &candidate.id).value;
            let penalty = f64::from(congestion.get(&candidate.id)) * self.congestion_weight;
            let score = value - penalty;
            if score > best_score {
                best_score = score;
                best = index;
            }
        }
        Ok(best)
    }

    fn name(&self) -> &str {
        "epsilon_greedy"
    }
}
