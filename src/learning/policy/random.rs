//! Random zone selection for baselines and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::congestion::CongestionTracker;
use crate::engine::AdvisorError;
use crate::learning::value_table::ValueTable;
use crate::zones::ZoneSpec;

use super::trait_::ZonePolicy;

/// Uniformly random candidate selection.
///
/// Ignores learned values and congestion entirely. Used for sanity checks
/// and as a lower-bound baseline against the learning policy.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a random policy with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ZonePolicy for RandomPolicy {
    fn choose(
        &mut self,
        _origin: &str,
        candidates: &[ZoneSpec],
        _table: &mut ValueTable,
        _congestion: &CongestionTracker,
    ) -> Result<usize, AdvisorError> {
        if candidates.is_empty() {
            return Err(AdvisorError::NoCandidates);
        }
        Ok(self.rng.gen_range(0..candidates.len()))
    }

    fn name(&self) -> &str {
        "random"
    }
}
