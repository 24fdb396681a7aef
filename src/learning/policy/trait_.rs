//! Policy trait for zone selection.

use crate::congestion::CongestionTracker;
use crate::engine::AdvisorError;
use crate::learning::value_table::ValueTable;
use crate::zones::ZoneSpec;

/// A policy that picks the next target zone from a candidate list.
///
/// Implementations return an index into `candidates`; the engine commits
/// the reservation afterwards. The candidate list must be non-empty.
pub trait ZonePolicy: Send {
    /// Chooses a candidate index for a robot currently at `origin`.
    ///
    /// # Errors
    ///
    /// [`AdvisorError::NoCandidates`] if `candidates` is empty.
    fn choose(
        &mut self,
        origin: &str,
        candidates: &[ZoneSpec],
        table: &mut ValueTable,
        congestion: &CongestionTracker,
    ) -> Result<usize, AdvisorError>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
