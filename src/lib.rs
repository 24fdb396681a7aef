//! fleetwise - Fleet-Level Experience-driven Transition Warehouse Intelligence
//!
//! An online decision-and-learning library advising autonomous warehouse
//! robots on which zone to move to next. Learns transition quality from
//! observed task outcomes instead of a precomputed plan.

pub mod analysis;
pub mod congestion;
pub mod engine;
pub mod failure_map;
pub mod learning;
pub mod run;
pub mod zones;

pub use engine::{AdvisorError, FleetAdvisor};
pub use learning::{LearningConfig, MetricsSnapshot, TaskOutcome};

/// Identifier type used for zones, robots, and run artifacts.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
