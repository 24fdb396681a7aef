use thiserror::Error;

/// Errors the advisor surfaces to its host.
///
/// Abnormal inputs other than an empty candidate list are normalized rather
/// than rejected: unseen zones get neutral defaults and out-of-range
/// coordinates are clamped, keeping the decision path available.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("no candidate zones provided")]
    NoCandidates,
}
