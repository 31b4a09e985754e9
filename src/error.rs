//! Error taxonomy for optimization runs.

use thiserror::Error;

/// Errors raised by an optimizer before any search work begins.
///
/// These are fatal to the specific optimization request, never to the
/// process, and are never retried internally: rerunning the exhaustive
/// search with identical inputs is deterministic, and reseeding a
/// stochastic search is a caller decision. The stochastic strategies have
/// no additional failure mode — they always return a result, even a poor
/// local optimum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The requested turnpoint count is outside the strategy's range.
    #[error("{requested} turnpoints not supported by this optimizer (max {max})")]
    UnsupportedTurnpoints { requested: usize, max: usize },

    /// A task needs at least one turnpoint.
    #[error("turnpoint count must be at least 1")]
    ZeroTurnpoints,

    /// The track is too short to place start, turnpoints and finish.
    #[error("track has {points} points but at least {required} are required")]
    InsufficientData { points: usize, required: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
