//! Error types for shrinking configuration and candidate emission.

use thiserror::Error;

/// Returned by [`Emitter::emit`](crate::Emitter::emit) once the consumer has
/// found a failing candidate and no longer wants the rest of the sequence.
///
/// This is control flow rather than failure: generators propagate it with `?`
/// and return immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("candidate stream cancelled by the consumer")]
pub struct Cancelled;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid number of shrink rounds (must be > 0)
    #[error("invalid max rounds: {0} (must be > 0)")]
    InvalidMaxRounds(usize),

    /// Invalid timeout (must be > 0)
    #[error("invalid timeout (must be > 0)")]
    InvalidTimeout,
}
