//! Configuration for the shrinking driver.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for shrinking behavior
///
/// Both limits are checked between rounds only. A generator that is already
/// producing candidates is never interrupted by them, and the value returned
/// when a limit is hit is the last one that was accepted, so it still
/// falsifies the predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkConfig {
    /// Maximum number of accepted shrink rounds
    pub max_rounds: usize,
    /// Wall-clock budget for the whole search
    pub timeout: Duration,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ShrinkConfig {
    /// Create a new shrink configuration with validation
    pub fn new(max_rounds: usize, timeout: Duration) -> Result<Self, ConfigError> {
        let config = Self {
            max_rounds,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a shrink configuration with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    /// Create a shrink configuration with custom max rounds
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            ..Default::default()
        }
    }

    /// Validate the shrink configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds(self.max_rounds));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}
