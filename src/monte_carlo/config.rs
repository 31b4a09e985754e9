//! Monte Carlo configuration.

use crate::error::OptimizeError;

/// Configuration for the Monte Carlo optimizer.
///
/// # Examples
///
/// ```
/// use flightopt::monte_carlo::MonteCarloConfig;
///
/// let config = MonteCarloConfig::default()
///     .with_cycles(20)
///     .with_probes_per_cycle(50_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloConfig {
    /// Number of independent restart cycles.
    pub cycles: usize,

    /// Number of random perturbations probed per cycle.
    pub probes_per_cycle: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            cycles: 10,
            probes_per_cycle: 100_000,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_probes_per_cycle(mut self, probes: usize) -> Self {
        self.probes_per_cycle = probes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.cycles == 0 {
            return Err(OptimizeError::InvalidConfig(
                "cycles must be at least 1".into(),
            ));
        }
        if self.probes_per_cycle == 0 {
            return Err(OptimizeError::InvalidConfig(
                "probes_per_cycle must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
