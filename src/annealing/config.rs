//! Annealing configuration.

use crate::error::OptimizeError;

/// Configuration for the simulated annealing optimizer.
///
/// Cooling is geometric: after every iteration the temperature is
/// multiplied by `1 - alpha`, and the search stops once it reaches
/// `min_temperature`.
///
/// # Examples
///
/// ```
/// use flightopt::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_alpha(0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The search stops when the temperature drops to this value.
    pub min_temperature: f64,

    /// Cooling factor in (0, 1); each iteration multiplies the
    /// temperature by `1 - alpha`. Lower = slower cooling.
    pub alpha: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            min_temperature: 1.0,
            alpha: 0.03,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.initial_temperature <= 0.0 {
            return Err(OptimizeError::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        if self.min_temperature <= 0.0 {
            return Err(OptimizeError::InvalidConfig(
                "min_temperature must be positive".into(),
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(OptimizeError::InvalidConfig(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(OptimizeError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
