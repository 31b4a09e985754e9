//! Brute force configuration.

/// Configuration for the brute force optimizer.
///
/// # Examples
///
/// ```
/// use flightopt::brute_force::BruteForceConfig;
///
/// let config = BruteForceConfig::default().with_parallel(false);
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceConfig {
    /// Whether to search outer-loop partitions in parallel using rayon.
    pub parallel: bool,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl BruteForceConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
