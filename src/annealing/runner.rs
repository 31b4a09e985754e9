//! Annealing execution loop.

use super::config::AnnealingConfig;
use crate::cache::LegMatrix;
use crate::candidate::Candidate;
use crate::error::OptimizeError;
use crate::optimizer::{check_track, Optimizer, Score};
use crate::task::Task;
use crate::track::Track;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Best-score history is sampled once per this many iterations.
const HISTORY_INTERVAL: usize = 100;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// The best task seen over the whole run.
    pub task: Task,

    /// Score of the best task.
    pub score: f64,

    /// Track indices underlying the task, strictly increasing.
    pub indices: Vec<usize>,

    /// Total number of iterations (neighbour evaluations).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of proposals that improved on the best seen so far.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best score over time, starting with the initial candidate's score
    /// and sampled at regular intervals after that.
    pub score_history: Vec<f64>,
}

/// Simulated annealing task optimizer.
///
/// Approximates the optimum for turnpoint counts beyond the exhaustive
/// range. Always returns a result — possibly a poor local optimum; that is
/// a property of the strategy, not an error. Each run owns its random
/// source, seeded from the config, so concurrent runs never contend and
/// seeded runs are reproducible.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    pub fn new() -> Self {
        Self::with_config(AnnealingConfig::default())
    }

    pub fn with_config(config: AnnealingConfig) -> Self {
        SimulatedAnnealing { config }
    }

    /// Runs the annealing search.
    pub fn run(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
    ) -> Result<AnnealingResult, OptimizeError> {
        self.run_with_cancel(track, turnpoints, score, None)
    }

    /// Runs the annealing search with an optional cancellation token,
    /// checked once per iteration.
    pub fn run_with_cancel(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealingResult, OptimizeError> {
        self.config.validate()?;
        check_track(track, turnpoints)?;

        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        let legs = LegMatrix::build(track);

        let mut current = Candidate::random(track, &legs, score, turnpoints, &mut rng);
        let mut best = current.clone();

        let mut temperature = self.config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut score_history = vec![best.score()];

        while temperature > self.config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let neighbour = current.neighbour(track, &legs, score, &mut rng);
            let delta = neighbour.score() - current.score();

            // Metropolis criterion: improvements always pass, worsening
            // moves pass with probability exp(delta / T).
            let accept = if delta >= 0.0 {
                true
            } else {
                rng.random_range(0.0..1.0) < (delta / temperature).exp()
            };

            // Every proposal competes for best-ever, accepted or not.
            if neighbour.score() > best.score() {
                best = neighbour.clone();
                improving_moves += 1;
            }
            if accept {
                current = neighbour;
                accepted_moves += 1;
            }

            temperature *= 1.0 - self.config.alpha;
            iterations += 1;
            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                score_history.push(best.score());
            }
        }

        if score_history
            .last()
            .is_none_or(|&last| (last - best.score()).abs() > 1e-15)
        {
            score_history.push(best.score());
        }

        let score_value = best.score();
        let indices = best.indices().to_vec();
        Ok(AnnealingResult {
            task: best.into_task(),
            score: score_value,
            indices,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cancelled,
            score_history,
        })
    }
}

impl Optimizer for SimulatedAnnealing {
    fn optimize(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
    ) -> Result<Task, OptimizeError> {
        self.run_with_cancel(track, turnpoints, score, None)
            .map(|r| r.task)
    }
}
