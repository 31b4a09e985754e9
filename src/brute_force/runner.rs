//! Exhaustive search loop.

use super::config::BruteForceConfig;
use crate::cache::LegMatrix;
use crate::error::OptimizeError;
use crate::optimizer::{check_track, Optimizer, Score};
use crate::task::Task;
use crate::track::Track;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Largest turnpoint count the exhaustive search accepts.
///
/// Four turnpoints would mean O(n⁶) tuples; anything past this limit is a
/// job for the stochastic optimizers.
pub const MAX_TURNPOINTS: usize = 3;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct BruteForceResult {
    /// The best task found.
    pub task: Task,

    /// Score of the best task.
    pub score: f64,

    /// Track indices underlying the task, strictly increasing.
    pub indices: Vec<usize>,

    /// Number of candidate tuples scored.
    pub evaluated: u64,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Exhaustive task optimizer: provably best task for small turnpoint
/// counts.
///
/// Builds the leg-distance cache once, then enumerates every valid index
/// tuple, one outer-loop partition per rayon task. Repeated calls with the
/// same inputs return tasks with identical scores; the winning tuple
/// itself is implementation-defined under ties.
#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    config: BruteForceConfig,
}

impl BruteForce {
    pub fn new() -> Self {
        Self::with_config(BruteForceConfig::default())
    }

    pub fn with_config(config: BruteForceConfig) -> Self {
        BruteForce { config }
    }

    /// Runs the exhaustive search.
    pub fn run(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
    ) -> Result<BruteForceResult, OptimizeError> {
        self.run_with_cancel(track, turnpoints, score, None)
    }

    /// Runs the exhaustive search with an optional cancellation token.
    ///
    /// The flag is checked once per outer-loop partition, never mid-tuple;
    /// on cancellation the best result of the completed partitions is
    /// returned with `cancelled` set.
    pub fn run_with_cancel(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BruteForceResult, OptimizeError> {
        if !(1..=MAX_TURNPOINTS).contains(&turnpoints) {
            return Err(OptimizeError::UnsupportedTurnpoints {
                requested: turnpoints,
                max: MAX_TURNPOINTS,
            });
        }
        check_track(track, turnpoints)?;

        let legs = LegMatrix::build(track);
        let n = track.len();
        let flag = cancel.as_deref();

        // One work unit per outermost start index. Each unit owns a private
        // local best; the units meet only in the final reduce.
        let search = |i: usize| -> Option<LocalBest> {
            if flag.is_some_and(|f| f.load(Ordering::Relaxed)) {
                return None;
            }
            Some(match turnpoints {
                1 => best_from_start_1(i, track, &legs, score),
                2 => best_from_start_2(i, track, &legs, score),
                _ => best_from_start_3(i, track, &legs, score),
            })
        };

        let starts = 0..n - turnpoints - 1;
        let best = if self.config.parallel {
            starts.into_par_iter().map(search).reduce(|| None, merge)
        } else {
            starts.map(search).fold(None, merge)
        };
        let cancelled = flag.is_some_and(|f| f.load(Ordering::Relaxed));

        // All partitions observed the cancel flag before doing any work:
        // fall back to the earliest valid selection.
        let best = best.unwrap_or_else(|| {
            let indices: Vec<usize> = (0..turnpoints + 2).collect();
            let score = score.score_indices(track, &legs, &indices);
            LocalBest {
                score,
                indices,
                evaluated: 1,
            }
        });

        Ok(BruteForceResult {
            task: Task::from_indices(track, &best.indices),
            score: best.score,
            indices: best.indices,
            evaluated: best.evaluated,
            cancelled,
        })
    }
}

impl Optimizer for BruteForce {
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

/// Best tuple of one outer-loop partition, plus how many tuples it scored.
struct LocalBest {
    score: f64,
    indices: Vec<usize>,
    evaluated: u64,
}

fn merge(a: Option<LocalBest>, b: Option<LocalBest>) -> Option<LocalBest> {
    match (a, b) {
        (Some(x), Some(y)) => {
            let evaluated = x.evaluated + y.evaluated;
            let mut keep = if y.score > x.score { y } else { x };
            keep.evaluated = evaluated;
            Some(keep)
        }
        (Some(x), None) => Some(x),
        (None, y) => y,
    }
}

fn best_from_start_1(i: usize, track: &Track, legs: &LegMatrix, score: &dyn Score) -> LocalBest {
    let n = legs.len();
    let mut ix = [i, 0, 0];
    let mut best_score = f64::NEG_INFINITY;
    let mut best = ix;
    let mut evaluated = 0u64;
    for j in i + 1..n - 1 {
        ix[1] = j;
        for z in j + 1..n {
            ix[2] = z;
            let s = score.score_indices(track, legs, &ix);
            evaluated += 1;
            if s > best_score {
                best_score = s;
                best = ix;
            }
        }
    }
    LocalBest {
        score: best_score,
        indices: best.to_vec(),
        evaluated,
    }
}

fn best_from_start_2(i: usize, track: &Track, legs: &LegMatrix, score: &dyn Score) -> LocalBest {
    let n = legs.len();
    let mut ix = [i, 0, 0, 0];
    let mut best_score = f64::NEG_INFINITY;
    let mut best = ix;
    let mut evaluated = 0u64;
    for j in i + 1..n - 2 {
        ix[1] = j;
        for w in j + 1..n - 1 {
            ix[2] = w;
            for z in w + 1..n {
                ix[3] = z;
                let s = score.score_indices(track, legs, &ix);
                evaluated += 1;
                if s > best_score {
                    best_score = s;
                    best = ix;
                }
            }
        }
    }
    LocalBest {
        score: best_score,
        indices: best.to_vec(),
        evaluated,
    }
}

fn best_from_start_3(i: usize, track: &Track, legs: &LegMatrix, score: &dyn Score) -> LocalBest {
    let n = legs.len();
    let mut ix = [i, 0, 0, 0, 0];
    let mut best_score = f64::NEG_INFINITY;
    let mut best = ix;
    let mut evaluated = 0u64;
    for j in i + 1..n - 3 {
        ix[1] = j;
        for w in j + 1..n - 2 {
            ix[2] = w;
            for v in w + 1..n - 1 {
                ix[3] = v;
                for z in v + 1..n {
                    ix[4] = z;
                    let s = score.score_indices(track, legs, &ix);
                    evaluated += 1;
                    if s > best_score {
                        best_score = s;
                        best = ix;
                    }
                }
            }
        }
    }
    LocalBest {
        score: best_score,
        indices: best.to_vec(),
        evaluated,
    }
}
