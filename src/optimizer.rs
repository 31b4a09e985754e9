//! The optimizer contract: scoring and the shared `Optimize` operation.

use crate::cache::LegMatrix;
use crate::error::OptimizeError;
use crate::task::Task;
use crate::track::Track;

/// Ranks tasks for an optimization run.
///
/// [`score`](Score::score) is the contract: a pure function from task to a
/// comparable number, higher is better. [`score_indices`](Score::score_indices)
/// is the hot path the search loops actually call — it scores a selection
/// of track indices against the precomputed leg cache, and defaults to
/// materializing the task and deferring to `score`. Distance-like scores
/// override it to sum cached legs and skip the allocation entirely.
///
/// Plain closures work as custom scores:
///
/// ```
/// use flightopt::optimizer::Score;
/// use flightopt::task::Task;
///
/// let halved = |task: &Task| task.distance() / 2.0;
/// let _: &dyn Score = &halved;
/// ```
pub trait Score: Send + Sync {
    /// Scores a completed task. Higher is better.
    fn score(&self, task: &Task) -> f64;

    /// Scores a strictly increasing selection of track indices.
    fn score_indices(&self, track: &Track, _legs: &LegMatrix, indices: &[usize]) -> f64 {
        self.score(&Task::from_indices(track, indices))
    }
}

impl<F> Score for F
where
    F: Fn(&Task) -> f64 + Send + Sync,
{
    fn score(&self, task: &Task) -> f64 {
        self(task)
    }
}

/// The canonical score: total great-circle distance over all task legs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalDistance;

impl Score for TotalDistance {
    fn score(&self, task: &Task) -> f64 {
        task.distance()
    }

    fn score_indices(&self, _track: &Track, legs: &LegMatrix, indices: &[usize]) -> f64 {
        indices.windows(2).map(|w| legs.leg(w[0], w[1])).sum()
    }
}

/// A task-search strategy over a recorded track.
///
/// All strategies share this contract and are interchangeable; the brute
/// force strategy is exact within its supported turnpoint range, the
/// stochastic ones scale further without optimality guarantees.
pub trait Optimizer {
    /// Returns the best task found for `turnpoints` intermediate points.
    ///
    /// The track must hold at least `turnpoints + 2` fixes. Precondition
    /// violations surface as [`OptimizeError`] before any search work —
    /// and before the score function is ever called.
    fn optimize(
        &self,
        track: &Track,
        turnpoints: usize,
        score: &dyn Score,
    ) -> Result<Task, OptimizeError>;
}

/// Shared precondition: a positive turnpoint count and enough fixes to
/// place start, turnpoints and finish.
pub(crate) fn check_track(track: &Track, turnpoints: usize) -> Result<(), OptimizeError> {
    if turnpoints == 0 {
        return Err(OptimizeError::ZeroTurnpoints);
    }
    let required = turnpoints + 2;
    if track.len() < required {
        return Err(OptimizeError::InsufficientData {
            points: track.len(),
            required,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;

    fn line_track(n: usize) -> Track {
        Track::new((0..n).map(|i| Point::new(0.0, i as f64 * 0.01)).collect())
    }

    #[test]
    fn test_total_distance_index_path_matches_task_path() {
        let track = line_track(6);
        let legs = LegMatrix::build(&track);
        let indices = [0, 2, 3, 5];
        let task = Task::from_indices(&track, &indices);
        let by_task = TotalDistance.score(&task);
        let by_indices = TotalDistance.score_indices(&track, &legs, &indices);
        assert!((by_task - by_indices).abs() < 1e-9);
    }

    #[test]
    fn test_closure_score() {
        let track = line_track(4);
        let legs = LegMatrix::build(&track);
        let doubled = |task: &Task| task.distance() * 2.0;
        let indices = [0, 1, 3];
        let task = Task::from_indices(&track, &indices);
        let direct = doubled.score(&task);
        let via_indices = doubled.score_indices(&track, &legs, &indices);
        assert!((direct - via_indices).abs() < 1e-12);
        assert!((direct - task.distance() * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_check_track() {
        assert_eq!(
            check_track(&line_track(5), 0),
            Err(OptimizeError::ZeroTurnpoints)
        );
        assert_eq!(
            check_track(&line_track(3), 2),
            Err(OptimizeError::InsufficientData {
                points: 3,
                required: 4
            })
        );
        assert_eq!(check_track(&line_track(4), 2), Ok(()));
    }
}
