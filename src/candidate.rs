//! Working hypotheses of the stochastic optimizers.

use crate::cache::LegMatrix;
use crate::optimizer::Score;
use crate::task::Task;
use crate::track::Track;
use rand::Rng;

/// One hypothesis of a stochastic search: a strictly increasing selection
/// of track indices, the task it derives to, and the cached score.
///
/// Candidates are immutable; every move produces a fresh candidate via
/// [`neighbour`](Candidate::neighbour), and callers keep whichever one
/// they want. The index vector covers the whole task — start, turnpoints
/// and finish — so its length is the turnpoint count plus two.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    indices: Vec<usize>,
    task: Task,
    score: f64,
}

impl Candidate {
    /// Seeds a candidate with uniformly random distinct indices, sorted
    /// ascending to satisfy the temporal-ordering invariant.
    pub(crate) fn random<R: Rng>(
        track: &Track,
        legs: &LegMatrix,
        score: &dyn Score,
        turnpoints: usize,
        rng: &mut R,
    ) -> Self {
        let mut indices = rand::seq::index::sample(rng, track.len(), turnpoints + 2).into_vec();
        indices.sort_unstable();
        Self::from_indices(track, legs, score, indices)
    }

    /// Seeds a candidate with indices evenly spaced across the track,
    /// first fix to last.
    pub(crate) fn evenly_spaced(
        track: &Track,
        legs: &LegMatrix,
        score: &dyn Score,
        turnpoints: usize,
    ) -> Self {
        let n = track.len();
        let m = turnpoints + 2;
        let indices = (0..m).map(|i| i * (n - 1) / (m - 1)).collect();
        Self::from_indices(track, legs, score, indices)
    }

    fn from_indices(
        track: &Track,
        legs: &LegMatrix,
        score: &dyn Score,
        indices: Vec<usize>,
    ) -> Self {
        let task = Task::from_indices(track, &indices);
        let score = score.score_indices(track, legs, &indices);
        Candidate {
            indices,
            task,
            score,
        }
    }

    /// Produces a neighbouring candidate: one selected position, chosen
    /// uniformly, has its index redrawn uniformly from the open interval
    /// bounded by the adjacent selected indices (track boundaries at the
    /// ends). The current index always lies in that interval, so a
    /// neighbour always exists and strict ordering is preserved. Only the
    /// affected task field is rebuilt.
    pub(crate) fn neighbour<R: Rng>(
        &self,
        track: &Track,
        legs: &LegMatrix,
        score: &dyn Score,
        rng: &mut R,
    ) -> Self {
        let last = self.indices.len() - 1;
        let pos = rng.random_range(0..=last);
        let lo = if pos == 0 { 0 } else { self.indices[pos - 1] + 1 };
        let hi = if pos == last {
            track.len()
        } else {
            self.indices[pos + 1]
        };
        let index = rng.random_range(lo..hi);

        let mut indices = self.indices.clone();
        indices[pos] = index;
        let mut task = self.task.clone();
        let point = track[index].clone();
        if pos == 0 {
            task.start = point;
        } else if pos == last {
            task.finish = point;
        } else {
            task.turnpoints[pos - 1] = point;
        }
        let score = score.score_indices(track, legs, &indices);
        Candidate {
            indices,
            task,
            score,
        }
    }

    pub(crate) fn score(&self) -> f64 {
        self.score
    }

    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub(crate) fn task(&self) -> &Task {
        &self.task
    }

    pub(crate) fn into_task(self) -> Task {
        self.task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;
    use crate::optimizer::TotalDistance;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_track(n: usize) -> Track {
        Track::new((0..n).map(|i| Point::new(0.0, i as f64 * 0.01)).collect())
    }

    fn strictly_increasing(indices: &[usize]) -> bool {
        indices.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_random_candidate_is_strictly_increasing() {
        let track = line_track(20);
        let legs = LegMatrix::build(&track);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let c = Candidate::random(&track, &legs, &TotalDistance, 3, &mut rng);
            assert!(strictly_increasing(c.indices()));
        }
    }

    #[test]
    fn test_evenly_spaced_spans_the_track() {
        let track = line_track(101);
        let legs = LegMatrix::build(&track);
        let c = Candidate::evenly_spaced(&track, &legs, &TotalDistance, 2);
        assert_eq!(c.indices(), &[0, 33, 66, 100]);
        assert!(strictly_increasing(c.indices()));
    }

    #[test]
    fn test_evenly_spaced_on_minimal_track() {
        // Exactly turnpoints + 2 fixes: the only valid selection.
        let track = line_track(4);
        let legs = LegMatrix::build(&track);
        let c = Candidate::evenly_spaced(&track, &legs, &TotalDistance, 2);
        assert_eq!(c.indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_neighbour_rebuilds_affected_task_field() {
        let track = line_track(30);
        let legs = LegMatrix::build(&track);
        let mut rng = StdRng::seed_from_u64(3);
        let c = Candidate::random(&track, &legs, &TotalDistance, 2, &mut rng);
        let n = c.neighbour(&track, &legs, &TotalDistance, &mut rng);
        // The derived task must always agree with the index selection.
        let rebuilt = Task::from_indices(&track, n.indices());
        assert_eq!(n.task(), &rebuilt);
        assert!((n.score() - rebuilt.distance()).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_neighbour_preserves_strict_ordering(
            seed in any::<u64>(),
            n in 5usize..60,
            turnpoints in 1usize..4,
        ) {
            prop_assume!(n >= turnpoints + 2);
            let track = line_track(n);
            let legs = LegMatrix::build(&track);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut c = Candidate::random(&track, &legs, &TotalDistance, turnpoints, &mut rng);
            for _ in 0..40 {
                c = c.neighbour(&track, &legs, &TotalDistance, &mut rng);
                prop_assert!(strictly_increasing(c.indices()));
                prop_assert!(*c.indices().last().unwrap() < n);
            }
        }
    }
}
