//! Tasks: start, turnpoints, finish.

use crate::geo::Point;
use crate::track::Track;

/// A polygonal task inscribed in a flight: a start point, an ordered list
/// of turnpoints, and a finish point.
///
/// When derived from a [`Track`] the underlying point indices are strictly
/// increasing, so the task follows the flight in temporal order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub start: Point,
    pub turnpoints: Vec<Point>,
    pub finish: Point,
}

impl Task {
    pub fn new(start: Point, turnpoints: Vec<Point>, finish: Point) -> Self {
        Task {
            start,
            turnpoints,
            finish,
        }
    }

    /// Builds a task from strictly increasing track indices.
    ///
    /// `indices` holds start, turnpoints and finish, so its length is the
    /// turnpoint count plus two.
    pub(crate) fn from_indices(track: &Track, indices: &[usize]) -> Self {
        debug_assert!(indices.len() >= 2);
        let last = indices.len() - 1;
        Task {
            start: track[indices[0]].clone(),
            turnpoints: indices[1..last].iter().map(|&i| track[i].clone()).collect(),
            finish: track[indices[last]].clone(),
        }
    }

    /// Total great-circle distance in kilometres: the sum of the distances
    /// between each two consecutive points of the task.
    pub fn distance(&self) -> f64 {
        let mut total = 0.0;
        let mut prev = &self.start;
        for tp in &self.turnpoints {
            total += prev.distance(tp);
            prev = tp;
        }
        total + prev.distance(&self.finish)
    }
}
