//! Precomputed leg-distance cache.

use crate::track::Track;
use rayon::prelude::*;

/// Pairwise great-circle distances between track fixes.
///
/// `leg(i, j)` with `i < j` returns the distance between fixes `i` and `j`.
/// The matrix is built once per optimization run, before any search loop
/// starts, in O(n²) distance evaluations; afterwards it is read-only and
/// safe to share across the brute-force workers without locking.
///
/// Storage is the flattened upper triangle, n·(n−1)/2 entries.
#[derive(Debug, Clone)]
pub struct LegMatrix {
    n: usize,
    legs: Vec<f64>,
}

impl LegMatrix {
    /// Computes all pairwise legs for `track`, rows in parallel.
    pub fn build(track: &Track) -> Self {
        let n = track.len();
        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = &track[i];
                (i + 1..n).map(|j| a.distance(&track[j])).collect()
            })
            .collect();
        LegMatrix {
            n,
            legs: rows.concat(),
        }
    }

    /// Number of track fixes the matrix covers.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cached distance between fixes `i` and `j`, requiring `i < j < len()`.
    pub fn leg(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < j && j < self.n);
        // Row i starts after the i preceding rows of n-1, n-2, ... entries.
        self.legs[i * (2 * self.n - i - 1) / 2 + (j - i - 1)]
    }
}
