//! Exhaustive (brute force) task search.
//!
//! Enumerates every strictly increasing selection of start, turnpoints and
//! finish over the track and keeps the best-scoring one. Exact by
//! construction, but the tuple space grows as O(n^(k+2)) for n fixes and
//! k turnpoints — O(n³) for one turnpoint, O(n⁵) for three — which is why
//! the supported range stops at [`MAX_TURNPOINTS`].
//!
//! The enumeration is partitioned by the outermost start index: each
//! partition searches independently with a private local best and the
//! partitions meet only at a single final merge, so the parallel phase has
//! no shared mutable state at all.

mod config;
mod runner;

pub use config::BruteForceConfig;
pub use runner::{BruteForce, BruteForceResult, MAX_TURNPOINTS};
