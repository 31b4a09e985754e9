//! Flight-track task optimization.
//!
//! Given a recorded flight path (an ordered sequence of GPS fixes), this
//! crate finds the polygonal task — a start point, a fixed number of
//! intermediate turnpoints, and a finish point, all chosen in temporal
//! order — that maximizes a score function, by default the total
//! great-circle distance flown.
//!
//! Three interchangeable strategies trade exactness against runtime:
//!
//! - **Brute force**: complete enumeration of every valid turnpoint
//!   selection, parallelized across the outer loop. Provably optimal, but
//!   the O(n^(k+2)) tuple space limits it to 1–3 turnpoints.
//! - **Simulated Annealing (SA)**: temperature-controlled stochastic local
//!   search with the Metropolis acceptance criterion. Scales to larger
//!   turnpoint counts at the cost of optimality guarantees.
//! - **Monte Carlo**: temperature-free repeated-restart local search;
//!   many independent cycles of uniform random perturbation, keeping the
//!   best task seen anywhere.
//!
//! # Architecture
//!
//! All strategies implement the [`optimizer::Optimizer`] trait and share
//! the [`track::Track`] / [`task::Task`] model plus a pairwise
//! leg-distance cache ([`cache::LegMatrix`]) built once per run. Parsing
//! flight-recorder formats into a [`track::Track`] is the job of upstream
//! crates; this one only searches.

pub mod annealing;
pub mod brute_force;
pub mod cache;
pub mod error;
pub mod geo;
pub mod monte_carlo;
pub mod optimizer;
pub mod task;
pub mod track;

mod candidate;
