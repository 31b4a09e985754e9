//! Simulated annealing task search.
//!
//! A single-solution trajectory search for turnpoint counts too large for
//! exhaustive enumeration. Worsening moves are accepted with a probability
//! that falls with the temperature, letting the search escape local optima
//! early and turn greedy as it cools.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::AnnealingConfig;
pub use runner::{AnnealingResult, SimulatedAnnealing};
