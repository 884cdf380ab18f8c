//! Simulated Annealing (SA) over a single in-place solution.
//!
//! Moves are applied to the live solution and undone when rejected, so
//! no candidate copies are made. Temperature cools geometrically at batch
//! boundaries and the run stops once a whole batch passes without an
//! accepted move.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use runner::{
    acceptance_probability, has_converged, is_accepted, AnnealResult, Annealer, StepOutcome,
};
pub use types::AnnealProblem;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Creates the run's single random stream.
///
/// Without a seed, one is drawn from the thread-local generator.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
