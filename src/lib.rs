//! Room assignment by simulated annealing.
//!
//! Places a population of individuals into equally sized groups so that
//! the mean group compatibility score is as low as possible. Ratings are
//! directional: within a group each pair is scored by the rating its
//! earlier member gives the later one.
//!
//! - [`model`]: the rating matrix and the group assignment.
//! - [`scoring`]: group, mean, best, and worst scores.
//! - [`moves`]: reversible slot and block swaps, plus the problem adapter.
//! - [`sa`]: the annealing engine, generic over in-place problems.
//! - [`io`] and [`report`]: rating file input and text output.
//!
//! # Example
//!
//! ```
//! use u_rooming::sa::{create_rng, AnnealConfig};
//! use u_rooming::{io::read_matrix, optimize, Config};
//!
//! let input = "0 5 0 0\n1 0 0 0\n0 0 0 2\n0 0 2 0\n";
//! let config = Config {
//!     population: 4,
//!     capacity: 2,
//!     anneal: AnnealConfig::default().with_batch_size(1_000).with_accepted_cap(100),
//!     ..Config::default()
//! };
//! let matrix = read_matrix(input.as_bytes(), config.population).unwrap();
//! let result = optimize(&matrix, &config, &mut create_rng(Some(42)), None).unwrap();
//! assert_eq!(result.solution.members().count(), 4);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod moves;
pub mod report;
pub mod sa;
pub mod scoring;
mod solve;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Assignment, CompatibilityMatrix};
pub use report::Report;
pub use solve::optimize;
