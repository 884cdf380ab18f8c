//! Wires the matrix, assignment, moves, and annealer into one run.

use std::sync::atomic::AtomicBool;

use rand::Rng;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Assignment, CompatibilityMatrix};
use crate::moves::{MoveGenerator, RoomingProblem};
use crate::sa::{AnnealResult, Annealer};

/// Builds the sequential initial assignment and anneals it.
///
/// Fails with [`Error::MissingRows`] when `matrix` holds fewer individuals
/// than `config.population`. The caller owns the random stream, usually
/// `create_rng(config.seed)`.
///
/// # Examples
///
/// ```
/// use u_rooming::sa::{create_rng, AnnealConfig};
/// use u_rooming::{optimize, CompatibilityMatrix, Config};
///
/// let matrix = CompatibilityMatrix::from_rows(vec![
///     vec![0, 5, 0, 0],
///     vec![1, 0, 0, 0],
///     vec![0, 0, 0, 2],
///     vec![0, 0, 2, 0],
/// ])
/// .unwrap();
/// let config = Config {
///     population: 4,
///     capacity: 2,
///     anneal: AnnealConfig::default().with_batch_size(2_000).with_accepted_cap(200),
///     ..Config::default()
/// };
/// let result = optimize(&matrix, &config, &mut create_rng(Some(1)), None).unwrap();
/// assert!(result.converged);
/// assert_eq!(result.solution.len(), 2);
/// ```
pub fn optimize<R: Rng>(
    matrix: &CompatibilityMatrix,
    config: &Config,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<AnnealResult<Assignment>> {
    config.validate()?;
    if matrix.len() < config.population {
        return Err(Error::MissingRows {
            expected: config.population,
            found: matrix.len(),
        });
    }

    let assignment = Assignment::sequential(config.population, config.capacity);
    let generator = MoveGenerator::for_assignment(&assignment)?;
    let problem = RoomingProblem::new(matrix, generator);
    info!(
        population = config.population,
        capacity = config.capacity,
        groups = assignment.len(),
        "initial assignment built"
    );

    let annealer = Annealer::new(&problem, assignment, config.anneal.clone())?;
    Ok(annealer.run_with_cancel(rng, cancel))
}
