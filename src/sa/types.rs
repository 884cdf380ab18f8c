//! Core trait for in-place Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem whose moves mutate a single live
/// solution and can be reverted exactly.
///
/// The user implements move proposal, application, reversal, and cost
/// evaluation. The annealer handles temperature management, the
/// acceptance criterion, batch cooling, and convergence.
///
/// # Minimization
///
/// The annealer minimizes the cost function. For maximization, negate
/// the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_rooming::sa::AnnealProblem;
///
/// struct Sorting;
///
/// impl AnnealProblem for Sorting {
///     type Solution = Vec<usize>;
///     type Move = (usize, usize);
///
///     fn cost(&self, perm: &Vec<usize>) -> f64 {
///         perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
///     }
///
///     fn propose<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> (usize, usize) {
///         (rng.random_range(0..perm.len()), rng.random_range(0..perm.len()))
///     }
///
///     fn apply(&self, perm: &mut Vec<usize>, &(i, j): &(usize, usize)) {
///         perm.swap(i, j);
///     }
///
///     fn undo(&self, perm: &mut Vec<usize>, &(i, j): &(usize, usize)) {
///         perm.swap(i, j);
///     }
/// }
/// ```
pub trait AnnealProblem {
    /// The solution representation type.
    type Solution;

    /// A reversible perturbation of a solution.
    type Move;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Draws a move for the current solution without applying it.
    fn propose<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Move;

    /// Applies `mv` to `solution` in place.
    fn apply(&self, solution: &mut Self::Solution, mv: &Self::Move);

    /// Reverts a previous `apply` of the same move.
    ///
    /// `apply` followed by `undo` must leave the solution element-wise
    /// identical to its prior state.
    fn undo(&self, solution: &mut Self::Solution, mv: &Self::Move);
}
