//! SA execution loop.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use tracing::{debug, info, trace};

use super::config::AnnealConfig;
use super::types::AnnealProblem;
use crate::error::{Error, Result};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S> {
    /// The solution reached when the loop stopped.
    pub solution: S,

    /// Cost of that solution.
    pub cost: f64,

    /// Total number of attempted moves.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of batch boundaries at which the temperature was cooled.
    pub cooling_steps: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Whether a full batch passed without an accepted move.
    pub converged: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Current cost recorded at the start and at every cooling step.
    pub cost_history: Vec<f64>,
}

/// Outcome of a single annealing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The move lowered the cost and was kept.
    Improved,
    /// The move raised the cost but passed the Metropolis test.
    Accepted,
    /// The move was undone.
    Rejected,
}

impl StepOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, StepOutcome::Rejected)
    }
}

/// Probability of moving from a solution of cost `old` to one of cost `new`.
///
/// Improvements are always taken, ties never, and a worsening move is
/// taken with probability `exp((old - new) / temperature)`. A
/// non-positive temperature rejects every worsening move.
///
/// # Examples
///
/// ```
/// use u_rooming::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(5.0, 4.0, 10.0), 1.0);
/// assert_eq!(acceptance_probability(5.0, 5.0, 10.0), 0.0);
/// assert!((acceptance_probability(5.0, 6.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn acceptance_probability(old: f64, new: f64, temperature: f64) -> f64 {
    match new.partial_cmp(&old) {
        Some(CmpOrdering::Less) => 1.0,
        Some(CmpOrdering::Greater) if temperature > 0.0 => ((old - new) / temperature).exp(),
        _ => 0.0,
    }
}

/// Metropolis acceptance test.
///
/// Only a worsening move consumes a uniform draw from `rng`.
pub fn is_accepted<R: Rng>(old: f64, new: f64, temperature: f64, rng: &mut R) -> bool {
    match new.partial_cmp(&old) {
        Some(CmpOrdering::Less) => true,
        Some(CmpOrdering::Greater) => {
            rng.random::<f64>() < acceptance_probability(old, new, temperature)
        }
        _ => false,
    }
}

/// Whether the search has stalled: a full batch of attempts with no
/// accepted move since the last reset.
///
/// The loop keeps running while `accepted != 0 || attempts < batch_size`.
pub fn has_converged(
    accepted_since_reset: usize,
    attempts_since_reset: usize,
    batch_size: usize,
) -> bool {
    accepted_since_reset == 0 && attempts_since_reset >= batch_size
}

/// Simulated annealing state machine over one live solution.
///
/// Each step proposes a move, applies it in place, and either keeps it or
/// undoes it. Batch counters reset, and the temperature cools, whenever
/// more than `batch_size` attempts or `accepted_cap` acceptances pile up.
pub struct Annealer<'p, P: AnnealProblem> {
    problem: &'p P,
    config: AnnealConfig,
    solution: P::Solution,
    temperature: f64,
    current_cost: f64,
    attempts_since_reset: usize,
    accepted_since_reset: usize,
    total_attempts: usize,
    total_accepted: usize,
    improving_moves: usize,
    cooling_steps: usize,
    cost_history: Vec<f64>,
}

impl<'p, P: AnnealProblem> Annealer<'p, P> {
    /// Creates an annealer that takes ownership of the initial solution.
    pub fn new(problem: &'p P, solution: P::Solution, config: AnnealConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        let current_cost = problem.cost(&solution);
        Ok(Self {
            problem,
            temperature: config.initial_temperature,
            config,
            solution,
            current_cost,
            attempts_since_reset: 0,
            accepted_since_reset: 0,
            total_attempts: 0,
            total_accepted: 0,
            improving_moves: 0,
            cooling_steps: 0,
            cost_history: vec![current_cost],
        })
    }

    pub fn solution(&self) -> &P::Solution {
        &self.solution
    }

    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn attempts_since_reset(&self) -> usize {
        self.attempts_since_reset
    }

    pub fn accepted_since_reset(&self) -> usize {
        self.accepted_since_reset
    }

    pub fn total_attempts(&self) -> usize {
        self.total_attempts
    }

    /// See [`has_converged`].
    pub fn has_converged(&self) -> bool {
        has_converged(
            self.accepted_since_reset,
            self.attempts_since_reset,
            self.config.batch_size,
        )
    }

    /// Proposes a random move and runs it through [`step_with`](Self::step_with).
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let mv = self.problem.propose(&self.solution, rng);
        self.step_with(&mv, rng)
    }

    /// Applies `mv`, scores it, and keeps or reverts it.
    pub fn step_with<R: Rng>(&mut self, mv: &P::Move, rng: &mut R) -> StepOutcome {
        self.problem.apply(&mut self.solution, mv);
        let new_cost = self.problem.cost(&self.solution);
        let old_cost = self.current_cost;

        let outcome = if is_accepted(old_cost, new_cost, self.temperature, rng) {
            self.current_cost = new_cost;
            self.accepted_since_reset += 1;
            self.total_accepted += 1;
            trace!(old_cost, new_cost, temperature = self.temperature, "move accepted");
            if new_cost < old_cost {
                self.improving_moves += 1;
                StepOutcome::Improved
            } else {
                StepOutcome::Accepted
            }
        } else {
            self.problem.undo(&mut self.solution, mv);
            StepOutcome::Rejected
        };

        self.attempts_since_reset += 1;
        self.total_attempts += 1;

        if self.attempts_since_reset > self.config.batch_size
            || self.accepted_since_reset >= self.config.accepted_cap
        {
            self.cool();
        }

        outcome
    }

    fn cool(&mut self) {
        debug!(
            step = self.cooling_steps,
            temperature = self.temperature,
            accepted = self.accepted_since_reset,
            attempts = self.attempts_since_reset,
            cost = self.current_cost,
            "cooling"
        );
        self.temperature *= self.config.cooling_factor;
        self.attempts_since_reset = 0;
        self.accepted_since_reset = 0;
        self.cooling_steps += 1;
        self.cost_history.push(self.current_cost);
    }

    /// Runs until convergence (or the iteration budget, if set).
    pub fn run<R: Rng>(self, rng: &mut R) -> AnnealResult<P::Solution> {
        self.run_with_cancel(rng, None)
    }

    /// Runs with an optional cancellation flag.
    ///
    /// The flag is checked only between steps, so the returned solution
    /// is always fully evaluated.
    pub fn run_with_cancel<R: Rng>(
        mut self,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> AnnealResult<P::Solution> {
        info!(
            temperature = self.temperature,
            cooling_factor = self.config.cooling_factor,
            cost = self.current_cost,
            "annealing started"
        );

        let mut cancelled = false;
        while !self.has_converged() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if self.config.max_iterations > 0 && self.total_attempts >= self.config.max_iterations {
                break;
            }
            self.step(rng);
        }

        let converged = self.has_converged();
        info!(
            cost = self.current_cost,
            iterations = self.total_attempts,
            accepted = self.total_accepted,
            cooling_steps = self.cooling_steps,
            temperature = self.temperature,
            converged,
            cancelled,
            "annealing finished"
        );

        AnnealResult {
            solution: self.solution,
            cost: self.current_cost,
            iterations: self.total_attempts,
            accepted_moves: self.total_accepted,
            improving_moves: self.improving_moves,
            cooling_steps: self.cooling_steps,
            final_temperature: self.temperature,
            converged,
            cancelled,
            cost_history: self.cost_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sa::create_rng;
    use proptest::prelude::*;
    use rand::Rng;

    // ---- Discrete: permutation sorting by in-place swaps ----

    struct PermSortProblem;

    impl AnnealProblem for PermSortProblem {
        type Solution = Vec<usize>;
        type Move = (usize, usize);

        fn cost(&self, perm: &Vec<usize>) -> f64 {
            perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
        }

        fn propose<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> (usize, usize) {
            (
                rng.random_range(0..perm.len()),
                rng.random_range(0..perm.len()),
            )
        }

        fn apply(&self, perm: &mut Vec<usize>, &(i, j): &(usize, usize)) {
            perm.swap(i, j);
        }

        fn undo(&self, perm: &mut Vec<usize>, &(i, j): &(usize, usize)) {
            perm.swap(i, j);
        }
    }

    fn reversed(n: usize) -> Vec<usize> {
        (0..n).rev().collect()
    }

    #[test]
    fn test_is_accepted_rules() {
        let mut rng = create_rng(Some(1));
        assert!(is_accepted(5.0, 4.0, 1e-9, &mut rng));
        assert!(!is_accepted(5.0, 5.0, 1e9, &mut rng));
        assert!(!is_accepted(5.0, 6.0, 0.0, &mut rng));
        assert!(!is_accepted(5.0, f64::NAN, 1e9, &mut rng));
    }

    #[test]
    fn test_is_accepted_high_temperature_mostly_accepts() {
        let mut rng = create_rng(Some(7));
        let hits = (0..1000)
            .filter(|_| is_accepted(0.0, 1.0, 1e6, &mut rng))
            .count();
        assert!(hits > 990, "expected near-certain acceptance, got {hits}");
    }

    #[test]
    fn test_has_converged_boundary() {
        assert!(has_converged(0, 20_000, 20_000));
        assert!(has_converged(0, 20_001, 20_000));
        assert!(!has_converged(0, 19_999, 20_000));
        assert!(!has_converged(1, 20_000, 20_000));
        assert!(!has_converged(0, 0, 20_000));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnnealConfig::default().with_cooling_factor(2.0);
        assert!(matches!(
            Annealer::new(&PermSortProblem, reversed(4), config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_improving_step_updates_cost() {
        let mut annealer =
            Annealer::new(&PermSortProblem, vec![1, 0, 2], AnnealConfig::default()).unwrap();
        let mut rng = create_rng(Some(3));
        assert_eq!(annealer.current_cost(), 2.0);

        let outcome = annealer.step_with(&(0, 1), &mut rng);
        assert_eq!(outcome, StepOutcome::Improved);
        assert_eq!(annealer.current_cost(), 0.0);
        assert_eq!(annealer.solution(), &vec![0, 1, 2]);
        assert_eq!(annealer.accepted_since_reset(), 1);
        assert_eq!(annealer.attempts_since_reset(), 1);
    }

    #[test]
    fn test_tie_is_rejected_and_reverted() {
        let mut annealer =
            Annealer::new(&PermSortProblem, vec![1, 0, 3, 2], AnnealConfig::default()).unwrap();
        let mut rng = create_rng(Some(3));
        // Swapping two misplaced but unrelated entries keeps the cost at 4.
        let outcome = annealer.step_with(&(0, 2), &mut rng);
        assert_eq!(outcome, StepOutcome::Rejected);
        assert_eq!(annealer.solution(), &vec![1, 0, 3, 2]);
        assert_eq!(annealer.current_cost(), 4.0);
    }

    #[test]
    fn test_worsening_step_rejected_when_cold() {
        let config = AnnealConfig::default().with_initial_temperature(1e-12);
        let mut annealer = Annealer::new(&PermSortProblem, vec![0, 1, 2], config).unwrap();
        let mut rng = create_rng(Some(3));
        let outcome = annealer.step_with(&(0, 2), &mut rng);
        assert_eq!(outcome, StepOutcome::Rejected);
        assert_eq!(annealer.solution(), &vec![0, 1, 2]);
        assert_eq!(annealer.current_cost(), 0.0);
        assert_eq!(annealer.total_attempts(), 1);
    }

    #[test]
    fn test_cooling_after_batch_overflow() {
        let config = AnnealConfig::default()
            .with_initial_temperature(1e-12)
            .with_batch_size(5)
            .with_cooling_factor(0.5);
        let mut annealer = Annealer::new(&PermSortProblem, vec![0, 1, 2], config).unwrap();
        let mut rng = create_rng(Some(3));

        for _ in 0..5 {
            annealer.step_with(&(0, 0), &mut rng);
        }
        assert_eq!(annealer.attempts_since_reset(), 5);
        assert!(annealer.has_converged());
        assert_eq!(annealer.temperature(), 1e-12);

        annealer.step_with(&(0, 0), &mut rng);
        assert_eq!(annealer.attempts_since_reset(), 0);
        assert_eq!(annealer.temperature(), 0.5e-12);
        assert!(!annealer.has_converged());
    }

    #[test]
    fn test_cooling_after_accepted_cap() {
        let config = AnnealConfig::default()
            .with_accepted_cap(1)
            .with_cooling_factor(0.5)
            .with_initial_temperature(8.0);
        let mut annealer = Annealer::new(&PermSortProblem, vec![1, 0, 2], config).unwrap();
        let mut rng = create_rng(Some(3));

        annealer.step_with(&(0, 1), &mut rng);
        assert_eq!(annealer.accepted_since_reset(), 0);
        assert_eq!(annealer.attempts_since_reset(), 0);
        assert_eq!(annealer.temperature(), 4.0);
    }

    #[test]
    fn test_run_sorts_permutation() {
        let config = AnnealConfig::default()
            .with_initial_temperature(2.0)
            .with_cooling_factor(0.8)
            .with_batch_size(500)
            .with_accepted_cap(50);
        let mut rng = create_rng(Some(42));
        let result = Annealer::new(&PermSortProblem, reversed(10), config)
            .unwrap()
            .run(&mut rng);

        assert!(result.converged);
        assert!(!result.cancelled);
        assert!(
            result.cost <= 4.0,
            "expected near-sorted permutation, got cost {}",
            result.cost
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
        assert_eq!(result.cost_history.len(), result.cooling_steps + 1);
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = AnnealConfig::default()
            .with_batch_size(300)
            .with_accepted_cap(30)
            .with_initial_temperature(5.0);
        let run = |seed| {
            let mut rng = create_rng(Some(seed));
            Annealer::new(&PermSortProblem, reversed(8), config.clone())
                .unwrap()
                .run(&mut rng)
        };
        let a = run(11);
        let b = run(11);
        assert_eq!(a.solution, b.solution);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.final_temperature, b.final_temperature);
    }

    #[test]
    fn test_max_iterations_limit() {
        let config = AnnealConfig::default().with_max_iterations(100);
        let mut rng = create_rng(Some(42));
        let result = Annealer::new(&PermSortProblem, reversed(20), config)
            .unwrap()
            .run(&mut rng);
        assert_eq!(result.iterations, 100);
        assert!(!result.converged);
    }

    #[test]
    fn test_cancellation() {
        // Flag set before running: cancellation is deterministic.
        let cancel = AtomicBool::new(true);
        let mut rng = create_rng(Some(42));
        let result = Annealer::new(&PermSortProblem, reversed(6), AnnealConfig::default())
            .unwrap()
            .run_with_cancel(&mut rng, Some(&cancel));
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.solution, reversed(6));
    }

    proptest! {
        #[test]
        fn prop_cold_rejects_worsening(
            delta in 0.5f64..1000.0,
            temperature in 1e-9f64..1e-3,
        ) {
            let p = acceptance_probability(0.0, delta, temperature);
            prop_assert!(p < 1e-200);
            prop_assert!(acceptance_probability(0.0, delta, temperature / 10.0) <= p);
        }

        #[test]
        fn prop_probability_in_unit_interval(
            old in -1e3f64..1e3,
            new in -1e3f64..1e3,
            temperature in 1e-6f64..1e6,
        ) {
            let p = acceptance_probability(old, new, temperature);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
