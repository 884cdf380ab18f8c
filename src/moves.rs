//! Neighbor moves over an [`Assignment`] and the annealing adapter.
//!
//! Two move kinds are drawn with equal probability:
//!
//! - **Slot swap**: one random slot in each of two random groups is
//!   exchanged. Slot indices come from `0..capacity - 1`, so the last
//!   slot of a group never takes part.
//! - **Block swap**: slot `0` of group A is exchanged with slot
//!   `capacity - 2` of group B, then slot `1` of A with slot
//!   `capacity - 1` of B.
//!
//! Groups are drawn independently, so both may be the same group. A slot
//! swap then reorders that group (or does nothing if the slots match).

use rand::Rng;

use crate::error::{Error, Result};
use crate::model::{Assignment, CompatibilityMatrix, Slot};
use crate::sa::AnnealProblem;
use crate::scoring::aggregate_score;

/// A reversible perturbation of an [`Assignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the occupants of two slots.
    SlotSwap { a: Slot, b: Slot },
    /// Exchange `first[0] <-> second[capacity-2]` and
    /// `first[1] <-> second[capacity-1]`.
    BlockSwap { first: usize, second: usize },
}

impl Move {
    /// The single-slot exchanges this move performs, in application order.
    pub fn exchanges(&self, capacity: usize) -> Vec<(Slot, Slot)> {
        match *self {
            Move::SlotSwap { a, b } => vec![(a, b)],
            Move::BlockSwap { first, second } => vec![
                (Slot::new(first, 0), Slot::new(second, capacity - 2)),
                (Slot::new(first, 1), Slot::new(second, capacity - 1)),
            ],
        }
    }

    /// Applies the move in place.
    pub fn apply(&self, assignment: &mut Assignment) {
        for (a, b) in self.exchanges(assignment.capacity()) {
            assignment.swap(a, b);
        }
    }

    /// Reverts a previous [`apply`](Self::apply).
    ///
    /// Exchanges are replayed in reverse order, which restores the prior
    /// state even when a block swap's two exchanges overlap inside one
    /// group.
    pub fn undo(&self, assignment: &mut Assignment) {
        for (a, b) in self.exchanges(assignment.capacity()).into_iter().rev() {
            assignment.swap(a, b);
        }
    }
}

/// Draws random [`Move`]s for a fixed group layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGenerator {
    group_count: usize,
    capacity: usize,
}

impl MoveGenerator {
    /// Creates a generator for `group_count` groups of `capacity` members.
    ///
    /// Rejects layouts with no group or with fewer than two slots per
    /// group, where a block swap has no valid target slots.
    pub fn new(group_count: usize, capacity: usize) -> Result<Self> {
        if group_count == 0 {
            return Err(Error::InvalidConfig(
                "at least one group is required to generate moves".into(),
            ));
        }
        if capacity < 2 {
            return Err(Error::InvalidConfig(format!(
                "capacity must be at least 2 to generate moves, got {capacity}"
            )));
        }
        Ok(Self {
            group_count,
            capacity,
        })
    }

    /// Generator matching the layout of `assignment`.
    pub fn for_assignment(assignment: &Assignment) -> Result<Self> {
        Self::new(assignment.len(), assignment.capacity())
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Draws two groups, then a fair coin for the move kind, then (for a
    /// slot swap) one slot per group.
    pub fn propose<R: Rng>(&self, rng: &mut R) -> Move {
        let first = rng.random_range(0..self.group_count);
        let second = rng.random_range(0..self.group_count);

        if rng.random_bool(0.5) {
            Move::SlotSwap {
                a: Slot::new(first, rng.random_range(0..self.capacity - 1)),
                b: Slot::new(second, rng.random_range(0..self.capacity - 1)),
            }
        } else {
            Move::BlockSwap { first, second }
        }
    }
}

/// Room assignment as an [`AnnealProblem`]: minimizes the mean group score.
#[derive(Debug, Clone, Copy)]
pub struct RoomingProblem<'m> {
    matrix: &'m CompatibilityMatrix,
    generator: MoveGenerator,
}

impl<'m> RoomingProblem<'m> {
    pub fn new(matrix: &'m CompatibilityMatrix, generator: MoveGenerator) -> Self {
        Self { matrix, generator }
    }

    pub fn matrix(&self) -> &'m CompatibilityMatrix {
        self.matrix
    }
}

impl AnnealProblem for RoomingProblem<'_> {
    type Solution = Assignment;
    type Move = Move;

    fn cost(&self, assignment: &Assignment) -> f64 {
        aggregate_score(assignment, self.matrix)
    }

    fn propose<R: Rng>(&self, _assignment: &Assignment, rng: &mut R) -> Move {
        self.generator.propose(rng)
    }

    fn apply(&self, assignment: &mut Assignment, mv: &Move) {
        mv.apply(assignment);
    }

    fn undo(&self, assignment: &mut Assignment, mv: &Move) {
        mv.undo(assignment);
    }
}
