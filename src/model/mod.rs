//! Data model: the compatibility matrix and the group assignment.
//!
//! [`CompatibilityMatrix`] is immutable once built. [`Assignment`] is the
//! single live solution the annealer mutates through slot swaps.

mod assignment;
mod matrix;

pub use assignment::{Assignment, Group, Slot};
pub use matrix::{CompatibilityMatrix, Individual};
