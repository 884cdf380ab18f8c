//! Plain-text run report.

use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::model::{Assignment, CompatibilityMatrix};
use crate::sa::AnnealResult;
use crate::scoring::{aggregate_score, best_group_score, group_score, worst_group_score};

/// Parameters, summary scores, and per-group listing of a finished run.
///
/// Member ids are listed in ascending order; scores are computed from the
/// stored member order.
pub struct Report<'a> {
    pub config: &'a Config,
    pub matrix: &'a CompatibilityMatrix,
    pub result: &'a AnnealResult<Assignment>,
    pub elapsed: Duration,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assignment = &self.result.solution;
        let anneal = &self.config.anneal;

        writeln!(f, "Parameters:")?;
        writeln!(f, "  Initial Temperature: {}", anneal.initial_temperature)?;
        writeln!(f, "  Cooling Factor: {}", anneal.cooling_factor)?;
        if let Some(seed) = self.config.seed {
            writeln!(f, "  Seed: {seed}")?;
        }
        writeln!(f, "  Execution time: {:.3}sec", self.elapsed.as_secs_f64())?;

        writeln!(f, "Results:")?;
        writeln!(
            f,
            "  Average Room Score: {}",
            aggregate_score(assignment, self.matrix)
        )?;
        writeln!(
            f,
            "  Best Room Score: {}",
            display_score(best_group_score(assignment, self.matrix))
        )?;
        writeln!(
            f,
            "  Worst Room Score: {}",
            display_score(worst_group_score(assignment, self.matrix))
        )?;
        writeln!(
            f,
            "  Iterations: {} ({} accepted, {} cooling steps)",
            self.result.iterations, self.result.accepted_moves, self.result.cooling_steps
        )?;
        if self.result.cancelled {
            writeln!(f, "  Interrupted before convergence")?;
        }
        let excluded = assignment.excluded();
        if !excluded.is_empty() {
            writeln!(f, "  Unassigned: {excluded:?}")?;
        }

        writeln!(f, "Room Assignments:")?;
        for group in assignment.groups() {
            let mut members = group.members.clone();
            members.sort_unstable();
            writeln!(f, "  Room Number: {}", group.id)?;
            writeln!(f, "    Students: {members:?}")?;
            writeln!(f, "    Score: {}", group_score(group, self.matrix))?;
        }
        Ok(())
    }
}

fn display_score(score: Option<i64>) -> String {
    score.map_or_else(|| "n/a".to_string(), |s| s.to_string())
}
