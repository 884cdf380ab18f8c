//! Group and aggregate compatibility scores.
//!
//! Lower scores are better: the annealer minimizes [`aggregate_score`].
//! Every function rescans the groups it is given; nothing is cached.

use crate::model::{Assignment, CompatibilityMatrix, Group};

/// Sum of directional ratings over all member pairs `p < q`.
///
/// Only `member[p] -> member[q]` is read for each pair, so reordering a
/// group's members can change its score.
///
/// # Examples
///
/// ```
/// use u_rooming::model::{CompatibilityMatrix, Group};
/// use u_rooming::scoring::group_score;
///
/// let m = CompatibilityMatrix::from_rows(vec![vec![0, 5], vec![1, 0]]).unwrap();
/// assert_eq!(group_score(&Group { id: 0, members: vec![0, 1] }, &m), 5);
/// assert_eq!(group_score(&Group { id: 0, members: vec![1, 0] }, &m), 1);
/// ```
pub fn group_score(group: &Group, matrix: &CompatibilityMatrix) -> i64 {
    let members = &group.members;
    let mut score = 0;
    for (p, &source) in members.iter().enumerate() {
        for &target in &members[p + 1..] {
            score += matrix.affinity(source, target);
        }
    }
    score
}

/// Mean group score across all groups; `0.0` when there are no groups.
pub fn aggregate_score(assignment: &Assignment, matrix: &CompatibilityMatrix) -> f64 {
    if assignment.is_empty() {
        return 0.0;
    }
    let total: i64 = assignment
        .groups()
        .iter()
        .map(|g| group_score(g, matrix))
        .sum();
    total as f64 / assignment.len() as f64
}

/// Lowest (best) group score, or `None` without groups.
pub fn best_group_score(assignment: &Assignment, matrix: &CompatibilityMatrix) -> Option<i64> {
    assignment
        .groups()
        .iter()
        .map(|g| group_score(g, matrix))
        .min()
}

/// Highest (worst) group score, or `None` without groups.
pub fn worst_group_score(assignment: &Assignment, matrix: &CompatibilityMatrix) -> Option<i64> {
    assignment
        .groups()
        .iter()
        .map(|g| group_score(g, matrix))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_people() -> CompatibilityMatrix {
        CompatibilityMatrix::from_rows(vec![
            vec![0, 5, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 2],
            vec![0, 0, 2, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_scenario_scores() {
        let m = four_people();
        let a = Assignment::sequential(4, 2);
        assert_eq!(group_score(&a.groups()[0], &m), 5);
        assert_eq!(group_score(&a.groups()[1], &m), 2);
        assert!((aggregate_score(&a, &m) - 3.5).abs() < 1e-12);
        assert_eq!(best_group_score(&a, &m), Some(2));
        assert_eq!(worst_group_score(&a, &m), Some(5));
    }

    #[test]
    fn test_group_score_uses_lower_index_rating() {
        // 0->1 = 1, 1->0 = 10, 0->2 = 2, 2->0 = 20, 1->2 = 3, 2->1 = 30
        let m = CompatibilityMatrix::from_rows(vec![
            vec![0, 1, 2],
            vec![10, 0, 3],
            vec![20, 30, 0],
        ])
        .unwrap();
        let forward = Group {
            id: 0,
            members: vec![0, 1, 2],
        };
        let backward = Group {
            id: 0,
            members: vec![2, 1, 0],
        };
        assert_eq!(group_score(&forward, &m), 1 + 2 + 3);
        assert_eq!(group_score(&backward, &m), 30 + 20 + 10);
    }

    #[test]
    fn test_aggregate_matches_manual_mean() {
        let rows: Vec<Vec<i64>> = (0..6)
            .map(|i| (0..6).map(|j| (i * 7 + j * 3) % 11 - 5).collect())
            .collect();
        let m = CompatibilityMatrix::from_rows(rows.clone()).unwrap();
        let a = Assignment::sequential(6, 3);

        let manual: Vec<i64> = a
            .groups()
            .iter()
            .map(|g| {
                let s = &g.members;
                rows[s[0]][s[1]] + rows[s[0]][s[2]] + rows[s[1]][s[2]]
            })
            .collect();
        let expected = manual.iter().sum::<i64>() as f64 / manual.len() as f64;
        assert!((aggregate_score(&a, &m) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_is_real_valued() {
        let m = CompatibilityMatrix::from_rows(vec![
            vec![0, 1, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let a = Assignment::sequential(4, 2);
        assert!((aggregate_score(&a, &m) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_assignment() {
        let m = four_people();
        let a = Assignment::sequential(1, 2);
        assert_eq!(aggregate_score(&a, &m), 0.0);
        assert_eq!(best_group_score(&a, &m), None);
        assert_eq!(worst_group_score(&a, &m), None);
    }
}
