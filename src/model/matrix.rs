//! Directional compatibility matrix.

use crate::error::{Error, Result};

/// Pairwise affinity values between `n` individuals.
///
/// Row `i` holds the ratings individual `i` gives to every individual
/// (including itself, which is never read). The matrix is directional:
/// `affinity(i, j)` and `affinity(j, i)` are independent values and are
/// never symmetrized.
///
/// # Examples
///
/// ```
/// use u_rooming::model::CompatibilityMatrix;
///
/// let m = CompatibilityMatrix::from_rows(vec![vec![0, 5], vec![1, 0]]).unwrap();
/// assert_eq!(m.affinity(0, 1), 5);
/// assert_eq!(m.affinity(1, 0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityMatrix {
    n: usize,
    values: Vec<i64>,
}

/// Read-only view of one individual's outgoing ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Individual<'a> {
    /// Dense 0-based identifier.
    pub id: usize,
    /// Rating toward every individual, indexed by target id.
    pub ratings: &'a [i64],
}

impl Individual<'_> {
    /// Rating this individual gives to `target`.
    pub fn rating_of(&self, target: usize) -> i64 {
        self.ratings[target]
    }
}

impl CompatibilityMatrix {
    /// Builds the matrix from one row per individual, in identifier order.
    ///
    /// Every row must hold at least one value per individual; values past
    /// the population size are ignored.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (row, ratings) in rows.into_iter().enumerate() {
            if ratings.len() < n {
                return Err(Error::ShortRow {
                    row,
                    expected: n,
                    found: ratings.len(),
                });
            }
            values.extend_from_slice(&ratings[..n]);
        }
        Ok(Self { n, values })
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Rating `source` gives to `target`.
    ///
    /// # Panics
    ///
    /// Panics if either identifier is outside `0..len()`.
    #[inline]
    pub fn affinity(&self, source: usize, target: usize) -> i64 {
        assert!(
            source < self.n && target < self.n,
            "affinity({source}, {target}) out of range for {} individuals",
            self.n
        );
        self.values[source * self.n + target]
    }

    /// Checked variant of [`affinity`](Self::affinity).
    pub fn get(&self, source: usize, target: usize) -> Option<i64> {
        (source < self.n && target < self.n).then(|| self.values[source * self.n + target])
    }

    /// The individual with identifier `id`, if populated.
    pub fn individual(&self, id: usize) -> Option<Individual<'_>> {
        (id < self.n).then(|| Individual {
            id,
            ratings: &self.values[id * self.n..(id + 1) * self.n],
        })
    }

    /// All individuals in identifier order.
    pub fn individuals(&self) -> impl Iterator<Item = Individual<'_>> {
        self.values
            .chunks_exact(self.n.max(1))
            .take(self.n)
            .enumerate()
            .map(|(id, ratings)| Individual { id, ratings })
    }
}
