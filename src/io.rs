//! Rating matrix input.
//!
//! The input holds one line per individual, in identifier order, each a
//! whitespace-separated list of integer ratings indexed by target id.
//! Lines beyond the population size are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::CompatibilityMatrix;

/// Parses the first `population` rows of `reader`.
///
/// # Examples
///
/// ```
/// use u_rooming::io::read_matrix;
///
/// let m = read_matrix("0 3\n-2 0\n".as_bytes(), 2).unwrap();
/// assert_eq!(m.affinity(1, 0), -2);
/// ```
pub fn read_matrix<R: BufRead>(reader: R, population: usize) -> Result<CompatibilityMatrix> {
    let mut rows = Vec::with_capacity(population);
    for (index, line) in reader.lines().take(population).enumerate() {
        let line = line?;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| Error::Parse {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    if rows.len() < population {
        return Err(Error::MissingRows {
            expected: population,
            found: rows.len(),
        });
    }
    CompatibilityMatrix::from_rows(rows)
}

/// Opens `path` and parses it with [`read_matrix`].
pub fn load_matrix(path: impl AsRef<Path>, population: usize) -> Result<CompatibilityMatrix> {
    let path = path.as_ref();
    debug!(path = %path.display(), population, "loading rating matrix");
    let file = File::open(path)?;
    read_matrix(BufReader::new(file), population)
}
