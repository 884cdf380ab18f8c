//! SA configuration and batch cooling parameters.

use serde::{Deserialize, Serialize};

/// Configuration for the annealing loop.
///
/// The temperature is multiplied by `cooling_factor` at every batch
/// boundary: after more than `batch_size` attempts, or as soon as
/// `accepted_cap` moves have been accepted since the last boundary.
///
/// # Examples
///
/// ```
/// use u_rooming::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_factor(0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AnnealConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Multiplicative factor in (0, 1) applied at each batch boundary.
    pub cooling_factor: f64,

    /// Attempts per batch. A batch with no accepted move ends the run.
    pub batch_size: usize,

    /// Accepted moves that close a batch early.
    pub accepted_cap: usize,

    /// Hard attempt budget. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_factor: 0.95,
            batch_size: 20_000,
            accepted_cap: 2_000,
            max_iterations: 0,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_accepted_cap(mut self, n: usize) -> Self {
        self.accepted_cap = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        if self.accepted_cap == 0 {
            return Err("accepted_cap must be at least 1".into());
        }
        Ok(())
    }
}
