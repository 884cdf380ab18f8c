//! Run configuration.
//!
//! A [`Config`] is built once (from defaults, a TOML file, and command
//! line overrides) and passed by reference to the loader and annealer.
//!
//! ```
//! use u_rooming::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     population = 8
//!     capacity = 2
//!     seed = 7
//!
//!     [anneal]
//!     initial_temperature = 50.0
//! "#).unwrap();
//!
//! assert_eq!(config.group_count(), 4);
//! assert_eq!(config.seed, Some(7));
//! assert!((config.anneal.cooling_factor - 0.95).abs() < 1e-12);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sa::AnnealConfig;

/// Parameters of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Rating matrix file, one whitespace-separated row per individual.
    pub input: PathBuf,

    /// Number of individuals read from the input.
    pub population: usize,

    /// Members per group.
    pub capacity: usize,

    /// Seed for the run's random stream; see [`crate::sa::create_rng`].
    pub seed: Option<u64>,

    /// Annealing schedule.
    pub anneal: AnnealConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("roommates.txt"),
            population: 200,
            capacity: 4,
            seed: None,
            anneal: AnnealConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Number of full groups; trailing individuals beyond
    /// `group_count() * capacity` stay unassigned.
    pub fn group_count(&self) -> usize {
        if self.capacity == 0 {
            0
        } else {
            self.population / self.capacity
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity < 2 {
            return Err(Error::InvalidConfig(format!(
                "capacity must be at least 2, got {}",
                self.capacity
            )));
        }
        if self.population < self.capacity {
            return Err(Error::InvalidConfig(format!(
                "population {} is smaller than capacity {}",
                self.population, self.capacity
            )));
        }
        self.anneal.validate().map_err(Error::InvalidConfig)
    }
}
