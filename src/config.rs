//! Search configuration.
//!
//! A [`SearchConfig`] can be built in code, parsed from TOML, and then adjusted through
//! environment variables:
//!
//! ```toml
//! iterations = 1000
//! capacity = 2000.0
//! cost_weight = 0.3
//! benefit_weight = 0.7
//! rollout = "benefit_biased"
//! seed = 7
//! ```

use crate::error::{ConfigError, SearchError};
use crate::mcts::RolloutPolicy;
use crate::scoring::Weights;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ITERATIONS: u32 = 1000;
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.41;
pub const DEFAULT_EXPLORE_PROBABILITY: f64 = 0.1;

pub const ENV_ITERATIONS: &str = "MCTS_PLANNER_ITERATIONS";
pub const ENV_CAPACITY: &str = "MCTS_PLANNER_CAPACITY";
pub const ENV_SEED: &str = "MCTS_PLANNER_SEED";

/// Everything one search invocation needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of select/expand/simulate/backpropagate cycles.
    pub iterations: u32,
    /// Maximum allowed sum of item costs.
    pub capacity: f64,
    /// Importance of keeping total cost low. Not renormalized.
    pub cost_weight: f64,
    /// Importance of a high total benefit. Not renormalized.
    pub benefit_weight: f64,
    /// UCB1 exploration constant.
    pub exploration_constant: f64,
    /// Chance that selection jumps straight to a random child of the root.
    pub explore_probability: f64,
    pub rollout: RolloutPolicy,
    /// Seed for the reproducible generator; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            capacity: 100.0,
            cost_weight: 0.5,
            benefit_weight: 0.5,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            explore_probability: DEFAULT_EXPLORE_PROBABILITY,
            rollout: RolloutPolicy::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file, applies environment overrides and validates the result.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading search config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig = toml::from_str(&content)?;
        let config = config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Overrides iterations, capacity and seed from the environment.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(iterations) = env_value(ENV_ITERATIONS) {
            self.iterations = iterations;
        }
        if let Some(capacity) = env_value(ENV_CAPACITY) {
            self.capacity = capacity;
        }
        if let Some(seed) = env_value(ENV_SEED) {
            self.seed = Some(seed);
        }
        self
    }

    pub fn weights(&self) -> Result<Weights, SearchError> {
        Weights::new(self.cost_weight, self.benefit_weight)
    }

    /// Checks the invocation contract: positive capacity and iterations, valid weights and
    /// exploration settings.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(SearchError::InvalidCapacity(self.capacity));
        }
        if self.iterations == 0 {
            return Err(SearchError::ZeroIterations);
        }
        self.weights()?;
        check_exploration(self.exploration_constant, self.explore_probability)
    }
}

/// The exploration constant must be finite and non-negative; the explore probability must lie
/// in `0.0..=1.0`.
pub(crate) fn check_exploration(
    exploration_constant: f64,
    explore_probability: f64,
) -> Result<(), SearchError> {
    if !exploration_constant.is_finite() || exploration_constant < 0.0 {
        return Err(SearchError::InvalidParameter {
            name: "exploration_constant",
            value: exploration_constant,
        });
    }
    if !(0.0..=1.0).contains(&explore_probability) {
        return Err(SearchError::InvalidParameter {
            name: "explore_probability",
            value: explore_probability,
        });
    }
    Ok(())
}

fn env_value<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!("{key}={raw} overrides config");
            Some(value)
        }
        Err(_) => {
            warn!("Ignoring {key}={raw}: not a valid value");
            None
        }
    }
}
