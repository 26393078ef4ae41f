//! Reward of a completed selection.
//!
//! The reward is `benefit_weight * normalized_benefit - cost_weight * normalized_cost²`, where
//! cost is normalized by the capacity limit and benefit by the largest single benefit in the
//! catalog. Squaring the cost term punishes selections close to the capacity boundary more than
//! proportionally. This is the only scoring law in the crate.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// The two objective weights, both finite and non-negative.
///
/// The engine uses them exactly as given. Callers that collect raw preferences should go
/// through [`Weights::normalized`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    cost: f64,
    benefit: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            cost: 0.5,
            benefit: 0.5,
        }
    }
}

impl Weights {
    pub fn new(cost: f64, benefit: f64) -> Result<Self, SearchError> {
        Ok(Self {
            cost: check_weight("cost", cost)?,
            benefit: check_weight("benefit", benefit)?,
        })
    }

    /// Rescales two raw preferences so that they sum to one.
    pub fn normalized(cost: f64, benefit: f64) -> Result<Self, SearchError> {
        let raw = Weights::new(cost, benefit)?;
        let total = raw.cost + raw.benefit;
        if total <= 0.0 || !total.is_finite() {
            return Err(SearchError::InvalidWeight {
                name: "total",
                value: total,
            });
        }
        Ok(Self {
            cost: raw.cost / total,
            benefit: raw.benefit / total,
        })
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn benefit(&self) -> f64 {
        self.benefit
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<f64, SearchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SearchError::InvalidWeight { name, value })
    }
}

/// Scores completed selections for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    weights: Weights,
    capacity: f64,
    max_benefit: f64,
}

impl ScoringPolicy {
    /// `capacity` must be positive; `max_benefit` is the largest per-item benefit in the catalog.
    pub fn new(weights: Weights, capacity: f64, max_benefit: f64) -> Self {
        Self {
            weights,
            capacity,
            max_benefit,
        }
    }

    /// Reward for a selection with the given totals.
    ///
    /// A catalog whose benefits are all zero contributes a zero benefit term.
    pub fn score(&self, total_cost: f64, total_benefit: f64) -> f64 {
        let normalized_cost = total_cost / self.capacity;
        let normalized_benefit = if self.max_benefit > 0.0 {
            total_benefit / self.max_benefit
        } else {
            0.0
        };
        self.weights.benefit * normalized_benefit
            - self.weights.cost * normalized_cost * normalized_cost
    }
}
