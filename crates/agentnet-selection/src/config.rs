use agentnet_core::{AgentnetError, AgentnetResult};
use serde::{Deserialize, Serialize};

/// Lower bound of the per-candidate eligibility jitter.
pub const JITTER_MIN: f64 = 0.5;
/// Upper bound of the per-candidate eligibility jitter.
pub const JITTER_MAX: f64 = 1.5;

/// Tunables of the selection engine.
///
/// Only `exploration_weight` shapes learning; the rest fix the sampling
/// policy and default to the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Weight of the entropy bonus broadcast on every update.
    #[serde(default = "default_exploration_weight")]
    pub exploration_weight: f64,
    /// Draws per allocation.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Tasks at or below this complexity only accept cheap workers.
    #[serde(default = "default_low_complexity_threshold")]
    pub low_complexity_threshold: f64,
    /// Workers at or above this cost are dropped for low-complexity tasks.
    #[serde(default = "default_budget_ceiling")]
    pub budget_ceiling: f64,
    /// RNG seed. A random seed is drawn (and logged) when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_exploration_weight() -> f64 {
    0.1
}

fn default_sample_count() -> usize {
    3
}

fn default_low_complexity_threshold() -> f64 {
    3.0
}

fn default_budget_ceiling() -> f64 {
    5.0
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            exploration_weight: default_exploration_weight(),
            sample_count: default_sample_count(),
            low_complexity_threshold: default_low_complexity_threshold(),
            budget_ceiling: default_budget_ceiling(),
            seed: None,
        }
    }
}

impl SelectionConfig {
    /// Same config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same config with another exploration weight.
    pub fn with_exploration_weight(mut self, weight: f64) -> Self {
        self.exploration_weight = weight;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> AgentnetResult<()> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(AgentnetError::Config(format!(
                "exploration_weight must be a non-negative number, got {}",
                self.exploration_weight
            )));
        }
        if self.sample_count == 0 {
            return Err(AgentnetError::Config(
                "sample_count must be at least 1".to_string(),
            ));
        }
        if !self.low_complexity_threshold.is_finite() {
            return Err(AgentnetError::Config(
                "low_complexity_threshold must be finite".to_string(),
            ));
        }
        if !self.budget_ceiling.is_finite() {
            return Err(AgentnetError::Config(
                "budget_ceiling must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
