use crate::task::Task;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Domain behaviour a worker may delegate to (looking something up, building
/// a report). Never consulted by the selection engine.
pub trait Strategy: Send + Sync + std::fmt::Debug {
    /// Short identifier used in configuration files.
    fn name(&self) -> &str;

    /// Produce the textual output of `worker` handling `task`.
    fn execute(&self, worker: &str, task: &Task) -> String;
}

/// A member of the roster.
///
/// Implementors only need to describe themselves; the default [`Worker::attempt`]
/// is the stochastic outcome function shared by every worker.
pub trait Worker: Send + Sync + std::fmt::Debug {
    /// Unique, stable name. Used as the roster key.
    fn identity(&self) -> &str;

    /// Strength against task complexity (> 0).
    fn capability(&self) -> f64;

    /// Resource price of using this worker (>= 0).
    fn cost(&self) -> f64;

    /// Probability that a single attempt on `task` succeeds.
    fn success_probability(&self, task: &Task) -> f64 {
        (self.capability() / task.complexity()).min(1.0)
    }

    /// One independent attempt at `task`, drawn from `rng`.
    fn attempt(&self, task: &Task, rng: &mut dyn RngCore) -> bool {
        rng.random::<f64>() < self.success_probability(task)
    }

    /// Optional domain strategy.
    fn strategy(&self) -> Option<&dyn Strategy> {
        None
    }
}

/// Plain data-driven worker: a name, a capability, a cost and optionally a strategy.
#[derive(Debug, Clone)]
pub struct WorkerProfile {
    name: String,
    capability: f64,
    cost: f64,
    strategy: Option<Arc<dyn Strategy>>,
}

impl WorkerProfile {
    /// Create a profile. Values are validated when the roster is built.
    pub fn new(name: impl Into<String>, capability: f64, cost: f64) -> Self {
        Self {
            name: name.into(),
            capability,
            cost,
            strategy: None,
        }
    }

    /// Attach a domain strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

impl Worker for WorkerProfile {
    fn identity(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> f64 {
        self.capability
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn strategy(&self) -> Option<&dyn Strategy> {
        self.strategy.as_deref()
    }
}
