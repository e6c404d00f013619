use crate::worker::Worker;
use crate::{AgentnetError, AgentnetResult};
use std::collections::HashSet;
use std::sync::Arc;

/// The fixed, ordered set of workers an engine allocates from.
///
/// Index `i` of the roster is index `i` of the selection distribution. A roster
/// cannot be modified once built; changing workers means building a new
/// roster and a new engine.
#[derive(Debug, Clone)]
pub struct Roster {
    workers: Vec<Arc<dyn Worker>>,
}

impl Roster {
    /// Start an explicit registration.
    pub fn builder() -> RosterBuilder {
        RosterBuilder::default()
    }

    /// Number of workers (always >= 1).
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// A built roster is never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Worker at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<dyn Worker>> {
        self.workers.get(index)
    }

    /// Roster position of the worker named `identity`.
    pub fn index_of(&self, identity: &str) -> Option<usize> {
        self.workers.iter().position(|w| w.identity() == identity)
    }

    /// Workers in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Worker>> {
        self.workers.iter()
    }

    /// Identities in roster order.
    pub fn identities(&self) -> Vec<String> {
        self.workers
            .iter()
            .map(|w| w.identity().to_string())
            .collect()
    }
}

/// Collects workers and validates them into a [`Roster`].
#[derive(Debug, Default)]
pub struct RosterBuilder {
    workers: Vec<Arc<dyn Worker>>,
}

impl RosterBuilder {
    /// Register one worker. Order of registration is roster order.
    pub fn register(mut self, worker: impl Worker + 'static) -> Self {
        self.workers.push(Arc::new(worker));
        self
    }

    /// Register an already shared worker.
    pub fn register_shared(mut self, worker: Arc<dyn Worker>) -> Self {
        self.workers.push(worker);
        self
    }

    /// Validate and freeze the roster.
    pub fn build(self) -> AgentnetResult<Roster> {
        if self.workers.is_empty() {
            return Err(AgentnetError::InvalidRoster(
                "roster must contain at least one worker".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for worker in &self.workers {
            let name = worker.identity();
            if name.trim().is_empty() {
                return Err(AgentnetError::InvalidRoster(
                    "worker identity must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(AgentnetError::InvalidRoster(format!(
                    "duplicate worker identity '{name}'"
                )));
            }
            let capability = worker.capability();
            if !capability.is_finite() || capability <= 0.0 {
                return Err(AgentnetError::InvalidRoster(format!(
                    "worker '{name}' has capability {capability}, expected a positive number"
                )));
            }
            let cost = worker.cost();
            if !cost.is_finite() || cost < 0.0 {
                return Err(AgentnetError::InvalidRoster(format!(
                    "worker '{name}' has cost {cost}, expected a non-negative number"
                )));
            }
        }

        Ok(Roster {
            workers: self.workers,
        })
    }
}
