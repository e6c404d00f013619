use crate::controller::Controller;
use crate::metrics::MetricsTracker;
use crate::registry::TaskRegistry;
use agentnet_core::{AgentnetError, AgentnetResult, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Tasks registered when an experiment starts from an empty registry.
pub const REFERENCE_TASKS: &[(&str, f64)] = &[
    ("Simple Arithmetic", 1.0),
    ("Web Navigation", 5.0),
    ("Advanced Code Generation", 10.0),
];

/// Final success rate of one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Fraction of executions that succeeded.
    pub success_rate: f64,
}

/// Everything an experiment run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResults {
    /// Iterations run.
    pub iterations: usize,
    /// Per task name.
    pub tasks: BTreeMap<String, TaskSummary>,
    /// Selections per worker identity.
    pub workers: BTreeMap<String, u64>,
    /// Final distribution, in roster order.
    pub distribution: Vec<f64>,
}

impl ExperimentResults {
    /// Write as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> AgentnetResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, serde_json::to_string_pretty(self)?).await?;
        Ok(())
    }
}

/// Fill an empty registry with [`REFERENCE_TASKS`]. Returns how many were added.
pub fn seed_reference_tasks(registry: &mut TaskRegistry) -> AgentnetResult<usize> {
    if !registry.is_empty() {
        return Ok(0);
    }
    for (name, complexity) in REFERENCE_TASKS {
        registry.register(name, *complexity)?;
    }
    Ok(REFERENCE_TASKS.len())
}

/// Run every task in `tasks` once per iteration through `controller`.
///
/// `metrics` must be the controller's recorder for the counts to reflect
/// the run.
pub fn run_experiment(
    controller: &mut Controller,
    tasks: &[Task],
    metrics: &MetricsTracker,
    iterations: usize,
) -> AgentnetResult<ExperimentResults> {
    if tasks.is_empty() {
        return Err(AgentnetError::TaskNotFound(
            "no tasks registered for the experiment".to_string(),
        ));
    }

    for iteration in 0..iterations {
        tracing::debug!(iteration = iteration + 1, iterations, "Experiment iteration");
        for task in tasks {
            controller.execute_task(task)?;
        }
    }

    let tasks = tasks
        .iter()
        .map(|t| {
            (
                t.name().to_string(),
                TaskSummary {
                    success_rate: metrics.task_success_rate(t.name()),
                },
            )
        })
        .collect();
    let workers = controller
        .engine()
        .roster()
        .iter()
        .map(|w| (w.identity().to_string(), metrics.selection_count(w.identity())))
        .collect();

    tracing::info!(iterations, "Experiment completed");

    Ok(ExperimentResults {
        iterations,
        tasks,
        workers,
        distribution: controller.distribution().weights().to_vec(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::controller::ScoringConfig;
    use crate::roster::core_roster;
    use agentnet_selection::{SelectionConfig, SelectionEngine};
    use std::sync::Arc;

    #[test]
    fn test_seed_only_when_empty() {
        let mut registry = TaskRegistry::new();
        assert_eq!(seed_reference_tasks(&mut registry).unwrap(), 3);
        assert_eq!(seed_reference_tasks(&mut registry).unwrap(), 0);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_empty_task_list_rejected() {
        let engine =
            SelectionEngine::new(core_roster().unwrap(), SelectionConfig::default().with_seed(1))
                .unwrap();
        let mut controller = Controller::new(engine, ScoringConfig::default()).unwrap();
        let metrics = MetricsTracker::new();
        assert!(run_experiment(&mut controller, &[], &metrics, 5).is_err());
    }

    #[test]
    fn test_run_collects_results() {
        let metrics = Arc::new(MetricsTracker::new());
        let engine =
            SelectionEngine::new(core_roster().unwrap(), SelectionConfig::default().with_seed(7))
                .unwrap();
        let mut controller = Controller::new(engine, ScoringConfig::default())
            .unwrap()
            .with_recorder(metrics.clone());

        let mut registry = TaskRegistry::new();
        seed_reference_tasks(&mut registry).unwrap();
        let results = run_experiment(&mut controller, registry.list(), &metrics, 10).unwrap();

        assert_eq!(results.tasks.len(), 3);
        assert_eq!(results.tasks["Simple Arithmetic"].success_rate, 1.0);
        assert_eq!(results.workers.len(), 3);
        assert!(results.workers.values().sum::<u64>() >= 30);
        assert!((results.distribution.iter().sum::<f64>() - 1.0).abs() < 1e-6);
    }
}
