use agentnet_core::{AgentnetError, AgentnetResult, Task, Worker};
use agentnet_selection::{SelectionDistribution, SelectionEngine, UpdateReport};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Receives task outcomes and worker selections. Best effort: errors are
/// logged by the controller and never abort a task.
pub trait OutcomeRecorder: Send + Sync {
    /// Called once per task after scoring.
    fn record_task(&self, task_name: &str, success: bool) -> AgentnetResult<()>;

    /// Called once per allocated occurrence, after its feedback update.
    fn record_selection(&self, identity: &str) -> AgentnetResult<()>;
}

/// Rewards fed back to the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reward when at least one allocated worker succeeds.
    #[serde(default = "default_success_reward")]
    pub success_reward: f64,
    /// Reward (a penalty) when every allocated worker fails.
    #[serde(default = "default_failure_penalty")]
    pub failure_penalty: f64,
}

fn default_success_reward() -> f64 {
    0.1
}

fn default_failure_penalty() -> f64 {
    -0.05
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            success_reward: default_success_reward(),
            failure_penalty: default_failure_penalty(),
        }
    }
}

impl ScoringConfig {
    /// Success must pay, failure must not.
    pub fn validate(&self) -> AgentnetResult<()> {
        if !self.success_reward.is_finite() || self.success_reward <= 0.0 {
            return Err(AgentnetError::Config(format!(
                "success_reward must be positive, got {}",
                self.success_reward
            )));
        }
        if !self.failure_penalty.is_finite() || self.failure_penalty > 0.0 {
            return Err(AgentnetError::Config(format!(
                "failure_penalty must be zero or negative, got {}",
                self.failure_penalty
            )));
        }
        Ok(())
    }

    /// Reward for an aggregate outcome.
    pub fn reward(&self, success: bool) -> f64 {
        if success {
            self.success_reward
        } else {
            self.failure_penalty
        }
    }
}

/// One allocated occurrence and what it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerOutcome {
    /// Roster index.
    pub index: usize,
    /// Worker identity.
    pub identity: String,
    /// Result of the worker's attempt.
    pub success: bool,
    /// Strategy output, when the worker has a strategy.
    pub output: Option<String>,
}

/// Result of [`Controller::execute_task`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    /// Name of the executed task.
    pub task_name: String,
    /// OR over every allocated attempt.
    pub success: bool,
    /// Reward applied to each allocated occurrence.
    pub reward: f64,
    /// The allocation came from the uniform fallback.
    pub fallback: bool,
    /// Allocated occurrences in draw order.
    pub outcomes: Vec<WorkerOutcome>,
    /// One report per feedback update, aligned with `outcomes`.
    pub updates: Vec<UpdateReport>,
}

impl TaskReport {
    /// Identities of the allocated workers, duplicates included.
    pub fn identities(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.identity.as_str()).collect()
    }

    /// True when any feedback update reset the distribution.
    pub fn had_reset(&self) -> bool {
        self.updates.iter().any(|u| u.reset)
    }
}

/// Runs tasks through allocate, execute, score and feedback.
///
/// Exclusively owns the selection engine; every task takes `&mut self`.
pub struct Controller {
    engine: SelectionEngine,
    scoring: ScoringConfig,
    recorder: Option<Arc<dyn OutcomeRecorder>>,
    rng: ChaCha8Rng,
}

impl Controller {
    /// Wrap `engine`. Attempt randomness is forked from the engine's seed.
    pub fn new(mut engine: SelectionEngine, scoring: ScoringConfig) -> AgentnetResult<Self> {
        scoring.validate()?;
        let rng = engine.fork_rng();
        Ok(Self {
            engine,
            scoring,
            recorder: None,
            rng,
        })
    }

    /// Notify `recorder` of every outcome and selection.
    pub fn with_recorder(mut self, recorder: Arc<dyn OutcomeRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// The owned engine.
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Current selection distribution.
    pub fn distribution(&self) -> &SelectionDistribution {
        self.engine.distribution()
    }

    /// Scoring in use.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Execute `task` once. No retries.
    pub fn execute_task(&mut self, task: &Task) -> AgentnetResult<TaskReport> {
        // Allocate
        let sample_count = self.engine.config().sample_count;
        let allocation = self.engine.sample(task, sample_count);
        debug!(
            task = task.name(),
            picks = ?allocation.indices(),
            fallback = allocation.is_fallback(),
            "Workers allocated"
        );

        // Execute
        let mut outcomes = Vec::with_capacity(allocation.len());
        for index in allocation.iter() {
            let worker: Arc<dyn Worker> = Arc::clone(self.engine.worker(index)?);
            let success = worker.attempt(task, &mut self.rng);
            let output = worker
                .strategy()
                .map(|strategy| strategy.execute(worker.identity(), task));
            debug!(worker = worker.identity(), success, "Attempt finished");
            outcomes.push(WorkerOutcome {
                index,
                identity: worker.identity().to_string(),
                success,
                output,
            });
        }

        // Score
        let success = outcomes.iter().any(|o| o.success);
        let reward = self.scoring.reward(success);
        if let Some(recorder) = &self.recorder {
            if let Err(e) = recorder.record_task(task.name(), success) {
                warn!(task = task.name(), error = %e, "Recorder failed to store task outcome");
            }
        }

        // Feedback
        let mut updates = Vec::with_capacity(outcomes.len());
        for outcome in &outcomes {
            updates.push(self.engine.update(outcome.index, reward)?);
            if let Some(recorder) = &self.recorder {
                if let Err(e) = recorder.record_selection(&outcome.identity) {
                    warn!(
                        worker = %outcome.identity,
                        error = %e,
                        "Recorder failed to store selection"
                    );
                }
            }
        }

        info!(
            task = task.name(),
            success,
            workers = outcomes.len(),
            fallback = allocation.is_fallback(),
            "Task executed"
        );

        Ok(TaskReport {
            task_name: task.name().to_string(),
            success,
            reward,
            fallback: allocation.is_fallback(),
            outcomes,
            updates,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::roster::core_roster;
    use agentnet_selection::SelectionConfig;

    fn controller(seed: u64) -> Controller {
        let engine =
            SelectionEngine::new(core_roster().unwrap(), SelectionConfig::default().with_seed(seed))
                .unwrap();
        Controller::new(engine, ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_scoring_defaults() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.reward(true), 0.1);
        assert_eq!(scoring.reward(false), -0.05);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_scoring_validation() {
        let bad_reward = ScoringConfig {
            success_reward: 0.0,
            ..ScoringConfig::default()
        };
        assert!(bad_reward.validate().is_err());

        let bad_penalty = ScoringConfig {
            failure_penalty: 0.2,
            ..ScoringConfig::default()
        };
        assert!(bad_penalty.validate().is_err());
    }

    #[test]
    fn test_easy_task_always_succeeds() {
        // Every core worker has capability >= 1.
        let mut controller = controller(9);
        let task = Task::new("Simple Arithmetic", 1.0).unwrap();
        for _ in 0..50 {
            let report = controller.execute_task(&task).unwrap();
            assert!(report.success);
            assert_eq!(report.reward, 0.1);
            assert_eq!(report.outcomes.len(), report.updates.len());
        }
    }

    #[test]
    fn test_report_matches_feedback() {
        let mut controller = controller(2);
        let task = Task::new("Web Navigation", 5.0).unwrap();
        let report = controller.execute_task(&task).unwrap();

        assert!(!report.outcomes.is_empty());
        assert_eq!(report.success, report.outcomes.iter().any(|o| o.success));
        for (outcome, update) in report.outcomes.iter().zip(&report.updates) {
            assert_eq!(outcome.index, update.index);
            assert_eq!(update.reward, report.reward);
        }
        assert!((controller.distribution().sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_scoring() {
        let engine = SelectionEngine::new(core_roster().unwrap(), SelectionConfig::default())
            .unwrap();
        let scoring = ScoringConfig {
            success_reward: -1.0,
            ..ScoringConfig::default()
        };
        assert!(Controller::new(engine, scoring).is_err());
    }
}
