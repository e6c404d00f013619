use crate::controller::OutcomeRecorder;
use agentnet_core::AgentnetResult;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Success and failure counts of one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    /// Executions where at least one worker succeeded.
    pub success: u64,
    /// Executions where every worker failed.
    pub failure: u64,
}

impl TaskCounts {
    /// Total executions.
    pub fn attempts(&self) -> u64 {
        self.success + self.failure
    }

    /// `success / attempts`, 0.0 before the first attempt.
    pub fn success_rate(&self) -> f64 {
        match self.attempts() {
            0 => 0.0,
            n => self.success as f64 / n as f64,
        }
    }
}

/// Serializable snapshot of a [`MetricsTracker`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Per task name.
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskCounts>,
    /// Selections per worker identity.
    #[serde(default)]
    pub workers: BTreeMap<String, u64>,
}

/// Thread-safe outcome counters. Plugs into the controller as its
/// [`OutcomeRecorder`].
#[derive(Debug, Default)]
pub struct MetricsTracker {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsTracker {
    /// Empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a snapshot.
    pub fn from_snapshot(snapshot: MetricsSnapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
        }
    }

    /// Count one execution of `task_name`.
    pub fn record_task_outcome(&self, task_name: &str, success: bool) {
        let mut inner = self.inner.lock();
        let counts = inner.tasks.entry(task_name.to_string()).or_default();
        if success {
            counts.success += 1;
        } else {
            counts.failure += 1;
        }
    }

    /// Count one selection of `identity`.
    pub fn record_worker_selection(&self, identity: &str) {
        let mut inner = self.inner.lock();
        *inner.workers.entry(identity.to_string()).or_default() += 1;
    }

    /// Success rate of `task_name`, 0.0 when unknown.
    pub fn task_success_rate(&self, task_name: &str) -> f64 {
        self.inner
            .lock()
            .tasks
            .get(task_name)
            .map(TaskCounts::success_rate)
            .unwrap_or(0.0)
    }

    /// Counts of `task_name`, zero when unknown.
    pub fn task_counts(&self, task_name: &str) -> TaskCounts {
        self.inner
            .lock()
            .tasks
            .get(task_name)
            .copied()
            .unwrap_or_default()
    }

    /// How many times `identity` was selected.
    pub fn selection_count(&self, identity: &str) -> u64 {
        self.inner
            .lock()
            .workers
            .get(identity)
            .copied()
            .unwrap_or(0)
    }

    /// Copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().clone()
    }

    /// Zero every counter.
    pub fn reset(&self) {
        *self.inner.lock() = MetricsSnapshot::default();
    }

    /// Load counters saved with [`MetricsTracker::save`]. A missing file
    /// yields empty counters.
    pub async fn load(path: &Path) -> AgentnetResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = tokio::fs::read_to_string(path).await?;
        let snapshot: MetricsSnapshot = serde_json::from_str(&data)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write counters as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> AgentnetResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_string_pretty(&self.snapshot())?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }
}

impl OutcomeRecorder for MetricsTracker {
    fn record_task(&self, task_name: &str, success: bool) -> AgentnetResult<()> {
        self.record_task_outcome(task_name, success);
        Ok(())
    }

    fn record_selection(&self, identity: &str) -> AgentnetResult<()> {
        self.record_worker_selection(identity);
        Ok(())
    }
}
