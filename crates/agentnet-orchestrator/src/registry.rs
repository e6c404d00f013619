use agentnet_core::{AgentnetError, AgentnetResult, Task};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named tasks in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a task. Names are unique.
    pub fn register(&mut self, name: &str, complexity: f64) -> AgentnetResult<&Task> {
        if self.get(name).is_some() {
            return Err(AgentnetError::DuplicateTask(name.to_string()));
        }
        let task = Task::new(name, complexity)?;
        tracing::debug!(task = name, complexity, "Task registered");
        self.tasks.push(task);
        let last = self.tasks.len() - 1;
        Ok(&self.tasks[last])
    }

    /// Look a task up by name.
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    /// Look a task up by name, or fail with [`AgentnetError::TaskNotFound`].
    pub fn require(&self, name: &str) -> AgentnetResult<&Task> {
        self.get(name)
            .ok_or_else(|| AgentnetError::TaskNotFound(name.to_string()))
    }

    /// All tasks in registration order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Drop a task. Returns it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.name() == name)?;
        Some(self.tasks.remove(pos))
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Load from a JSON file. A missing file yields an empty registry.
    pub async fn load(path: &Path) -> AgentnetResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> AgentnetResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, serde_json::to_string_pretty(self)?).await?;
        Ok(())
    }
}
