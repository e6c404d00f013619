use crate::{AgentnetError, AgentnetResult};
use serde::{Deserialize, Serialize};

/// A unit of work handed to the allocator.
///
/// Complexity is always a positive finite number: [`Task::new`] refuses
/// anything else, so downstream probability math never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    name: String,
    complexity: f64,
}

impl Task {
    /// Build a task, validating its name and complexity.
    pub fn new(name: impl Into<String>, complexity: f64) -> AgentnetResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AgentnetError::InvalidTask(
                "task name must not be empty".to_string(),
            ));
        }
        if !complexity.is_finite() || complexity <= 0.0 {
            return Err(AgentnetError::InvalidTask(format!(
                "task '{name}' has complexity {complexity}, expected a positive number"
            )));
        }
        Ok(Self { name, complexity })
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Task complexity (always > 0).
    pub fn complexity(&self) -> f64 {
        self.complexity
    }

    /// Derive a sub-task with the same complexity and a new name.
    pub fn part(&self, name: impl Into<String>) -> AgentnetResult<Self> {
        Self::new(name, self.complexity)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (complexity {})", self.name, self.complexity)
    }
}

#[derive(Deserialize)]
struct RawTask {
    name: String,
    complexity: f64,
}

impl TryFrom<RawTask> for Task {
    type Error = AgentnetError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Task::new(raw.name, raw.complexity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Simple Arithmetic", 1.0).unwrap();
        assert_eq!(task.name(), "Simple Arithmetic");
        assert_eq!(task.complexity(), 1.0);
    }

    #[test]
    fn test_zero_complexity_rejected() {
        let err = Task::new("bad", 0.0).unwrap_err();
        assert!(matches!(err, AgentnetError::InvalidTask(_)));
    }

    #[test]
    fn test_negative_and_nan_complexity_rejected() {
        assert!(Task::new("neg", -3.0).is_err());
        assert!(Task::new("nan", f64::NAN).is_err());
        assert!(Task::new("inf", f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Task::new("   ", 2.0).is_err());
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: Task = serde_json::from_str(r#"{"name":"a","complexity":2.5}"#).unwrap();
        assert_eq!(ok.complexity(), 2.5);

        let bad = serde_json::from_str::<Task>(r#"{"name":"a","complexity":0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_part_keeps_complexity() {
        let task = Task::new("Report", 4.0).unwrap();
        let part = task.part("Report (Part 1)").unwrap();
        assert_eq!(part.complexity(), 4.0);
        assert_eq!(part.name(), "Report (Part 1)");
    }
}
