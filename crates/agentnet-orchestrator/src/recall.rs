use crate::strategy::EchoStrategy;
use agentnet_core::{AgentnetResult, Strategy, Task, Worker};
use agentnet_memory::{KnowledgeGraph, MemoryStore};
use serde::Serialize;

/// Relation linking a task to the worker that produced its output.
pub const PROCESSED_BY: &str = "processed_by";

/// Where a worker's answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Remembered from an earlier run of the same worker.
    Memory,
    /// The knowledge graph already held facts about the task.
    Knowledge,
    /// Freshly produced by the worker's strategy.
    Strategy,
}

/// A worker's answer for a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recollection {
    /// Origin of the output.
    pub source: Source,
    /// Text shown to the user.
    pub output: String,
}

/// Produce `worker`'s output for `task`, consulting memory first and the
/// knowledge graph second. Fresh output is remembered and linked to the
/// worker with a `processed_by` fact.
pub async fn recall_or_execute(
    worker: &dyn Worker,
    task: &Task,
    memory: &dyn MemoryStore,
    graph: &mut KnowledgeGraph,
) -> AgentnetResult<Recollection> {
    let identity = worker.identity();

    if let Some(past) = memory.retrieve(identity, task.name()).await? {
        tracing::debug!(worker = identity, task = task.name(), "Recalled from memory");
        return Ok(Recollection {
            source: Source::Memory,
            output: format!("Recall: {identity} remembers '{}': {past}", task.name()),
        });
    }

    let knowledge = graph.relations(task.name());
    if !knowledge.is_empty() {
        let related = knowledge
            .iter()
            .map(|(relation, object)| format!("{relation} {object}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(Recollection {
            source: Source::Knowledge,
            output: format!(
                "Found in knowledge graph: {} is related to {related}",
                task.name()
            ),
        });
    }

    let output = match worker.strategy() {
        Some(strategy) => strategy.execute(identity, task),
        None => EchoStrategy.execute(identity, task),
    };
    memory.store(identity, task.name(), &output).await?;
    graph.add_fact(task.name(), PROCESSED_BY, identity);

    Ok(Recollection {
        source: Source::Strategy,
        output,
    })
}
