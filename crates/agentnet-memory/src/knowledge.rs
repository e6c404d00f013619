use agentnet_core::{AgentnetError, AgentnetResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// A directed, labelled edge `subject --relation--> object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Source entity.
    pub subject: String,
    /// Edge label.
    pub relation: String,
    /// Target entity.
    pub object: String,
}

impl Fact {
    /// Build a fact from its three parts.
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// Small directed fact graph shared by workers.
///
/// At most one edge exists per `(subject, object)` pair: adding a second fact
/// between the same entities relabels the existing edge and keeps its
/// position. Relations are reported in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    facts: Vec<Fact>,
}

impl KnowledgeGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `subject --relation--> object`.
    pub fn add_fact(&mut self, subject: &str, relation: &str, object: &str) {
        if let Some(existing) = self
            .facts
            .iter_mut()
            .find(|f| f.subject == subject && f.object == object)
        {
            tracing::debug!(subject, object, relation, "Relabelling existing fact");
            existing.relation = relation.to_string();
            return;
        }
        self.facts.push(Fact::new(subject, relation, object));
    }

    /// Outgoing `(relation, object)` pairs of `subject`.
    pub fn relations(&self, subject: &str) -> Vec<(String, String)> {
        self.facts
            .iter()
            .filter(|f| f.subject == subject)
            .map(|f| (f.relation.clone(), f.object.clone()))
            .collect()
    }

    /// Shortest chain of entities from `start` to `end`, both included.
    ///
    /// Empty when either entity is unknown or `end` is unreachable.
    pub fn find_path(&self, start: &str, end: &str) -> Vec<String> {
        if !self.contains(start) || !self.contains(end) {
            return Vec::new();
        }
        if start == end {
            return vec![start.to_string()];
        }

        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for fact in self.facts.iter().filter(|f| f.subject == node) {
                let next = fact.object.as_str();
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, node);
                if next == end {
                    let mut path = vec![end.to_string()];
                    let mut cursor = end;
                    while let Some(&prev) = parent.get(cursor) {
                        path.push(prev.to_string());
                        cursor = prev;
                    }
                    path.reverse();
                    return path;
                }
                queue.push_back(next);
            }
        }

        Vec::new()
    }

    /// Whether `entity` appears in any fact.
    pub fn contains(&self, entity: &str) -> bool {
        self.facts
            .iter()
            .any(|f| f.subject == entity || f.object == entity)
    }

    /// All facts in insertion order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// True when no fact has been recorded.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Load a graph saved with [`KnowledgeGraph::save`]. A missing file
    /// yields an empty graph.
    pub async fn load(path: &Path) -> AgentnetResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AgentnetError::Memory(format!("Failed to read knowledge graph: {e}")))?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the graph as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> AgentnetResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AgentnetError::Memory(format!("Failed to create dir: {e}")))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, data)
            .await
            .map_err(|e| AgentnetError::Memory(format!("Failed to write knowledge graph: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_graph() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new();
        kg.add_fact("AI Agents", "use", "Neural Networks");
        kg.add_fact("Neural Networks", "trained_with", "Backpropagation");
        kg.add_fact("AI Agents", "solve", "Tasks");
        kg
    }

    #[test]
    fn test_relations_in_insertion_order() {
        let kg = sample_graph();
        assert_eq!(
            kg.relations("AI Agents"),
            vec![
                ("use".to_string(), "Neural Networks".to_string()),
                ("solve".to_string(), "Tasks".to_string()),
            ]
        );
        assert!(kg.relations("Tasks").is_empty());
        assert!(kg.relations("Unknown").is_empty());
    }

    #[test]
    fn test_same_pair_is_relabelled() {
        let mut kg = sample_graph();
        kg.add_fact("AI Agents", "depend_on", "Neural Networks");
        assert_eq!(kg.len(), 3);
        assert_eq!(kg.relations("AI Agents")[0].0, "depend_on");
    }

    #[test]
    fn test_find_path() {
        let kg = sample_graph();
        assert_eq!(
            kg.find_path("AI Agents", "Backpropagation"),
            vec!["AI Agents", "Neural Networks", "Backpropagation"]
        );
        assert_eq!(kg.find_path("AI Agents", "AI Agents"), vec!["AI Agents"]);
    }

    #[test]
    fn test_find_path_respects_direction() {
        let kg = sample_graph();
        assert!(kg.find_path("Backpropagation", "AI Agents").is_empty());
        assert!(kg.find_path("AI Agents", "Nowhere").is_empty());
    }

    #[test]
    fn test_find_path_prefers_shortest() {
        let mut kg = KnowledgeGraph::new();
        kg.add_fact("a", "r", "b");
        kg.add_fact("b", "r", "c");
        kg.add_fact("c", "r", "d");
        kg.add_fact("a", "shortcut", "d");
        assert_eq!(kg.find_path("a", "d"), vec!["a", "d"]);
    }

    #[test]
    fn test_find_path_handles_cycles() {
        let mut kg = KnowledgeGraph::new();
        kg.add_fact("a", "r", "b");
        kg.add_fact("b", "r", "a");
        kg.add_fact("c", "r", "a");
        assert!(kg.find_path("a", "c").is_empty());
    }
}
