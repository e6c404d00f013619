use crate::strategy::EchoStrategy;
use agentnet_core::{AgentnetError, AgentnetResult, Strategy, Task, Worker};
use agentnet_memory::KnowledgeGraph;
use rand::RngCore;
use serde::Serialize;
use std::sync::Arc;

/// Relation recorded by [`Debate::resolve`].
pub const FINAL_ANSWER: &str = "final_answer";

/// One member's share of a split task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartResult {
    /// Member identity.
    pub identity: String,
    /// Name of the part, `"<task> (Part i)"`.
    pub part: String,
    /// Outcome of the member's attempt.
    pub success: bool,
    /// Member output for the part.
    pub output: String,
}

/// Result of [`Team::assign_subtasks`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamResult {
    /// Per-member results in member order.
    pub parts: Vec<PartResult>,
    /// `"<identity>: <output>"` entries joined by `" | "`.
    pub combined: String,
}

impl TeamResult {
    /// True when at least one member succeeded.
    pub fn success(&self) -> bool {
        self.parts.iter().any(|p| p.success)
    }
}

/// Workers that split a task between them.
#[derive(Debug, Clone)]
pub struct Team {
    members: Vec<Arc<dyn Worker>>,
}

impl Team {
    /// A team needs at least one member.
    pub fn new(members: Vec<Arc<dyn Worker>>) -> AgentnetResult<Self> {
        if members.is_empty() {
            return Err(AgentnetError::InvalidRoster(
                "a team needs at least one member".to_string(),
            ));
        }
        Ok(Self { members })
    }

    /// Members in assignment order.
    pub fn members(&self) -> &[Arc<dyn Worker>] {
        &self.members
    }

    /// Split `task` into one part per member, run every part and combine.
    pub fn assign_subtasks(&self, task: &Task, rng: &mut dyn RngCore) -> AgentnetResult<TeamResult> {
        let mut parts = Vec::with_capacity(self.members.len());
        for (i, member) in self.members.iter().enumerate() {
            let part = task.part(format!("{} (Part {})", task.name(), i + 1))?;
            let success = member.attempt(&part, rng);
            let output = match member.strategy() {
                Some(strategy) => strategy.execute(member.identity(), &part),
                None => EchoStrategy.execute(member.identity(), &part),
            };
            tracing::debug!(worker = member.identity(), part = part.name(), success, "Part finished");
            parts.push(PartResult {
                identity: member.identity().to_string(),
                part: part.name().to_string(),
                success,
                output,
            });
        }

        let combined = parts
            .iter()
            .map(|p| format!("{}: {}", p.identity, p.output))
            .collect::<Vec<_>>()
            .join(" | ");

        Ok(TeamResult { parts, combined })
    }
}

/// Settles on an answer for a task using what the knowledge graph knows.
#[derive(Debug, Clone)]
pub struct Debate {
    participants: Vec<Arc<dyn Worker>>,
}

impl Debate {
    /// Debate between `participants`.
    pub fn new(participants: Vec<Arc<dyn Worker>>) -> Self {
        Self { participants }
    }

    /// Replace `proposal` with a knowledge-backed answer when the graph holds
    /// relations for `task`, then record the outcome as a `final_answer` fact.
    ///
    /// Without participants the proposal stands unchallenged.
    pub fn resolve(&self, graph: &mut KnowledgeGraph, task: &str, proposal: &str) -> String {
        let mut answer = proposal.to_string();

        if !self.participants.is_empty() {
            let knowledge = graph.relations(task);
            if !knowledge.is_empty() {
                let facts = knowledge
                    .iter()
                    .map(|(relation, object)| format!("{relation} {object}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                answer = format!("Knowledge-backed answer: {facts}");
            }
        }

        tracing::debug!(
            task,
            participants = self.participants.len(),
            "Debate resolved"
        );
        graph.add_fact(task, FINAL_ANSWER, &answer);
        answer
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::roster::core_roster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn members() -> Vec<Arc<dyn Worker>> {
        core_roster().unwrap().iter().cloned().collect()
    }

    #[test]
    fn test_empty_team_rejected() {
        assert!(Team::new(Vec::new()).is_err());
    }

    #[test]
    fn test_assign_subtasks_names_and_combines() {
        let team = Team::new(members()).unwrap();
        let task = Task::new("Build site", 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = team.assign_subtasks(&task, &mut rng).unwrap();
        let parts: Vec<&str> = result.parts.iter().map(|p| p.part.as_str()).collect();
        assert_eq!(
            parts,
            vec!["Build site (Part 1)", "Build site (Part 2)", "Build site (Part 3)"]
        );
        assert_eq!(
            result.combined,
            "Basic: Basic executing: Build site (Part 1) | \
             Mid: Mid executing: Build site (Part 2) | \
             Expert: Expert executing: Build site (Part 3)"
        );
        // Capability >= 1 everywhere.
        assert!(result.parts.iter().all(|p| p.success));
        assert!(result.success());
    }

    #[test]
    fn test_debate_without_knowledge_keeps_proposal() {
        let mut graph = KnowledgeGraph::new();
        let debate = Debate::new(members());
        let answer = debate.resolve(&mut graph, "Q", "42");
        assert_eq!(answer, "42");
        assert_eq!(
            graph.relations("Q"),
            vec![(FINAL_ANSWER.to_string(), "42".to_string())]
        );
    }

    #[test]
    fn test_debate_uses_knowledge() {
        let mut graph = KnowledgeGraph::new();
        graph.add_fact("Q", "processed_by", "Expert");
        let debate = Debate::new(members());

        let answer = debate.resolve(&mut graph, "Q", "guess");
        assert_eq!(answer, "Knowledge-backed answer: processed_by Expert");
        assert_eq!(graph.relations("Q").len(), 2);
    }

    #[test]
    fn test_debate_without_participants() {
        let mut graph = KnowledgeGraph::new();
        graph.add_fact("Q", "processed_by", "Expert");
        let answer = Debate::new(Vec::new()).resolve(&mut graph, "Q", "guess");
        assert_eq!(answer, "guess");
    }
}
