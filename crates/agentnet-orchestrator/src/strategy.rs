use agentnet_core::{Strategy, Task};
use std::sync::Arc;

/// Plain acknowledgement: `"<worker> executing: <task>"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoStrategy;

impl Strategy for EchoStrategy {
    fn name(&self) -> &str {
        "echo"
    }

    fn execute(&self, worker: &str, task: &Task) -> String {
        format!("{worker} executing: {}", task.name())
    }
}

/// Keyword lookup of a basic treatment recommendation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreatmentAdvisor;

const TREATMENTS: &[(&str, &str)] = &[
    ("headache", "Recommended: Ibuprofen or Acetaminophen."),
    ("fever", "Recommended: Rest, hydration, and Paracetamol."),
    ("diabetes", "Recommended: Insulin therapy & lifestyle changes."),
];

impl Strategy for TreatmentAdvisor {
    fn name(&self) -> &str {
        "treatment"
    }

    fn execute(&self, _worker: &str, task: &Task) -> String {
        let condition = task.name().to_lowercase();
        TREATMENTS
            .iter()
            .find(|(keyword, _)| condition.contains(keyword))
            .map(|(_, advice)| (*advice).to_string())
            .unwrap_or_else(|| {
                format!(
                    "No specific treatment found for '{}'. Consult a doctor.",
                    task.name()
                )
            })
    }
}

/// Points symptom and diagnosis tasks at a PubMed search; echoes anything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteratureSearch;

impl LiteratureSearch {
    /// PubMed search URL for `query`.
    pub fn search_url(query: &str) -> String {
        format!(
            "https://pubmed.ncbi.nlm.nih.gov/?term={}",
            query.replace(' ', "+")
        )
    }
}

impl Strategy for LiteratureSearch {
    fn name(&self) -> &str {
        "literature"
    }

    fn execute(&self, worker: &str, task: &Task) -> String {
        let lowered = task.name().to_lowercase();
        if lowered.contains("symptom") || lowered.contains("diagnose") {
            format!(
                "Search PubMed for {}: {}",
                task.name(),
                Self::search_url(task.name())
            )
        } else {
            EchoStrategy.execute(worker, task)
        }
    }
}

/// Simulated log scan. Counts the comma-separated entries of the task name.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreatScanner;

impl Strategy for ThreatScanner {
    fn name(&self) -> &str {
        "threat_scan"
    }

    fn execute(&self, _worker: &str, task: &Task) -> String {
        let scanned = task
            .name()
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .count();
        format!("Threat analysis complete. {scanned} logs scanned. No critical threats detected.")
    }
}

/// Names accepted by [`strategy_by_name`].
pub const STRATEGY_NAMES: &[&str] = &["echo", "treatment", "literature", "threat_scan"];

/// Look up a built-in strategy by its configuration name.
pub fn strategy_by_name(name: &str) -> Option<Arc<dyn Strategy>> {
    match name {
        "echo" => Some(Arc::new(EchoStrategy)),
        "treatment" => Some(Arc::new(TreatmentAdvisor)),
        "literature" => Some(Arc::new(LiteratureSearch)),
        "threat_scan" => Some(Arc::new(ThreatScanner)),
        _ => None,
    }
}
