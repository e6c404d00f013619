//! `agentnet.toml` loading and roster construction.

use agentnet_core::{AgentnetError, AgentnetResult, Roster, WorkerProfile};
use agentnet_orchestrator::{default_roster, strategy_by_name, ScoringConfig, STRATEGY_NAMES};
use agentnet_selection::SelectionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentnetConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    pub name: String,
    pub capability: f64,
    pub cost: f64,
    #[serde(default)]
    pub strategy: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for AgentnetConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            selection: SelectionConfig::default(),
            scoring: ScoringConfig::default(),
            workers: Vec::new(),
        }
    }
}

impl AgentnetConfig {
    /// Read and validate `path`. A missing file falls back to defaults.
    pub async fn load(path: &Path) -> AgentnetResult<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AgentnetError::Config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> AgentnetResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| AgentnetError::Config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AgentnetResult<()> {
        self.selection.validate()?;
        self.scoring.validate()?;
        for worker in &self.workers {
            if let Some(name) = &worker.strategy {
                if strategy_by_name(name).is_none() {
                    return Err(AgentnetError::Config(format!(
                        "worker '{}' uses unknown strategy '{name}' (expected one of {})",
                        worker.name,
                        STRATEGY_NAMES.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Configured workers, or the stock roster when none are listed.
    pub fn roster(&self) -> AgentnetResult<Roster> {
        if self.workers.is_empty() {
            return default_roster();
        }
        let mut builder = Roster::builder();
        for worker in &self.workers {
            let mut profile = WorkerProfile::new(&worker.name, worker.capability, worker.cost);
            if let Some(strategy) = worker.strategy.as_deref().and_then(strategy_by_name) {
                profile = profile.with_strategy(strategy);
            }
            builder = builder.register(profile);
        }
        builder.build()
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.data_dir.join("metrics.json")
    }

    pub fn memory_path(&self) -> PathBuf {
        self.data_dir.join("memory.json")
    }

    pub fn knowledge_path(&self) -> PathBuf {
        self.data_dir.join("knowledge.json")
    }

    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join("results").join("experiment_results.json")
    }
}
