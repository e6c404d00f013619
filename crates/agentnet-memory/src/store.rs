use agentnet_core::{AgentnetError, AgentnetResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// A remembered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Remembered result.
    pub value: String,
    /// When it was last written.
    pub stored_at: DateTime<Utc>,
}

impl MemoryEntry {
    /// Entry stamped with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            stored_at: Utc::now(),
        }
    }
}

/// Worker -> key -> entry.
pub type MemoryMap = BTreeMap<String, BTreeMap<String, MemoryEntry>>;

/// Per-worker key/value memory of past results.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Remember `value` under `key` for `worker`, replacing any previous value.
    async fn store(&self, worker: &str, key: &str, value: &str) -> AgentnetResult<()>;

    /// Look up a remembered value.
    async fn retrieve(&self, worker: &str, key: &str) -> AgentnetResult<Option<String>>;

    /// Drop a remembered value. Returns whether it existed.
    async fn forget(&self, worker: &str, key: &str) -> AgentnetResult<bool>;

    /// Every key remembered for `worker`.
    async fn keys(&self, worker: &str) -> AgentnetResult<Vec<String>>;

    /// Total number of entries across all workers.
    async fn count(&self) -> AgentnetResult<usize>;
}

/// Volatile memory, lost when dropped.
pub struct InMemoryStore {
    entries: RwLock<MemoryMap>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(MemoryMap::new()),
        }
    }

    fn with_entries(entries: MemoryMap) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    async fn snapshot(&self) -> MemoryMap {
        self.entries.read().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn store(&self, worker: &str, key: &str, value: &str) -> AgentnetResult<()> {
        let mut entries = self.entries.write().await;
        entries
            .entry(worker.to_string())
            .or_default()
            .insert(key.to_string(), MemoryEntry::new(value));
        Ok(())
    }

    async fn retrieve(&self, worker: &str, key: &str) -> AgentnetResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(worker)
            .and_then(|keys| keys.get(key))
            .map(|e| e.value.clone()))
    }

    async fn forget(&self, worker: &str, key: &str) -> AgentnetResult<bool> {
        let mut entries = self.entries.write().await;
        let Some(keys) = entries.get_mut(worker) else {
            return Ok(false);
        };
        let removed = keys.remove(key).is_some();
        if keys.is_empty() {
            entries.remove(worker);
        }
        Ok(removed)
    }

    async fn keys(&self, worker: &str) -> AgentnetResult<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(worker)
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self) -> AgentnetResult<usize> {
        let entries = self.entries.read().await;
        Ok(entries.values().map(BTreeMap::len).sum())
    }
}

/// File-backed memory persisted as one pretty-printed JSON document.
///
/// Loads everything on open; rewrites the file after every mutation. A file
/// that fails to parse is logged and replaced by an empty memory.
pub struct FileMemoryStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl FileMemoryStore {
    /// Open (or create) the memory file at `path`.
    pub async fn open(path: PathBuf) -> AgentnetResult<Self> {
        let entries = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AgentnetError::Memory(format!("Failed to read memory file: {e}"))
            })?;
            match serde_json::from_str::<MemoryMap>(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Memory file is corrupted, starting empty"
                    );
                    MemoryMap::new()
                }
            }
        } else {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AgentnetError::Memory(format!("Failed to create dir: {e}"))
                })?;
            }
            MemoryMap::new()
        };

        Ok(Self {
            path,
            inner: InMemoryStore::with_entries(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn rewrite_file(&self) -> AgentnetResult<()> {
        let entries = self.inner.snapshot().await;
        let data = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, data.as_bytes())
            .await
            .map_err(|e| AgentnetError::Memory(format!("Failed to write memory file: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for FileMemoryStore {
    async fn store(&self, worker: &str, key: &str, value: &str) -> AgentnetResult<()> {
        self.inner.store(worker, key, value).await?;
        self.rewrite_file().await
    }

    async fn retrieve(&self, worker: &str, key: &str) -> AgentnetResult<Option<String>> {
        self.inner.retrieve(worker, key).await
    }

    async fn forget(&self, worker: &str, key: &str) -> AgentnetResult<bool> {
        let removed = self.inner.forget(worker, key).await?;
        if removed {
            self.rewrite_file().await?;
        }
        Ok(removed)
    }

    async fn keys(&self, worker: &str) -> AgentnetResult<Vec<String>> {
        self.inner.keys(worker).await
    }

    async fn count(&self) -> AgentnetResult<usize> {
        self.inner.count().await
    }
}
