//! Persistent memory shared by workers.
//!
//! # Main types
//!
//! - [`MemoryStore`]: Trait for per-worker key/value memory.
//! - [`FileMemoryStore`]: JSON-file-backed memory, rewritten on every write.
//! - [`InMemoryStore`]: Volatile memory for tests and one-shot runs.
//! - [`KnowledgeGraph`]: Directed fact graph with shortest-path lookup.

/// Directed fact graph.
pub mod knowledge;
/// Memory store trait and implementations.
pub mod store;

pub use knowledge::{Fact, KnowledgeGraph};
pub use store::{FileMemoryStore, InMemoryStore, MemoryEntry, MemoryMap, MemoryStore};
