use thiserror::Error;

/// A convenience `Result` alias using [`AgentnetError`].
pub type AgentnetResult<T> = Result<T, AgentnetError>;

/// Top-level error type for the Agentnet workspace.
///
/// Numeric edge cases inside the selection engine never surface here; only
/// contract violations and collaborator I/O failures do.
#[derive(Error, Debug)]
pub enum AgentnetError {
    /// A task was built with an empty name or a non-positive complexity.
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// A roster failed validation (empty, duplicate identity, bad capability or cost).
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// A worker index outside the roster was passed to the engine.
    #[error("Unknown worker index {index} (roster size {roster_size})")]
    UnknownWorker {
        /// The offending index.
        index: usize,
        /// Size of the roster the engine was built with.
        roster_size: usize,
    },

    /// A task with the same name is already registered.
    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    /// No task with the given name is registered.
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from the memory store or knowledge graph persistence.
    #[error("Memory error: {0}")]
    Memory(String),

    /// An outcome recorder could not accept an event.
    #[error("Recorder error: {0}")]
    Recorder(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
