//! Core types and error definitions for the Agentnet workspace.
//!
//! This crate holds everything the selection engine and the allocator share:
//! the unified error type, validated tasks, the worker contract and the
//! roster that fixes worker order for the lifetime of an engine.
//!
//! # Main types
//!
//! - [`AgentnetError`]: Unified error enum for all Agentnet crates.
//! - [`AgentnetResult`]: Convenience alias for `Result<T, AgentnetError>`.
//! - [`Task`]: A named unit of work with a positive complexity.
//! - [`Worker`]: Capability/cost contract plus the stochastic outcome function.
//! - [`Strategy`]: Optional domain behaviour a worker delegates to.
//! - [`WorkerProfile`]: Data-driven [`Worker`] implementation.
//! - [`Roster`]: Fixed, ordered, validated set of workers.

/// Error type and result alias.
pub mod error;
/// Worker roster and explicit registration.
pub mod roster;
/// Validated task type.
pub mod task;
/// Worker and strategy contracts.
pub mod worker;

pub use error::{AgentnetError, AgentnetResult};
pub use roster::{Roster, RosterBuilder};
pub use task::Task;
pub use worker::{Strategy, Worker, WorkerProfile};
