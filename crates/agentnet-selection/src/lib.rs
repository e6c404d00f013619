//! Adaptive selection engine ("supernet") for the Agentnet allocator.
//!
//! Keeps a probability distribution over a fixed worker roster, samples
//! workers for a task biased by that distribution and by task/worker fit,
//! and reinforces the distribution from rewards. An entropy bonus broadcast
//! to every worker on each update keeps the distribution from collapsing
//! onto a single worker.
//!
//! # Main types
//!
//! - [`SelectionEngine`]: Owns the roster, the distribution and a seeded RNG.
//! - [`SelectionConfig`]: Exploration weight and sampling policy knobs.
//! - [`SelectionDistribution`]: Normalized weights aligned with roster order.
//! - [`Allocation`]: Workers chosen for one task.
//! - [`UpdateReport`]: What one reinforcement did.

/// Engine configuration.
pub mod config;
/// Normalized selection weights and the update rule.
pub mod distribution;
/// Sampling and feedback entry points.
pub mod engine;

pub use config::SelectionConfig;
pub use distribution::{SelectionDistribution, UpdateReport, ENTROPY_EPSILON};
pub use engine::{Allocation, SelectionEngine};
