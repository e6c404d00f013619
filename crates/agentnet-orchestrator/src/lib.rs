//! Allocator loop and the collaborators around the selection engine.
//!
//! Runs tasks through allocate, execute, score and feedback, tracks outcomes,
//! and provides the stock roster, strategies and multi-worker helpers.
//!
//! # Main types
//!
//! - [`Controller`]: Owns the selection engine and executes one task per call.
//! - [`OutcomeRecorder`]: Best-effort sink for task outcomes and selections.
//! - [`MetricsTracker`]: Success rates and selection counts.
//! - [`TaskRegistry`]: Named tasks in registration order.
//! - [`Team`] / [`Debate`]: Split a task across workers; settle on an answer.

/// Allocator/feedback loop.
pub mod controller;
/// Batch runs over the registered tasks.
pub mod experiment;
/// Outcome counters.
pub mod metrics;
/// Memory- and knowledge-aware worker output.
pub mod recall;
/// Task registry.
pub mod registry;
/// Stock worker rosters.
pub mod roster;
/// Built-in worker strategies.
pub mod strategy;
/// Task splitting and debate.
pub mod team;

pub use controller::{Controller, OutcomeRecorder, ScoringConfig, TaskReport, WorkerOutcome};
pub use experiment::{
    run_experiment, seed_reference_tasks, ExperimentResults, TaskSummary, REFERENCE_TASKS,
};
pub use metrics::{MetricsSnapshot, MetricsTracker, TaskCounts};
pub use recall::{recall_or_execute, Recollection, Source, PROCESSED_BY};
pub use registry::TaskRegistry;
pub use roster::{core_roster, default_profiles, default_roster};
pub use strategy::{
    strategy_by_name, EchoStrategy, LiteratureSearch, ThreatScanner, TreatmentAdvisor,
    STRATEGY_NAMES,
};
pub use team::{Debate, PartResult, Team, TeamResult, FINAL_ANSWER};
