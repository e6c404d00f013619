use crate::strategy::{LiteratureSearch, ThreatScanner};
use agentnet_core::{AgentnetResult, Roster, WorkerProfile};
use std::sync::Arc;

/// The seven stock workers, cheapest first.
pub fn default_profiles() -> Vec<WorkerProfile> {
    vec![
        basic_profile(),
        WorkerProfile::new("Analyst", 2.0, 1.0).with_strategy(Arc::new(ThreatScanner)),
        mid_profile(),
        WorkerProfile::new("Marketer", 6.0, 4.0),
        WorkerProfile::new("FinancialAnalyst", 8.0, 6.0),
        WorkerProfile::new("Medical", 9.0, 7.0).with_strategy(Arc::new(LiteratureSearch)),
        expert_profile(),
    ]
}

/// Roster of every stock worker.
pub fn default_roster() -> AgentnetResult<Roster> {
    default_profiles()
        .into_iter()
        .fold(Roster::builder(), |builder, profile| builder.register(profile))
        .build()
}

/// The three-tier roster: Basic, Mid and Expert.
pub fn core_roster() -> AgentnetResult<Roster> {
    Roster::builder()
        .register(basic_profile())
        .register(mid_profile())
        .register(expert_profile())
        .build()
}

fn basic_profile() -> WorkerProfile {
    WorkerProfile::new("Basic", 1.0, 1.0)
}

fn mid_profile() -> WorkerProfile {
    WorkerProfile::new("Mid", 5.0, 3.0)
}

fn expert_profile() -> WorkerProfile {
    WorkerProfile::new("Expert", 10.0, 8.0)
}
