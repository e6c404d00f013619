#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentnet_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// 1. Outcome probabilities over many trials
// ---------------------------------------------------------------------------

#[test]
fn attempt_probability_matches_capability_ratio() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let cases = [
        (10.0, 1.0, 1.0),
        (1.0, 10.0, 0.1),
        (5.0, 10.0, 0.5),
        (3.0, 4.0, 0.75),
    ];

    for (capability, complexity, expected) in cases {
        let worker = WorkerProfile::new("w", capability, 1.0);
        let task = Task::new("t", complexity).unwrap();
        let trials = 10_000;
        let wins = (0..trials)
            .filter(|_| worker.attempt(&task, &mut rng))
            .count();
        let observed = wins as f64 / trials as f64;
        assert!(
            (observed - expected).abs() <= 0.02,
            "capability {capability} vs complexity {complexity}: expected {expected}, observed {observed}"
        );
    }
}

// ---------------------------------------------------------------------------
// 2. Custom workers plug into the roster through the trait
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Shouter;

impl Strategy for Shouter {
    fn name(&self) -> &str {
        "shout"
    }

    fn execute(&self, worker: &str, task: &Task) -> String {
        format!("{} SHOUTS {}", worker, task.name().to_uppercase())
    }
}

#[derive(Debug)]
struct AlwaysFails;

impl Worker for AlwaysFails {
    fn identity(&self) -> &str {
        "Saboteur"
    }

    fn capability(&self) -> f64 {
        100.0
    }

    fn cost(&self) -> f64 {
        0.0
    }

    fn attempt(&self, _task: &Task, _rng: &mut dyn rand::RngCore) -> bool {
        false
    }
}

#[test]
fn custom_workers_and_strategies_register() {
    let roster = Roster::builder()
        .register(WorkerProfile::new("Loud", 2.0, 1.0).with_strategy(Arc::new(Shouter)))
        .register(AlwaysFails)
        .build()
        .unwrap();

    let task = Task::new("status report", 1.0).unwrap();
    let loud = roster.get(0).unwrap();
    let output = loud.strategy().unwrap().execute(loud.identity(), &task);
    assert_eq!(output, "Loud SHOUTS STATUS REPORT");

    let saboteur = roster.get(roster.index_of("Saboteur").unwrap()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(!saboteur.attempt(&task, &mut rng));
}

// ---------------------------------------------------------------------------
// 3. Error display
// ---------------------------------------------------------------------------

#[test]
fn error_messages_are_descriptive() {
    let err = AgentnetError::UnknownWorker {
        index: 7,
        roster_size: 3,
    };
    assert_eq!(err.to_string(), "Unknown worker index 7 (roster size 3)");

    let err = Task::new("broken", -1.0).unwrap_err();
    assert!(err.to_string().starts_with("Invalid task:"));
}
