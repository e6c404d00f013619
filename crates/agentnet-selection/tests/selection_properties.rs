#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentnet_core::{Roster, Task, WorkerProfile};
use agentnet_selection::*;
use proptest::prelude::*;

fn roster_of(profiles: &[(f64, f64)]) -> Roster {
    profiles
        .iter()
        .enumerate()
        .fold(Roster::builder(), |builder, (i, (capability, cost))| {
            builder.register(WorkerProfile::new(format!("w{i}"), *capability, *cost))
        })
        .build()
        .unwrap()
}

fn reference_engine(seed: u64) -> SelectionEngine {
    let roster = roster_of(&[(1.0, 1.0), (5.0, 3.0), (10.0, 8.0)]);
    SelectionEngine::new(roster, SelectionConfig::default().with_seed(seed)).unwrap()
}

// ---------------------------------------------------------------------------
// 1. Normalization after arbitrary update sequences
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distribution_stays_normalized(
        n in 1usize..8,
        exploration_weight in 0.0f64..1.0,
        updates in prop::collection::vec((0usize..64, -2.0f64..2.0), 1..200),
    ) {
        let profiles: Vec<(f64, f64)> = (0..n).map(|i| (1.0 + i as f64, i as f64)).collect();
        let config = SelectionConfig::default()
            .with_seed(0)
            .with_exploration_weight(exploration_weight);
        let mut engine = SelectionEngine::new(roster_of(&profiles), config).unwrap();

        for (raw_index, reward) in updates {
            engine.update(raw_index % n, reward).unwrap();
            let dist = engine.distribution();
            prop_assert_eq!(dist.len(), n);
            prop_assert!(dist.weights().iter().all(|w| *w >= 0.0 && w.is_finite()));
            prop_assert!((dist.sum() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn sample_always_returns_a_worker(
        profiles in prop::collection::vec((0.1f64..20.0, 0.0f64..10.0), 1..6),
        complexity in 0.01f64..100.0,
        count in 1usize..6,
        seed in any::<u64>(),
    ) {
        let roster = roster_of(&profiles);
        let n = roster.len();
        let mut engine =
            SelectionEngine::new(roster, SelectionConfig::default().with_seed(seed)).unwrap();
        let task = Task::new("prop", complexity).unwrap();

        let allocation = engine.sample(&task, count);
        prop_assert!(!allocation.is_empty());
        prop_assert!(allocation.len() <= count);
        prop_assert!(allocation.iter().all(|i| i < n));
        if allocation.is_fallback() {
            prop_assert_eq!(allocation.len(), 1);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Cheap-task budget
// ---------------------------------------------------------------------------

#[test]
fn cheap_tasks_never_get_expensive_workers_outside_fallback() {
    let mut engine = reference_engine(17);
    for complexity in [0.5, 1.0, 2.0, 3.0] {
        let task = Task::new("cheap", complexity).unwrap();
        for _ in 0..1_000 {
            let allocation = engine.sample(&task, 3);
            if allocation.is_fallback() {
                continue;
            }
            for index in allocation.iter() {
                assert!(engine.roster().get(index).unwrap().cost() < 5.0);
            }
        }
    }
}

#[test]
fn expensive_workers_allowed_above_threshold() {
    let mut engine = reference_engine(17);
    let task = Task::new("hard", 8.0).unwrap();
    let expert_seen = (0..500)
        .map(|_| engine.sample(&task, 3))
        .filter(|a| !a.is_fallback())
        .any(|a| a.iter().any(|i| i == 2));
    assert!(expert_seen);
}

// ---------------------------------------------------------------------------
// 3. Entropy damping from uniform
// ---------------------------------------------------------------------------

#[test]
fn single_positive_update_from_uniform() {
    for target in 0..3 {
        let mut engine = reference_engine(1);
        let before = engine.distribution().get(target).unwrap();
        engine.update(target, 0.1).unwrap();

        let weights = engine.distribution().weights().to_vec();
        assert!(weights[target] > before);

        let others: Vec<f64> = (0..3).filter(|i| *i != target).map(|i| weights[i]).collect();
        assert_eq!(others[0], others[1]);
        assert!(others[0] >= 0.0);
        assert!(others[0] < weights[target]);
    }
}

#[test]
fn higher_exploration_weight_damps_convergence() {
    let run = |weight: f64| {
        let roster = roster_of(&[(1.0, 1.0), (5.0, 3.0), (10.0, 8.0)]);
        let config = SelectionConfig::default()
            .with_seed(3)
            .with_exploration_weight(weight);
        let mut engine = SelectionEngine::new(roster, config).unwrap();
        for _ in 0..30 {
            engine.update(0, 0.1).unwrap();
        }
        engine.distribution().get(0).unwrap()
    };
    assert!(run(0.0) > run(0.1));
    assert!(run(0.1) > run(0.5));
}

// ---------------------------------------------------------------------------
// 4. Degenerate distributions
// ---------------------------------------------------------------------------

#[test]
fn repeated_penalties_never_go_negative() {
    let roster = roster_of(&[(1.0, 1.0), (5.0, 3.0), (10.0, 8.0)]);
    let config = SelectionConfig::default()
        .with_seed(0)
        .with_exploration_weight(0.0);
    let mut engine = SelectionEngine::new(roster, config).unwrap();

    let mut clamped = false;
    for _ in 0..500 {
        let report = engine.update(2, -0.05).unwrap();
        clamped |= report.clamped;
        assert!(engine.distribution().weights().iter().all(|w| *w >= 0.0));
        assert!((engine.distribution().sum() - 1.0).abs() < 1e-6);
    }
    assert!(clamped);
    assert_eq!(engine.distribution().get(2), Some(0.0));
}

#[test]
fn collapsed_sum_resets_to_uniform() {
    let roster = roster_of(&[(1.0, 1.0), (5.0, 3.0)]);
    let config = SelectionConfig::default()
        .with_seed(0)
        .with_exploration_weight(0.0);
    let mut engine = SelectionEngine::new(roster, config).unwrap();

    engine.update(1, -0.5).unwrap();
    assert_eq!(engine.distribution().weights(), &[1.0, 0.0]);

    let report = engine.update(0, -0.05).unwrap();
    assert!(!report.reset);

    let report = engine.update(0, -1.0).unwrap();
    assert!(report.reset);
    assert_eq!(engine.distribution().weights(), &[0.5, 0.5]);
}

// ---------------------------------------------------------------------------
// 5. Determinism under a fixed seed
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_samples_and_updates() {
    let task = Task::new("repeat", 2.0).unwrap();
    let run = |seed: u64| {
        let mut engine = reference_engine(seed);
        let mut history = Vec::new();
        for _ in 0..100 {
            let allocation = engine.sample(&task, 3);
            for index in allocation.iter() {
                engine.update(index, 0.1).unwrap();
            }
            history.push(allocation);
        }
        (history, engine.distribution().clone())
    };

    let (first, first_dist) = run(1234);
    let (second, second_dist) = run(1234);
    assert_eq!(first, second);
    assert_eq!(first_dist, second_dist);

    let (other, _) = run(4321);
    assert_ne!(first, other);
}
