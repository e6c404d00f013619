use crate::config::{SelectionConfig, JITTER_MAX, JITTER_MIN};
use crate::distribution::{SelectionDistribution, UpdateReport};
use agentnet_core::{AgentnetError, AgentnetResult, Roster, Task, Worker};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{debug, warn};

/// Workers chosen for one task, as roster indices in draw order.
///
/// Duplicates are independent allocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    picks: Vec<usize>,
    fallback: bool,
}

impl Allocation {
    /// Roster indices in draw order.
    pub fn indices(&self) -> &[usize] {
        &self.picks
    }

    /// True when no draw survived filtering and a uniform pick was made instead.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Never true for an allocation returned by [`SelectionEngine::sample`].
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Iterate over the allocated roster indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.picks.iter().copied()
    }
}

/// Owns the selection distribution over a fixed roster.
///
/// `sample` reads the distribution, `update` is the only writer. Both take
/// `&mut self` because they advance the engine's RNG.
#[derive(Debug)]
pub struct SelectionEngine {
    roster: Roster,
    distribution: SelectionDistribution,
    config: SelectionConfig,
    seed: u64,
    rng: ChaCha8Rng,
}

impl SelectionEngine {
    /// Build an engine with a uniform distribution over `roster`.
    pub fn new(roster: Roster, config: SelectionConfig) -> AgentnetResult<Self> {
        config.validate()?;
        if roster.is_empty() {
            return Err(AgentnetError::InvalidRoster(
                "selection engine needs at least one worker".to_string(),
            ));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(
            workers = roster.len(),
            seed,
            exploration_weight = config.exploration_weight,
            "Selection engine initialized"
        );

        Ok(Self {
            distribution: SelectionDistribution::uniform(roster.len()),
            roster,
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// The roster this engine was built with.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current distribution.
    pub fn distribution(&self) -> &SelectionDistribution {
        &self.distribution
    }

    /// Engine configuration.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Seed the RNG was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Worker at `index`, or [`AgentnetError::UnknownWorker`].
    pub fn worker(&self, index: usize) -> AgentnetResult<&Arc<dyn Worker>> {
        self.roster.get(index).ok_or(AgentnetError::UnknownWorker {
            index,
            roster_size: self.roster.len(),
        })
    }

    /// Fork an independent RNG from the engine's stream.
    ///
    /// Used by callers that need their own reproducible randomness (e.g. for
    /// worker attempts) without reseeding from the OS.
    pub fn fork_rng(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.next_u64())
    }

    /// Choose workers for `task`.
    ///
    /// Draws `sample_count` indices with replacement from the distribution,
    /// keeps those whose capability beats `complexity * jitter`, drops
    /// expensive workers on low-complexity tasks, and falls back to one
    /// uniformly random worker when nothing survives.
    pub fn sample(&mut self, task: &Task, sample_count: usize) -> Allocation {
        let draws = self.draw(sample_count);
        let complexity = task.complexity();
        let cheap_only = complexity <= self.config.low_complexity_threshold;

        let mut picks = Vec::with_capacity(draws.len());
        for index in draws {
            let Some(worker) = self.roster.get(index) else {
                continue;
            };
            let jitter = self.rng.random_range(JITTER_MIN..=JITTER_MAX);
            if worker.capability() < complexity * jitter {
                debug!(
                    worker = worker.identity(),
                    jitter, "Candidate rejected by capability filter"
                );
                continue;
            }
            if cheap_only && worker.cost() >= self.config.budget_ceiling {
                debug!(
                    worker = worker.identity(),
                    cost = worker.cost(),
                    "Candidate rejected by budget filter"
                );
                continue;
            }
            picks.push(index);
        }

        if picks.is_empty() {
            let index = self.rng.random_range(0..self.roster.len());
            debug!(task = task.name(), index, "No eligible worker, uniform fallback");
            return Allocation {
                picks: vec![index],
                fallback: true,
            };
        }

        Allocation {
            picks,
            fallback: false,
        }
    }

    fn draw(&mut self, sample_count: usize) -> Vec<usize> {
        match WeightedIndex::new(self.distribution.weights()) {
            Ok(weighted) => (0..sample_count)
                .map(|_| weighted.sample(&mut self.rng))
                .collect(),
            Err(e) => {
                // Unreachable while the distribution is normalized; keep sampling anyway.
                warn!(error = %e, "Distribution unusable for weighted draw, resetting");
                self.distribution.reset();
                let n = self.roster.len();
                (0..sample_count)
                    .map(|_| self.rng.random_range(0..n))
                    .collect()
            }
        }
    }

    /// Apply `reward` to the worker at `index`.
    ///
    /// A weight pushed below zero is clamped; a distribution whose sum
    /// collapses is reset to uniform. Neither is an error. An index outside
    /// the roster is.
    pub fn update(&mut self, index: usize, reward: f64) -> AgentnetResult<UpdateReport> {
        if index >= self.distribution.len() {
            return Err(AgentnetError::UnknownWorker {
                index,
                roster_size: self.distribution.len(),
            });
        }

        let report = self
            .distribution
            .reinforce(index, reward, self.config.exploration_weight);

        if report.reset {
            warn!(
                index,
                reward, "Distribution collapsed to a non-positive sum, reset to uniform"
            );
        } else if report.clamped {
            debug!(index, reward, "Negative weight clamped to zero");
        }
        debug!(
            index,
            reward,
            weight = report.weight_after,
            entropy = report.entropy,
            "Distribution updated"
        );

        Ok(report)
    }
}
