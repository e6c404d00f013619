use serde::Serialize;

/// Keeps `ln` defined for zero-probability entries.
pub const ENTROPY_EPSILON: f64 = 1e-8;

/// Probability weights aligned with roster order.
///
/// After every [`SelectionDistribution::reinforce`] the weights are
/// non-negative and sum to 1. The length never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionDistribution {
    weights: Vec<f64>,
}

/// What a single reinforcement did to the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpdateReport {
    /// Roster index that received the reward.
    pub index: usize,
    /// Reward applied.
    pub reward: f64,
    /// Weight of `index` before the update.
    pub weight_before: f64,
    /// Weight of `index` after the update.
    pub weight_after: f64,
    /// Entropy of the distribution after the reward step, before the bonus.
    pub entropy: f64,
    /// Bonus broadcast to every entry (`exploration_weight * entropy`).
    pub exploration_bonus: f64,
    /// The reward drove the weight below zero and it was clamped.
    pub clamped: bool,
    /// The sum became non-positive and the distribution was reset to uniform.
    pub reset: bool,
}

impl SelectionDistribution {
    /// `1/n` for every entry.
    pub fn uniform(n: usize) -> Self {
        let weight = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            weights: vec![weight; n],
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True only for a zero-sized distribution.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// All weights in roster order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Shannon entropy `-Σ p ln(p + ε)`.
    pub fn entropy(&self) -> f64 {
        -self
            .weights
            .iter()
            .map(|p| p * (p + ENTROPY_EPSILON).ln())
            .sum::<f64>()
    }

    /// Index of the heaviest entry (first one on ties).
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &w) in self.weights.iter().enumerate() {
            match best {
                Some((_, bw)) if w <= bw => {}
                _ => best = Some((i, w)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Back to `1/n` everywhere.
    pub fn reset(&mut self) {
        *self = Self::uniform(self.weights.len());
    }

    /// Divide by the sum. Returns `false` (after resetting to uniform) when
    /// the sum is not a positive finite number.
    fn normalize(&mut self) -> bool {
        let sum = self.sum();
        if !sum.is_finite() || sum <= 0.0 {
            self.reset();
            return false;
        }
        for w in &mut self.weights {
            *w /= sum;
        }
        true
    }

    /// Apply `reward` to `index`, renormalize, then broadcast the entropy bonus
    /// and renormalize again. `index` must be in range.
    pub(crate) fn reinforce(
        &mut self,
        index: usize,
        reward: f64,
        exploration_weight: f64,
    ) -> UpdateReport {
        let weight_before = self.weights[index];

        let raw = weight_before + reward;
        let clamped = !(raw >= 0.0);
        self.weights[index] = if clamped { 0.0 } else { raw };

        let mut reset = !self.normalize();

        let entropy = self.entropy();
        // ε makes the entropy of a point mass slightly negative.
        let exploration_bonus = (exploration_weight * entropy).max(0.0);
        for w in &mut self.weights {
            *w += exploration_bonus;
        }
        if !self.normalize() {
            reset = true;
        }

        UpdateReport {
            index,
            reward,
            weight_before,
            weight_after: self.weights[index],
            entropy,
            exploration_bonus,
            clamped,
            reset,
        }
    }
}
