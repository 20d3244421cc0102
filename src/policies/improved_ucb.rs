use super::policy::{checked_confidence, checked_machine_count, Policy};
use super::statistics::{argmax, Statistics};

use crate::casino::Environment;
use crate::errors::PolicyError;

const EPS: f64 = 1e-6;

/// UCB variant with a decaying exploration term and an exponential moving
/// average as reward estimate, so recent rewards weigh more than old ones.
#[derive(Clone, Debug)]
pub struct ImprovedUcb {
    machine_count: usize,
    credit: u64,
    confidence: f64,
    learning_rate: f64,
    seed_arms: bool,
    statistics: Statistics,
}

impl ImprovedUcb {
    pub fn new(
        env: &dyn Environment,
        credit: u64,
        confidence: f64,
        learning_rate: f64,
        seed_arms: bool,
    ) -> Result<Self, PolicyError> {
        let machine_count = checked_machine_count(env)?;
        let confidence = checked_confidence(confidence)?;
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(PolicyError::InvalidLearningRate(learning_rate));
        }

        Ok(Self {
            machine_count,
            credit,
            confidence,
            learning_rate,
            seed_arms,
            statistics: Statistics::new(machine_count),
        })
    }

    // delta = 2 ln(n * pulls + eps) / (pulls + eps)^2, negative values clamped before the root
    fn delta(&self, arm_id: usize) -> f64 {
        let n = self.statistics.trials() as f64;
        let pulls = self.statistics.pulls(arm_id) as f64;
        (2.0 * (n * pulls + EPS).ln() / (pulls + EPS).powi(2)).max(0.0)
    }

    fn bound(&self, arm_id: usize) -> f64 {
        self.statistics.mean_reward(arm_id) + self.confidence * self.delta(arm_id).sqrt()
    }
}

impl Policy for ImprovedUcb {
    fn name(&self) -> &'static str {
        "ImprovedUcb"
    }

    fn credit(&self) -> u64 {
        self.credit
    }

    fn machine_count(&self) -> usize {
        self.machine_count
    }

    fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn reset(&mut self) {
        self.statistics.reset(self.machine_count);
    }

    fn select_arm(&mut self) -> Option<usize> {
        if self.statistics.trials() >= self.credit {
            return None;
        }

        let untried = self
            .seed_arms
            .then(|| self.statistics.first_untried())
            .flatten();

        untried.or_else(|| argmax((0..self.machine_count).map(|arm_id| self.bound(arm_id))))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.statistics
            .update_with_rate(arm_id, reward, self.learning_rate)
    }
}
