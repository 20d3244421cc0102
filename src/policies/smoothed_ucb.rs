use super::policy::{checked_confidence, checked_machine_count, Policy};
use super::statistics::{argmax, Statistics};

use crate::casino::Environment;
use crate::errors::PolicyError;

/// UCB with add-one smoothing, `mean + confidence * sqrt(ln(n + 1) / (pulls + 1))`.
/// Defined for untried arms, so there is no separate cold-start pass.
#[derive(Clone, Debug)]
pub struct SmoothedUcb {
    machine_count: usize,
    credit: u64,
    confidence: f64,
    statistics: Statistics,
}

impl SmoothedUcb {
    pub fn new(env: &dyn Environment, credit: u64, confidence: f64) -> Result<Self, PolicyError> {
        let machine_count = checked_machine_count(env)?;
        let confidence = checked_confidence(confidence)?;

        Ok(Self {
            machine_count,
            credit,
            confidence,
            statistics: Statistics::new(machine_count),
        })
    }

    fn bound(&self, arm_id: usize) -> f64 {
        let n = self.statistics.trials() as f64;
        let pulls = self.statistics.pulls(arm_id) as f64;
        let width = ((n + 1.0).ln() / (pulls + 1.0)).sqrt();
        self.statistics.mean_reward(arm_id) + self.confidence * width
    }
}

impl Policy for SmoothedUcb {
    fn name(&self) -> &'static str {
        "SmoothedUcb"
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

        argmax((0..self.machine_count).map(|arm_id| self.bound(arm_id)))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.statistics.update(arm_id, reward)
    }
}
