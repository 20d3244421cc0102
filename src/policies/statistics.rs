use super::arm::{Arm, ArmStats};
use crate::errors::PolicyError;

use std::cmp::Ordering;

/// Index of the first maximal value. NaN never wins.
pub(crate) fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, value)| match best {
            Some((_, best_value))
                if value.partial_cmp(&best_value) != Some(Ordering::Greater) =>
            {
                best
            }
            Some(_) => Some((index, value)),
            None if value.is_nan() => None,
            None => Some((index, value)),
        })
        .map(|(index, _)| index)
}

/// Per-arm counts and means plus the run totals of a single policy invocation.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    arms: Vec<Arm>,
    total_reward: f64,
    trials: u64,
    trace: Vec<f64>,
}

impl Statistics {
    pub fn new(machine_count: usize) -> Self {
        let mut statistics = Self::default();
        statistics.reset(machine_count);
        statistics
    }

    pub fn reset(&mut self, machine_count: usize) {
        self.arms.clear();
        self.arms.resize_with(machine_count, Arm::default);
        self.total_reward = 0.0;
        self.trials = 0;
        self.trace.clear();
    }

    pub fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update(reward);
        self.record(reward);
        Ok(())
    }

    /// Like `update`, but the arm estimate becomes an exponential moving average.
    pub fn update_with_rate(
        &mut self,
        arm_id: usize,
        reward: f64,
        learning_rate: f64,
    ) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update_with_rate(reward, learning_rate);
        self.record(reward);
        Ok(())
    }

    fn record(&mut self, reward: f64) {
        self.total_reward += reward;
        self.trials += 1;
        self.trace.push(self.total_reward / self.trials as f64);
    }

    pub fn machine_count(&self) -> usize {
        self.arms.len()
    }

    pub fn pulls(&self, arm_id: usize) -> u64 {
        self.arms.get(arm_id).map_or(0, |arm| arm.pulls)
    }

    pub fn mean_reward(&self, arm_id: usize) -> f64 {
        self.arms.get(arm_id).map_or(0.0, |arm| arm.mean_reward)
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Running average reward after each trial. Can be walked any number of times.
    pub fn trace(&self) -> impl Iterator<Item = f64> + '_ {
        self.trace.iter().copied()
    }

    pub fn first_untried(&self) -> Option<usize> {
        self.arms.iter().position(Arm::is_untried)
    }

    pub fn argmax_mean(&self) -> Option<usize> {
        argmax(self.arms.iter().map(|arm| arm.mean_reward))
    }

    pub fn arm_stats(&self) -> Vec<ArmStats> {
        self.arms.iter().map(Arm::stats).collect()
    }
}
