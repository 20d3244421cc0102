use super::policy::{checked_machine_count, Policy};
use super::statistics::Statistics;

use crate::casino::Environment;
use crate::errors::PolicyError;

use tracing::debug;

/// Trials spent on round-robin exploration, checked against the credit.
pub(super) fn exploration_trials(
    machine_count: usize,
    credit: u64,
    exploration_rounds: u64,
) -> Result<u64, PolicyError> {
    if exploration_rounds == 0 {
        return Err(PolicyError::NoExplorationRounds);
    }

    let required = exploration_rounds.saturating_mul(machine_count as u64);
    if required > credit {
        return Err(PolicyError::InsufficientCredit { credit, required });
    }
    Ok(required)
}

/// Arm visited at `trial` during exploration, `None` once exploration is over.
pub(super) fn exploration_arm(trial: u64, exploration: u64, machine_count: usize) -> Option<usize> {
    (trial < exploration).then(|| (trial % machine_count as u64) as usize)
}

/// Greedy after exploration: every arm is played `exploration_rounds` times, then
/// the arm with the best mean at that point gets all the remaining credit.
#[derive(Clone, Debug)]
pub struct Glouton {
    machine_count: usize,
    credit: u64,
    exploration: u64,
    statistics: Statistics,
    exploit_arm: Option<usize>,
}

impl Glouton {
    pub fn new(
        env: &dyn Environment,
        credit: u64,
        exploration_rounds: u64,
    ) -> Result<Self, PolicyError> {
        let machine_count = checked_machine_count(env)?;
        let exploration = exploration_trials(machine_count, credit, exploration_rounds)?;

        Ok(Self {
            machine_count,
            credit,
            exploration,
            statistics: Statistics::new(machine_count),
            exploit_arm: None,
        })
    }

    pub fn exploit_arm(&self) -> Option<usize> {
        self.exploit_arm
    }

    fn commit(&mut self) -> usize {
        let statistics = &self.statistics;
        *self.exploit_arm.get_or_insert_with(|| {
            let arm_id = statistics.argmax_mean().unwrap_or_default();
            debug!(
                arm_id,
                mean_reward = statistics.mean_reward(arm_id),
                "Exploration over, exploiting arm"
            );
            arm_id
        })
    }
}

impl Policy for Glouton {
    fn name(&self) -> &'static str {
        "Glouton"
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
        self.exploit_arm = None;
    }

    fn select_arm(&mut self) -> Option<usize> {
        let trial = self.statistics.trials();
        if trial >= self.credit {
            return None;
        }

        exploration_arm(trial, self.exploration, self.machine_count)
            .or_else(|| Some(self.commit()))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.statistics.update(arm_id, reward)
    }
}
