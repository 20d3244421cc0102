use super::glouton::{exploration_arm, exploration_trials};
use super::policy::{checked_machine_count, Policy};
use super::statistics::Statistics;

use crate::casino::Environment;
use crate::errors::PolicyError;
use crate::rng::MaybeSeededRng;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

/// Arms eligible for the random branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmRange {
    /// `[0, N)`
    #[default]
    Inclusive,
    /// `[0, N - 1)`, the last arm is never drawn at random.
    ExcludeLast,
}

impl ArmRange {
    fn upper_bound(self, machine_count: usize) -> usize {
        match self {
            ArmRange::Inclusive => machine_count,
            ArmRange::ExcludeLast => machine_count.saturating_sub(1),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EpsilonGlouton {
    machine_count: usize,
    credit: u64,
    exploration: u64,
    epsilon: f64,
    arm_range: ArmRange,
    statistics: Statistics,
    best_arm: Option<usize>,
    rng: MaybeSeededRng,
}

impl EpsilonGlouton {
    pub fn new(
        env: &dyn Environment,
        credit: u64,
        exploration_rounds: u64,
        epsilon: f64,
        arm_range: ArmRange,
        seed: Option<u64>,
    ) -> Result<Self, PolicyError> {
        let machine_count = checked_machine_count(env)?;
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidEpsilon(epsilon));
        }
        if arm_range.upper_bound(machine_count) == 0 {
            return Err(PolicyError::EmptyArmRange(machine_count));
        }
        let exploration = exploration_trials(machine_count, credit, exploration_rounds)?;

        Ok(Self {
            machine_count,
            credit,
            exploration,
            epsilon,
            arm_range,
            statistics: Statistics::new(machine_count),
            best_arm: None,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn best_arm(&self) -> Option<usize> {
        self.best_arm
    }

    // fixed once at the end of exploration, never re-evaluated
    fn commit(&mut self) -> usize {
        let statistics = &self.statistics;
        *self.best_arm.get_or_insert_with(|| {
            let arm_id = statistics.argmax_mean().unwrap_or_default();
            debug!(arm_id, "Exploration over, best arm fixed");
            arm_id
        })
    }

    fn exploit_or_explore(&mut self) -> usize {
        let best_arm = self.commit();
        let rng = self.rng.get_rng();
        if rng.random::<f64>() < self.epsilon {
            rng.random_range(0..self.arm_range.upper_bound(self.machine_count))
        } else {
            best_arm
        }
    }
}

impl Policy for EpsilonGlouton {
    fn name(&self) -> &'static str {
        "EpsilonGlouton"
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
        self.best_arm = None;
        // a seeded policy replays the same random branch on every run
        self.rng = MaybeSeededRng::new(self.rng.seed);
    }

    fn select_arm(&mut self) -> Option<usize> {
        let trial = self.statistics.trials();
        if trial >= self.credit {
            return None;
        }

        exploration_arm(trial, self.exploration, self.machine_count)
            .or_else(|| Some(self.exploit_or_explore()))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.statistics.update(arm_id, reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casino::Casino;
    use crate::policies::glouton::Glouton;
    use crate::policies::testing::ScriptedEnvironment;

    const SEED: u64 = 1234;

    fn make_policy(env: &dyn Environment, epsilon: f64, arm_range: ArmRange) -> EpsilonGlouton {
        EpsilonGlouton::new(env, 5_000, 5, epsilon, arm_range, Some(SEED)).unwrap()
    }

    #[test]
    fn zero_epsilon_is_glouton() {
        let mut casino_a = Casino::new(10, Some(SEED)).unwrap();
        let mut casino_b = Casino::new(10, Some(SEED)).unwrap();

        let mut glouton = Glouton::new(&casino_a, 10_000, 5).unwrap();
        let mut epsilon_glouton =
            EpsilonGlouton::new(&casino_b, 10_000, 5, 0.0, ArmRange::Inclusive, Some(SEED))
                .unwrap();

        let reward_a = glouton.run(&mut casino_a).unwrap();
        let reward_b = epsilon_glouton.run(&mut casino_b).unwrap();

        assert_eq!(reward_a, reward_b);
        assert_eq!(glouton.exploit_arm(), epsilon_glouton.best_arm());
        assert_eq!(glouton.stats().arms, epsilon_glouton.stats().arms);
        assert!(glouton
            .statistics()
            .trace()
            .eq(epsilon_glouton.statistics().trace()));
    }

    #[test]
    fn exclude_last_never_draws_last_arm() {
        let mut env = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2, 0.3]);
        let mut policy = make_policy(&env, 1.0, ArmRange::ExcludeLast);
        policy.run(&mut env).unwrap();

        assert_eq!(policy.statistics().pulls(3), 5);
        assert_eq!(policy.statistics().trials(), 5_000);
    }

    #[test]
    fn inclusive_draws_every_arm() {
        let mut env = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2, 0.3]);
        let mut policy = make_policy(&env, 1.0, ArmRange::Inclusive);
        policy.run(&mut env).unwrap();

        assert!((0..4).all(|arm_id| policy.statistics().pulls(arm_id) > 5));
    }

    #[test]
    fn best_arm_fixed_at_cutoff() {
        let mut env = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2, 0.3]);
        let mut policy = make_policy(&env, 0.2, ArmRange::Inclusive);
        policy.run(&mut env).unwrap();

        assert_eq!(policy.best_arm(), Some(0));
        let best_share = policy.statistics().pulls(0) as f64 / 5_000.0;
        // 0.8 greedy + 0.2 / 4 random
        assert!((best_share - 0.85).abs() < 0.03);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut env_a = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2]);
        let mut env_b = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2]);
        let mut policy_a = make_policy(&env_a, 0.5, ArmRange::Inclusive);
        let mut policy_b = make_policy(&env_b, 0.5, ArmRange::Inclusive);
        policy_a.run(&mut env_a).unwrap();
        policy_b.run(&mut env_b).unwrap();

        assert_eq!(policy_a.stats(), policy_b.stats());
    }

    #[test]
    fn rerun_repeats_seeded_trajectory() {
        let mut env = ScriptedEnvironment::new(vec![0.9, 0.1, 0.2, 0.3]);
        let mut policy =
            EpsilonGlouton::new(&env, 500, 5, 0.5, ArmRange::Inclusive, Some(SEED)).unwrap();

        let first_reward = policy.run(&mut env).unwrap();
        let first = policy.stats();
        let second_reward = policy.run(&mut env).unwrap();

        assert_eq!(first_reward, second_reward);
        assert_eq!(first, policy.stats());
    }

    #[test]
    fn invalid_epsilon() {
        let env = ScriptedEnvironment::new(vec![0.9, 0.1]);
        for epsilon in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                EpsilonGlouton::new(&env, 100, 1, epsilon, ArmRange::Inclusive, None),
                Err(PolicyError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn empty_arm_range() {
        let env = ScriptedEnvironment::new(vec![0.9]);
        assert_eq!(
            EpsilonGlouton::new(&env, 100, 1, 0.1, ArmRange::ExcludeLast, None).err(),
            Some(PolicyError::EmptyArmRange(1))
        );
        assert!(EpsilonGlouton::new(&env, 100, 1, 0.1, ArmRange::Inclusive, None).is_ok());
    }
}
