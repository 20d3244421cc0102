use super::policy::{checked_confidence, checked_machine_count, Policy};
use super::statistics::{argmax, Statistics};

use crate::casino::Environment;
use crate::errors::PolicyError;

/// UCB1: untried arms first, in index order, then the arm maximizing
/// `mean + confidence * sqrt(2 ln(n) / pulls)`.
#[derive(Clone, Debug)]
pub struct Ucb {
    machine_count: usize,
    credit: u64,
    confidence: f64,
    statistics: Statistics,
}

impl Ucb {
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

    // only meaningful once every arm has been pulled
    fn bound(&self, arm_id: usize) -> f64 {
        let n = self.statistics.trials() as f64;
        let pulls = self.statistics.pulls(arm_id) as f64;
        self.statistics.mean_reward(arm_id) + self.confidence * (2.0 * n.ln() / pulls).sqrt()
    }
}

impl Policy for Ucb {
    fn name(&self) -> &'static str {
        "Ucb"
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

        self.statistics
            .first_untried()
            .or_else(|| argmax((0..self.machine_count).map(|arm_id| self.bound(arm_id))))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.statistics.update(arm_id, reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casino::Casino;
    use crate::policies::testing::ScriptedEnvironment;

    const SEED: u64 = 1234;

    fn step(policy: &mut Ucb, env: &mut dyn Environment) -> Option<usize> {
        let arm_id = policy.select_arm()?;
        let reward = env.play(arm_id);
        policy.update(arm_id, reward).unwrap();
        Some(arm_id)
    }

    #[test]
    fn cold_start_in_index_order() {
        let mut env = ScriptedEnvironment::new(vec![0.1, 0.9, 0.5]);
        let mut policy = Ucb::new(&env, 100, 1.0).unwrap();

        let first: Vec<Option<usize>> = (0..3).map(|_| step(&mut policy, &mut env)).collect();
        assert_eq!(first, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn five_arms_hundred_trials() {
        let mut casino = Casino::new(5, Some(SEED)).unwrap();
        let mut policy = Ucb::new(&casino, 100, 1.0).unwrap();

        for _ in 0..5 {
            step(&mut policy, &mut casino);
        }
        assert!((0..5).all(|arm_id| policy.statistics.pulls(arm_id) == 1));

        for _ in 5..100 {
            let bounds: Vec<f64> = (0..5).map(|arm_id| policy.bound(arm_id)).collect();
            let expected = argmax(bounds);
            assert_eq!(step(&mut policy, &mut casino), expected);
        }

        assert_eq!(policy.statistics.trials(), 100);
        assert_eq!(step(&mut policy, &mut casino), None);
        assert_eq!(policy.statistics.trials(), 100);
    }

    #[test]
    fn every_arm_tried_after_first_round() {
        let mut casino = Casino::new(8, Some(SEED)).unwrap();
        let mut policy = Ucb::new(&casino, 1_000, 2.0).unwrap();
        for _ in 0..8 {
            step(&mut policy, &mut casino);
        }
        assert_eq!(policy.statistics.first_untried(), None);
    }

    #[test]
    fn bound_formula() {
        let mut policy = Ucb::new(&ScriptedEnvironment::new(vec![0.0, 0.0]), 10, 0.5).unwrap();
        policy.update(0, 1.0).unwrap();
        policy.update(1, 0.0).unwrap();
        policy.update(1, 0.5).unwrap();

        let expected_0 = 1.0 + 0.5 * (2.0 * 3f64.ln() / 1.0).sqrt();
        let expected_1 = 0.25 + 0.5 * (2.0 * 3f64.ln() / 2.0).sqrt();
        assert!((policy.bound(0) - expected_0).abs() < 1e-12);
        assert!((policy.bound(1) - expected_1).abs() < 1e-12);
        assert_eq!(policy.select_arm(), Some(0));
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        let mut policy = Ucb::new(&ScriptedEnvironment::new(vec![0.0; 3]), 10, 1.0).unwrap();
        (0..3).for_each(|arm_id| policy.update(arm_id, 0.5).unwrap());
        assert_eq!(policy.select_arm(), Some(0));
    }

    #[test]
    fn converges_to_best_arm() {
        let mut casino = Casino::with_means(vec![0.0, 0.5, 2.0, 1.0], Some(SEED)).unwrap();
        let mut policy = Ucb::new(&casino, 5_000, 1.0).unwrap();
        policy.run(&mut casino).unwrap();

        let pulls: Vec<u64> = (0..4).map(|arm_id| policy.statistics.pulls(arm_id)).collect();
        assert_eq!(argmax(pulls.iter().map(|&p| p as f64)), Some(2));
        assert!(pulls[2] > 4_000);
    }

    #[test]
    fn zero_credit() {
        let mut env = ScriptedEnvironment::new(vec![0.1, 0.9]);
        let mut policy = Ucb::new(&env, 0, 1.0).unwrap();
        assert_eq!(policy.run(&mut env), Ok(0.0));
        assert_eq!(env.total_plays(), 0);
    }

    #[test]
    fn update_unknown_arm() {
        let mut policy = Ucb::new(&ScriptedEnvironment::new(vec![0.1]), 10, 1.0).unwrap();
        assert_eq!(policy.update(1, 1.0), Err(PolicyError::ArmNotFound(1)));
    }
}
