use crate::casino::Oracle;
use crate::errors::PolicyError;

use tracing::debug;

/// Reference player that knows which machine is best. Only used to measure
/// regret, never to pick arms for a learning policy.
#[derive(Clone, Debug)]
pub struct OracleBaseline {
    credit: u64,
}

impl OracleBaseline {
    pub fn new(env: &dyn Oracle, credit: u64) -> Result<Self, PolicyError> {
        if env.machine_count() == 0 {
            return Err(PolicyError::NoArmsAvailable);
        }
        Ok(Self { credit })
    }

    /// Best mean payoff times the credit.
    pub fn expected_reward(&self, env: &dyn Oracle) -> f64 {
        env.best_arm_mean() * self.credit as f64
    }

    /// Plays the best machine for the whole credit.
    pub fn simulate(&self, env: &mut dyn Oracle) -> f64 {
        let best_arm = env.best_arm();
        debug!(best_arm, credit = self.credit, "Simulating oracle");
        (0..self.credit).map(|_| env.play(best_arm)).sum()
    }
}

pub fn regret(oracle_reward: f64, policy_reward: f64) -> f64 {
    oracle_reward - policy_reward
}
