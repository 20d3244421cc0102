use crate::casino::{Casino, Environment, Oracle};
use crate::config::AppConfig;
use crate::errors::{PolicyError, SimulationError};
use crate::policies::{regret, OracleBaseline, Policy, PolicyStats, PolicyType};

use serde::{Deserialize, Serialize};
use tracing::info;

/// How the oracle reward is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleMode {
    /// `best_arm_mean * credit`
    #[default]
    Expected,
    /// Actually play the best machine `credit` times.
    Simulated,
}

#[derive(Debug, Serialize)]
pub struct PolicyOutcome {
    pub policy: &'static str,
    pub reward: f64,
    pub regret: f64,
    pub stats: PolicyStats,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub credit: u64,
    pub best_arm: usize,
    pub oracle_reward: f64,
    pub outcomes: Vec<PolicyOutcome>,
}

/// Every configured policy run against the same casino, then compared to the oracle.
pub struct Simulation {
    casino: Casino,
    credit: u64,
    oracle_mode: OracleMode,
    oracle: OracleBaseline,
    policies: Vec<Box<dyn Policy + Send>>,
}

impl Simulation {
    pub fn new(
        casino: Casino,
        credit: u64,
        oracle_mode: OracleMode,
        policy_types: Vec<PolicyType>,
    ) -> Result<Self, PolicyError> {
        let policies = policy_types
            .into_iter()
            .map(|policy_type| policy_type.build(&casino, credit))
            .collect::<Result<Vec<_>, _>>()?;
        let oracle = OracleBaseline::new(&casino, credit)?;

        Ok(Self {
            casino,
            credit,
            oracle_mode,
            oracle,
            policies,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SimulationError> {
        let casino = Casino::new(config.casino.machines, config.casino.seed)?;
        let simulation = Self::new(
            casino,
            config.simulation.credit,
            config.simulation.oracle,
            config.policies.clone(),
        )?;
        Ok(simulation)
    }

    pub fn run(&mut self) -> Result<SimulationReport, PolicyError> {
        info!(
            machines = self.casino.machine_count(),
            credit = self.credit,
            policies = self.policies.len(),
            "Starting simulation"
        );

        let mut rewards = Vec::with_capacity(self.policies.len());
        for policy in self.policies.iter_mut() {
            rewards.push(policy.run(&mut self.casino)?);
        }

        let oracle_reward = match self.oracle_mode {
            OracleMode::Expected => self.oracle.expected_reward(&self.casino),
            OracleMode::Simulated => self.oracle.simulate(&mut self.casino),
        };

        let outcomes = self
            .policies
            .iter()
            .zip(rewards)
            .map(|(policy, reward)| PolicyOutcome {
                policy: policy.name(),
                reward,
                regret: regret(oracle_reward, reward),
                stats: policy.stats(),
            })
            .collect();

        Ok(SimulationReport {
            credit: self.credit,
            best_arm: self.casino.best_arm(),
            oracle_reward,
            outcomes,
        })
    }
}
