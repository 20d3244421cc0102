use super::arm::ArmStats;
use super::epsilon_glouton::{ArmRange, EpsilonGlouton};
use super::glouton::Glouton;
use super::improved_ucb::ImprovedUcb;
use super::smoothed_ucb::SmoothedUcb;
use super::statistics::Statistics;
use super::ucb::Ucb;

use crate::casino::Environment;
use crate::errors::PolicyError;

use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_EXPLORATION_ROUNDS: u64 = 5;
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_CONFIDENCE: f64 = 1.0;
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyStats {
    pub policy: &'static str,
    pub trials: u64,
    pub total_reward: f64,
    pub arms: Vec<ArmStats>,
}

fn default_exploration_rounds() -> u64 {
    DEFAULT_EXPLORATION_ROUNDS
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_seed_arms() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum PolicyType {
    Glouton {
        #[serde(default = "default_exploration_rounds")]
        exploration_rounds: u64,
    },
    EpsilonGlouton {
        #[serde(default = "default_exploration_rounds")]
        exploration_rounds: u64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default)]
        arm_range: ArmRange,
        seed: Option<u64>,
    },
    Ucb {
        #[serde(default = "default_confidence")]
        confidence: f64,
    },
    ImprovedUcb {
        #[serde(default = "default_confidence")]
        confidence: f64,
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        #[serde(default = "default_seed_arms")]
        seed_arms: bool,
    },
    SmoothedUcb {
        #[serde(default = "default_confidence")]
        confidence: f64,
    },
}

impl PolicyType {
    pub fn build(
        self,
        env: &dyn Environment,
        credit: u64,
    ) -> Result<Box<dyn Policy + Send>, PolicyError> {
        let policy: Box<dyn Policy + Send> = match self {
            PolicyType::Glouton { exploration_rounds } => {
                Box::new(Glouton::new(env, credit, exploration_rounds)?)
            }
            PolicyType::EpsilonGlouton {
                exploration_rounds,
                epsilon,
                arm_range,
                seed,
            } => Box::new(EpsilonGlouton::new(
                env,
                credit,
                exploration_rounds,
                epsilon,
                arm_range,
                seed,
            )?),
            PolicyType::Ucb { confidence } => Box::new(Ucb::new(env, credit, confidence)?),
            PolicyType::ImprovedUcb {
                confidence,
                learning_rate,
                seed_arms,
            } => Box::new(ImprovedUcb::new(
                env,
                credit,
                confidence,
                learning_rate,
                seed_arms,
            )?),
            PolicyType::SmoothedUcb { confidence } => {
                Box::new(SmoothedUcb::new(env, credit, confidence)?)
            }
        };

        Ok(policy)
    }
}

pub(super) fn checked_machine_count(env: &dyn Environment) -> Result<usize, PolicyError> {
    match env.machine_count() {
        0 => Err(PolicyError::NoArmsAvailable),
        count => Ok(count),
    }
}

pub(super) fn checked_confidence(confidence: f64) -> Result<f64, PolicyError> {
    if confidence.is_finite() && confidence > 0.0 {
        Ok(confidence)
    } else {
        Err(PolicyError::InvalidConfidence(confidence))
    }
}

/// A budgeted arm-selection strategy.
///
/// A run resets the statistics, then alternates `select_arm` and `update` until
/// `select_arm` reports that the credit is spent.
pub trait Policy: Send {
    fn name(&self) -> &'static str;
    fn credit(&self) -> u64;
    fn machine_count(&self) -> usize;
    fn statistics(&self) -> &Statistics;

    fn reset(&mut self);
    /// Next arm to play, `None` once the credit is exhausted.
    fn select_arm(&mut self) -> Option<usize>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;

    fn run(&mut self, env: &mut dyn Environment) -> Result<f64, PolicyError> {
        let found = env.machine_count();
        if found != self.machine_count() {
            return Err(PolicyError::MachineCountMismatch {
                expected: self.machine_count(),
                found,
            });
        }

        self.reset();
        info!(policy = self.name(), credit = self.credit(), machines = found, "Starting run");

        while let Some(arm_id) = self.select_arm() {
            let reward = env.play(arm_id);
            self.update(arm_id, reward)?;
        }

        let consumed = self.statistics().trials();
        if consumed != self.credit() {
            return Err(PolicyError::CreditMismatch {
                consumed,
                credit: self.credit(),
            });
        }

        let total_reward = self.statistics().total_reward();
        info!(policy = self.name(), total_reward, "Finished run");
        Ok(total_reward)
    }

    fn stats(&self) -> PolicyStats {
        let statistics = self.statistics();
        PolicyStats {
            policy: self.name(),
            trials: statistics.trials(),
            total_reward: statistics.total_reward(),
            arms: statistics.arm_stats(),
        }
    }
}
