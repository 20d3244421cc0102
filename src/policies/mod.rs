pub mod arm;
pub mod epsilon_glouton;
pub mod glouton;
pub mod improved_ucb;
pub mod oracle;
mod policy;
pub mod smoothed_ucb;
pub mod statistics;
#[cfg(test)]
pub(crate) mod testing;
pub mod ucb;

pub use epsilon_glouton::{ArmRange, EpsilonGlouton};
pub use glouton::Glouton;
pub use improved_ucb::ImprovedUcb;
pub use oracle::{regret, OracleBaseline};
pub use policy::{
    Policy, PolicyStats, PolicyType, DEFAULT_CONFIDENCE, DEFAULT_EPSILON,
    DEFAULT_EXPLORATION_ROUNDS, DEFAULT_LEARNING_RATE,
};
pub use smoothed_ucb::SmoothedUcb;
pub use statistics::Statistics;
pub use ucb::Ucb;
