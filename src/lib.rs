//! Multi-armed bandit simulation: a casino of noisy slot machines and a set of
//! arm-selection policies competing for the best cumulative reward over a
//! fixed credit of plays.

pub mod casino;
pub mod config;
pub mod errors;
pub mod policies;
pub mod rng;
pub mod simulation;
