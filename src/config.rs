use crate::policies::{
    ArmRange, PolicyType, DEFAULT_CONFIDENCE, DEFAULT_EPSILON, DEFAULT_EXPLORATION_ROUNDS,
};
use crate::simulation::OracleMode;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct CasinoConfig {
    pub machines: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    pub credit: u64,
    #[serde(default)]
    pub oracle: OracleMode,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub casino: CasinoConfig,
    pub simulation: SimulationConfig,
    #[serde(default = "default_policies")]
    pub policies: Vec<PolicyType>,
}

fn default_policies() -> Vec<PolicyType> {
    vec![
        PolicyType::Glouton {
            exploration_rounds: DEFAULT_EXPLORATION_ROUNDS,
        },
        PolicyType::EpsilonGlouton {
            exploration_rounds: DEFAULT_EXPLORATION_ROUNDS,
            epsilon: DEFAULT_EPSILON,
            arm_range: ArmRange::Inclusive,
            seed: None,
        },
        PolicyType::Ucb {
            confidence: DEFAULT_CONFIDENCE,
        },
    ]
}

impl AppConfig {
    /// `config.{toml,json,...}` if present, overridden by `APP__SECTION__KEY` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("log.level", "info")?
            .set_default("casino.machines", 10)?
            .set_default("simulation.credit", 10_000)
    }
}
