use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Environment has no arms to play")]
    NoArmsAvailable,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error("Epsilon must be within [0, 1], got {0}")]
    InvalidEpsilon(f64),
    #[error("Confidence must be finite and strictly positive, got {0}")]
    InvalidConfidence(f64),
    #[error("Learning rate must be within (0, 1], got {0}")]
    InvalidLearningRate(f64),
    #[error("At least one exploration round is required")]
    NoExplorationRounds,
    #[error("Credit {credit} cannot cover the {required} exploration trials")]
    InsufficientCredit { credit: u64, required: u64 },
    #[error("Random arm range is empty for {0} arms")]
    EmptyArmRange(usize),
    #[error("Policy was built for {expected} arms, environment has {found}")]
    MachineCountMismatch { expected: usize, found: usize },
    #[error("Run consumed {consumed} trials out of a credit of {credit}")]
    CreditMismatch { consumed: u64, credit: u64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum CasinoError {
    #[error("A casino needs at least one machine")]
    NoMachines,
    #[error("Machine mean payoff must be finite, got {0}")]
    InvalidMean(f64),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Casino(#[from] CasinoError),
    #[error("Cannot read config: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to serialize report to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
