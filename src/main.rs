use casino_bandits::config::AppConfig;
use casino_bandits::errors::SimulationError;
use casino_bandits::simulation::Simulation;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SimulationError> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut simulation = Simulation::from_config(&config)?;
    let report = simulation.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
