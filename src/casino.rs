use crate::errors::CasinoError;
use crate::rng::MaybeSeededRng;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// What a policy may see of the reward sources.
pub trait Environment {
    fn machine_count(&self) -> usize;
    /// One reward sample from machine `index`.
    fn play(&mut self, index: usize) -> f64;
}

/// Privileged view on the true payoffs, only meant for regret computation.
pub trait Oracle: Environment {
    fn best_arm(&self) -> usize;
    fn best_arm_mean(&self) -> f64;
}

#[derive(Clone, Debug)]
pub struct Machine {
    mu: f64,
}

impl Machine {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }

    pub fn mean(&self) -> f64 {
        self.mu
    }

    fn play<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let noise: f64 = StandardNormal.sample(rng);
        self.mu + noise
    }
}

/// A row of slot machines with unit-variance gaussian payoffs.
#[derive(Clone, Debug)]
pub struct Casino {
    machines: Vec<Machine>,
    rng: MaybeSeededRng,
}

impl Casino {
    /// Machines get a mean payoff drawn from N(1, 1).
    pub fn new(count: usize, seed: Option<u64>) -> Result<Self, CasinoError> {
        if count == 0 {
            return Err(CasinoError::NoMachines);
        }

        let mut rng = MaybeSeededRng::new(seed);
        let machines = (0..count)
            .map(|_| {
                let offset: f64 = StandardNormal.sample(rng.get_rng());
                Machine::new(1.0 + offset)
            })
            .collect();

        Ok(Self { machines, rng })
    }

    pub fn with_means(means: Vec<f64>, seed: Option<u64>) -> Result<Self, CasinoError> {
        if means.is_empty() {
            return Err(CasinoError::NoMachines);
        }
        if let Some(&mu) = means.iter().find(|mu| !mu.is_finite()) {
            return Err(CasinoError::InvalidMean(mu));
        }

        Ok(Self {
            machines: means.into_iter().map(Machine::new).collect(),
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }
}

impl Environment for Casino {
    fn machine_count(&self) -> usize {
        self.machines.len()
    }

    fn play(&mut self, index: usize) -> f64 {
        self.machines[index].play(self.rng.get_rng())
    }
}

impl Oracle for Casino {
    fn best_arm(&self) -> usize {
        // first machine with the highest mean
        self.machines
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, best_mu), (index, machine)| {
                if machine.mu > best_mu {
                    (index, machine.mu)
                } else {
                    (best, best_mu)
                }
            })
            .0
    }

    fn best_arm_mean(&self) -> f64 {
        self.machines[self.best_arm()].mu
    }
}
