use crate::casino::{Environment, Oracle};
use crate::policies::statistics::argmax;

/// Noise-free environment: every play returns the machine mean.
pub struct ScriptedEnvironment {
    means: Vec<f64>,
    plays: Vec<u64>,
}

impl ScriptedEnvironment {
    pub fn new(means: Vec<f64>) -> Self {
        let plays = vec![0; means.len()];
        Self { means, plays }
    }

    pub fn plays(&self, index: usize) -> u64 {
        self.plays[index]
    }

    pub fn total_plays(&self) -> u64 {
        self.plays.iter().sum()
    }
}

impl Environment for ScriptedEnvironment {
    fn machine_count(&self) -> usize {
        self.means.len()
    }

    fn play(&mut self, index: usize) -> f64 {
        self.plays[index] += 1;
        self.means[index]
    }
}

impl Oracle for ScriptedEnvironment {
    fn best_arm(&self) -> usize {
        argmax(self.means.iter().copied()).unwrap_or_default()
    }

    fn best_arm_mean(&self) -> f64 {
        self.means[self.best_arm()]
    }
}
