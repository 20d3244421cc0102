use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arm {
    pub(super) pulls: u64,
    pub(super) mean_reward: f64,
}

impl Arm {
    pub fn is_untried(&self) -> bool {
        self.pulls == 0
    }

    // (count * mean + reward) / (count + 1), written so it does not grow with count
    pub fn update(&mut self, reward: f64) {
        self.pulls += 1;
        self.mean_reward += (reward - self.mean_reward) / (self.pulls as f64);
    }

    pub fn update_with_rate(&mut self, reward: f64, learning_rate: f64) {
        self.pulls += 1;
        self.mean_reward += learning_rate * (reward - self.mean_reward);
    }

    pub fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.pulls,
            mean_reward: self.mean_reward,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}
