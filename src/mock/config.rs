//! Simulation configuration

use serde::{Deserialize, Serialize};

/// Parameters of the simulated remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability that a test request succeeds
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Artificial delay before a result is reported, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_success_rate() -> f64 {
    0.8
}

fn default_delay_ms() -> u64 {
    1500
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_rate: default_success_rate(),
            delay_ms: default_delay_ms(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = rate;
        self
    }

    /// Success probability clamped into `0.0..=1.0`; NaN counts as never
    pub fn effective_success_rate(&self) -> f64 {
        if self.success_rate.is_nan() {
            0.0
        } else {
            self.success_rate.clamp(0.0, 1.0)
        }
    }
}
