//! Simulated remote APIs
//!
//! No network traffic is ever sent. Test requests and connection tests are
//! answered from canned bodies after an artificial delay.

pub mod config;
pub mod responses;
pub mod runner;

pub use config::SimulationConfig;
pub use runner::{
    ConnectionOutcome, LatencyClass, SimulatedResponse, StatusClass, TestError, TestRunner,
};
