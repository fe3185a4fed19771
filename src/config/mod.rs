//! Configuration file

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{Config, HrConfig, CONFIG_DIR_ENV};
