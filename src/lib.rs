//! hrbridge library interface
//!
//! A step wizard that configures an integration between the ZenHR API and
//! an external system: pick the HR endpoint and fields, describe the
//! external API, map fields across, review generated requests and run a
//! simulated test.
//!
//! # Module Organization
//!
//! - [`schema`] - Static HR API catalog and value validation
//! - [`wizard`] - Wizard state, step sequences and step gates
//! - [`external`] - External system description and field import
//! - [`mapping`] - HR to external field mappings
//! - [`request`] - Request descriptions and secret masking
//! - [`devexp`] - Review rendering and code snippets
//! - [`mock`] - Simulated request and connection tests
//! - [`sessions`] - Saved configurations and their store
//! - [`interactive`] - Prompt-driven wizard front end
//! - [`core`] - Command dispatch
//! - [`signals`] - Interrupt handling (was_interrupted, set_interrupted)
//! - [`errors`] - Error types (HrbridgeError, Result)
//! - [`status`] - Exit status codes (ExitStatus)

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod devexp;
pub mod errors;
pub mod external;
pub mod interactive;
pub mod mapping;
pub mod mock;
pub mod output;
pub mod request;
pub mod schema;
pub mod sessions;
pub mod signals;
pub mod status;
pub mod wizard;
