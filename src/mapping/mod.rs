//! Field mapping between the HR schema and the external schema

pub mod store;

pub use store::{FieldRole, MappingError, MappingStore, MappingSummary, TargetPolicy};
