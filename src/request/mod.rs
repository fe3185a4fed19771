//! HR and external request descriptions, plus secret masking

pub mod builder;
pub mod mask;

pub use builder::{generate_external_request, generate_request, RequestDescription};
pub use mask::{mask_secret, SecretString};
