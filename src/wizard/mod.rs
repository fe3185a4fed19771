//! Step-flow state machine
//!
//! The direction picks one of three step orderings; `WizardState` owns the
//! current step along with everything the forms collect.

pub mod direction;
pub mod gates;
pub mod state;
pub mod steps;

pub use direction::{IntegrationDirection, Side};
pub use gates::ValidationError;
pub use state::WizardState;
pub use steps::StepId;
