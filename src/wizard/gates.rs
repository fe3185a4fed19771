//! Preconditions for leaving a step
//!
//! A failing gate blocks the transition and leaves the state untouched.

use thiserror::Error;

use super::state::WizardState;
use super::steps::StepId;
use crate::schema::HttpMethod;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an integration direction")]
    DirectionRequired,

    #[error("Please select an endpoint")]
    EndpointRequired,

    #[error("Please select at least one field")]
    FieldsRequired,

    #[error("Please provide the external system API details")]
    ExternalSystemIncomplete,

    #[error("Please map at least one field")]
    MappingRequired,

    #[error("Field ID and name are required")]
    FieldIdAndNameRequired,

    #[error("Field ID must be unique")]
    DuplicateFieldId(String),

    #[error("Field ID '{0}' cannot be changed")]
    FieldIdImmutable(String),

    #[error("No field at position {0}")]
    NoSuchField(usize),

    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    #[error("Please enter a name for this configuration")]
    ConfigNameRequired,

    #[error("Step '{0}' is not part of the current flow")]
    StepUnavailable(StepId),
}

/// Check the preconditions of leaving the current step forward
pub fn check_leave(state: &WizardState) -> Result<(), ValidationError> {
    match state.current_step() {
        StepId::Direction if state.direction().is_none() => Err(ValidationError::DirectionRequired),
        StepId::HrEndpoint if state.endpoint().is_empty() => Err(ValidationError::EndpointRequired),
        StepId::HrFields
            if state.method() == HttpMethod::Get && state.selected_fields().is_empty() =>
        {
            Err(ValidationError::FieldsRequired)
        }
        StepId::ExternalEndpoint if !state.external_system().has_api_details() => {
            Err(ValidationError::ExternalSystemIncomplete)
        }
        StepId::FieldMapping if state.mapping().is_empty() => Err(ValidationError::MappingRequired),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::direction::IntegrationDirection;

    #[test]
    fn test_direction_gate() {
        let state = WizardState::new();
        assert_eq!(check_leave(&state), Err(ValidationError::DirectionRequired));
    }

    #[test]
    fn test_fields_gate_only_for_get() {
        let mut state = WizardState::new();
        state.set_direction(IntegrationDirection::ZenhrToExternal);
        state.go_to(StepId::HrFields).unwrap();
        state.deselect_all_fields();
        assert_eq!(check_leave(&state), Err(ValidationError::FieldsRequired));

        state.set_method(HttpMethod::Post);
        state.deselect_all_fields();
        assert_eq!(check_leave(&state), Ok(()));
    }

    #[test]
    fn test_external_and_mapping_gates() {
        let mut state = WizardState::new();
        state.set_direction(IntegrationDirection::ZenhrToExternal);
        state.go_to(StepId::ExternalEndpoint).unwrap();
        assert_eq!(check_leave(&state), Err(ValidationError::ExternalSystemIncomplete));

        state.go_to(StepId::FieldMapping).unwrap();
        assert_eq!(check_leave(&state), Err(ValidationError::MappingRequired));
    }
}
