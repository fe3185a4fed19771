//! Step sequencing
//!
//! Each direction selects one of three fixed step orderings. Navigation
//! is table-driven: `next_step`/`previous_step` move to the adjacent entry
//! and are no-ops at either end.

use super::direction::IntegrationDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One screen of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StepId {
    Direction = 0,
    HrEndpoint = 1,
    HrFields = 2,
    Filters = 3,
    RequestDetails = 4,
    Review = 5,
    Test = 6,
    ExternalEndpoint = 7,
    ExternalFields = 8,
    FieldMapping = 9,
}

impl StepId {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(label(*self, None))
    }
}

const ZENHR_TO_EXTERNAL: &[StepId] = &[
    StepId::Direction,
    StepId::HrEndpoint,
    StepId::HrFields,
    StepId::ExternalEndpoint,
    StepId::FieldMapping,
    StepId::Review,
    StepId::Test,
];

const EXTERNAL_TO_ZENHR: &[StepId] = &[
    StepId::Direction,
    StepId::ExternalEndpoint,
    StepId::ExternalFields,
    StepId::HrEndpoint,
    StepId::FieldMapping,
    StepId::Review,
    StepId::Test,
];

const BIDIRECTIONAL: &[StepId] = &[
    StepId::Direction,
    StepId::HrEndpoint,
    StepId::HrFields,
    StepId::ExternalEndpoint,
    StepId::ExternalFields,
    StepId::FieldMapping,
    StepId::Review,
    StepId::Test,
];

/// Ordered steps for a direction
pub fn sequence_for(direction: IntegrationDirection) -> &'static [StepId] {
    match direction {
        IntegrationDirection::ZenhrToExternal => ZENHR_TO_EXTERNAL,
        IntegrationDirection::ExternalToZenhr => EXTERNAL_TO_ZENHR,
        IntegrationDirection::Bidirectional => BIDIRECTIONAL,
    }
}

/// Active sequence; an unchosen direction uses the export ordering
pub fn active_sequence(direction: Option<IntegrationDirection>) -> &'static [StepId] {
    sequence_for(direction.unwrap_or(IntegrationDirection::ZenhrToExternal))
}

/// Position of `step` in `steps`, or 0 when absent
pub fn index_of(steps: &[StepId], step: StepId) -> usize {
    steps.iter().position(|s| *s == step).unwrap_or(0)
}

pub fn next_step(steps: &[StepId], current: StepId) -> StepId {
    if !steps.contains(&current) {
        return steps.first().copied().unwrap_or(StepId::Direction);
    }
    let idx = index_of(steps, current);
    steps.get(idx + 1).copied().unwrap_or(current)
}

pub fn previous_step(steps: &[StepId], current: StepId) -> StepId {
    if !steps.contains(&current) {
        return steps.first().copied().unwrap_or(StepId::Direction);
    }
    let idx = index_of(steps, current);
    if idx == 0 {
        current
    } else {
        steps[idx - 1]
    }
}

pub fn is_first(steps: &[StepId], step: StepId) -> bool {
    steps.first() == Some(&step)
}

pub fn is_last(steps: &[StepId], step: StepId) -> bool {
    steps.last() == Some(&step)
}

/// Keep `current` if the new sequence has it; otherwise walk back through the
/// old sequence to the nearest step the new one also has.
pub fn reclamp(old: &[StepId], new: &[StepId], current: StepId) -> StepId {
    if new.contains(&current) {
        return current;
    }
    let end = old.iter().position(|s| *s == current).unwrap_or(0);
    old[..end]
        .iter()
        .rev()
        .find(|s| new.contains(s))
        .copied()
        .unwrap_or(StepId::Direction)
}

/// Display label; field steps are worded per direction
pub fn label(step: StepId, direction: Option<IntegrationDirection>) -> &'static str {
    match step {
        StepId::Direction => "Direction",
        StepId::HrEndpoint => "ZenHR Endpoint",
        StepId::HrFields => match direction {
            Some(IntegrationDirection::Bidirectional) => "ZenHR Fields",
            _ => "Choose Fields",
        },
        StepId::Filters => "Filters",
        StepId::RequestDetails => "Request Details",
        StepId::Review => "Review",
        StepId::Test => "Test",
        StepId::ExternalEndpoint => "External System",
        StepId::ExternalFields => match direction {
            Some(IntegrationDirection::Bidirectional) => "External Fields",
            _ => "Define Fields",
        },
        StepId::FieldMapping => "Map Fields",
    }
}

/// Labelled steps of a sequence, for progress display
pub fn labelled(direction: Option<IntegrationDirection>) -> Vec<(StepId, &'static str)> {
    active_sequence(direction)
        .iter()
        .map(|s| (*s, label(*s, direction)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step_first_exactly_once() {
        for direction in IntegrationDirection::ALL {
            let steps = sequence_for(direction);
            assert_eq!(steps[0], StepId::Direction);
            assert_eq!(steps.iter().filter(|s| **s == StepId::Direction).count(), 1);
        }
    }

    #[test]
    fn test_sequences_end_with_test() {
        for direction in IntegrationDirection::ALL {
            assert_eq!(sequence_for(direction).last(), Some(&StepId::Test));
        }
    }

    #[test]
    fn test_filters_and_details_in_no_sequence() {
        for direction in IntegrationDirection::ALL {
            let steps = sequence_for(direction);
            assert!(!steps.contains(&StepId::Filters));
            assert!(!steps.contains(&StepId::RequestDetails));
        }
    }

    #[test]
    fn test_round_trip_laws() {
        for direction in IntegrationDirection::ALL {
            let steps = sequence_for(direction);
            for (i, step) in steps.iter().enumerate() {
                if i > 0 {
                    assert_eq!(next_step(steps, previous_step(steps, *step)), *step);
                }
                if i + 1 < steps.len() {
                    assert_eq!(previous_step(steps, next_step(steps, *step)), *step);
                }
            }
        }
    }

    #[test]
    fn test_navigation_clamped_at_ends() {
        let steps = sequence_for(IntegrationDirection::ZenhrToExternal);
        assert_eq!(previous_step(steps, StepId::Direction), StepId::Direction);
        assert_eq!(next_step(steps, StepId::Test), StepId::Test);
    }

    #[test]
    fn test_index_of_missing_is_zero() {
        let steps = sequence_for(IntegrationDirection::ZenhrToExternal);
        assert_eq!(index_of(steps, StepId::ExternalFields), 0);
        assert_eq!(index_of(steps, StepId::Review), 5);
    }

    #[test]
    fn test_reclamp() {
        let bi = sequence_for(IntegrationDirection::Bidirectional);
        let export = sequence_for(IntegrationDirection::ZenhrToExternal);
        let import = sequence_for(IntegrationDirection::ExternalToZenhr);

        // present in both
        assert_eq!(reclamp(bi, export, StepId::FieldMapping), StepId::FieldMapping);
        // external fields -> nearest earlier step shared with export ordering
        assert_eq!(reclamp(bi, export, StepId::ExternalFields), StepId::ExternalEndpoint);
        // hr fields absent from import ordering -> back to hr endpoint
        assert_eq!(reclamp(export, import, StepId::HrFields), StepId::HrEndpoint);
    }

    #[test]
    fn test_labels_follow_direction() {
        assert_eq!(label(StepId::HrFields, Some(IntegrationDirection::Bidirectional)), "ZenHR Fields");
        assert_eq!(label(StepId::HrFields, Some(IntegrationDirection::ZenhrToExternal)), "Choose Fields");
        assert_eq!(label(StepId::ExternalFields, Some(IntegrationDirection::ExternalToZenhr)), "Define Fields");
        assert_eq!(labelled(None).len(), 7);
    }
}
