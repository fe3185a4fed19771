//! Field mapping bookkeeping
//!
//! Mappings are always keyed by the HR field id, whichever side the wizard
//! displays as the source. A key maps to exactly one external field id.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::wizard::direction::IntegrationDirection;

/// Mapping error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("external field '{target}' is already mapped to '{source_field}'")]
    TargetInUse { target: String, source_field: String },

    #[error("field ids must not be empty")]
    EmptyId,
}

/// Which side of a mapping a field id is looked up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// HR field id (map key)
    Source,
    /// External field id (map value)
    Target,
}

/// Whether one external field may receive several HR fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetPolicy {
    #[default]
    Exclusive,
    Shared,
}

/// Counts shown under the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub mapped: usize,
    pub unmapped: usize,
}

/// HR field id -> external field id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStore {
    entries: IndexMap<String, String>,
    policy: TargetPolicy,
}

impl MappingStore {
    pub fn new(policy: TargetPolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            policy,
        }
    }

    /// Rebuild a store from persisted entries. Under `Exclusive`, later
    /// entries pointing at an already used external field are dropped.
    pub fn from_entries(entries: IndexMap<String, String>, policy: TargetPolicy) -> Self {
        let mut store = Self { entries, policy };
        store.drop_conflicts();
        store
    }

    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }

    pub fn policy(&self) -> TargetPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TargetPolicy) {
        self.policy = policy;
        self.drop_conflicts();
    }

    fn drop_conflicts(&mut self) {
        let exclusive = self.policy == TargetPolicy::Exclusive;
        let mut owners: IndexMap<String, String> = IndexMap::new();
        self.entries.retain(|hr_field, external_field| {
            if hr_field.is_empty() || external_field.is_empty() {
                return false;
            }
            if !exclusive {
                return true;
            }
            if let Some(owner) = owners.get(external_field.as_str()) {
                warn!(
                    hr_field = %hr_field,
                    external_field = %external_field,
                    owner = %owner,
                    "dropping mapping to an external field that is already mapped"
                );
                return false;
            }
            owners.insert(external_field.clone(), hr_field.clone());
            true
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, hr_field: &str) -> Option<&str> {
        self.entries.get(hr_field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Map `hr_field` to `external_field`, replacing any previous target.
    /// An empty target removes the mapping.
    pub fn set_mapping(
        &mut self,
        hr_field: &str,
        external_field: &str,
    ) -> Result<Option<String>, MappingError> {
        if hr_field.is_empty() {
            return Err(MappingError::EmptyId);
        }
        if external_field.is_empty() {
            return Ok(self.remove_mapping(hr_field));
        }
        if self.policy == TargetPolicy::Exclusive {
            if let Some(owner) = self.reverse_lookup(external_field) {
                if owner != hr_field {
                    return Err(MappingError::TargetInUse {
                        target: external_field.to_string(),
                        source_field: owner.to_string(),
                    });
                }
            }
        }
        debug!(hr_field, external_field, "set mapping");
        Ok(self
            .entries
            .insert(hr_field.to_string(), external_field.to_string()))
    }

    pub fn remove_mapping(&mut self, hr_field: &str) -> Option<String> {
        let removed = self.entries.shift_remove(hr_field);
        if removed.is_some() {
            debug!(hr_field, "removed mapping");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_mapped(&self, field_id: &str, role: FieldRole) -> bool {
        match role {
            FieldRole::Source => self.entries.contains_key(field_id),
            FieldRole::Target => self.entries.values().any(|v| v == field_id),
        }
    }

    /// First HR field mapped to `external_field`
    pub fn reverse_lookup(&self, external_field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v.as_str() == external_field)
            .map(|(k, _)| k.as_str())
    }

    /// Map using the displayed orientation of `direction`
    pub fn assign(
        &mut self,
        direction: IntegrationDirection,
        shown_source: &str,
        shown_target: &str,
    ) -> Result<(), MappingError> {
        if direction.is_reversed() {
            if shown_target.is_empty() {
                self.unassign(direction, shown_source);
                return Ok(());
            }
            // an external field feeds one HR field
            if let Some(previous) = self.reverse_lookup(shown_source).map(str::to_string) {
                if previous != shown_target {
                    self.remove_mapping(&previous);
                }
            }
            self.set_mapping(shown_target, shown_source).map(|_| ())
        } else {
            self.set_mapping(shown_source, shown_target).map(|_| ())
        }
    }

    /// Remove the mapping of a displayed source field
    pub fn unassign(&mut self, direction: IntegrationDirection, shown_source: &str) {
        if direction.is_reversed() {
            if let Some(hr_field) = self.reverse_lookup(shown_source).map(str::to_string) {
                self.remove_mapping(&hr_field);
            }
        } else {
            self.remove_mapping(shown_source);
        }
    }

    /// Displayed target of a displayed source field
    pub fn shown_target(&self, direction: IntegrationDirection, shown_source: &str) -> Option<&str> {
        if direction.is_reversed() {
            self.reverse_lookup(shown_source)
        } else {
            self.get(shown_source)
        }
    }

    /// Whether a displayed source field has a mapping
    pub fn is_shown_mapped(&self, direction: IntegrationDirection, shown_source: &str) -> bool {
        let role = if direction.is_reversed() {
            FieldRole::Target
        } else {
            FieldRole::Source
        };
        self.is_mapped(shown_source, role)
    }

    /// Displayed targets still free for a new mapping
    pub fn available_targets<'a>(
        &self,
        direction: IntegrationDirection,
        candidates: &'a [String],
    ) -> Vec<&'a str> {
        let role = if direction.is_reversed() {
            FieldRole::Source
        } else {
            FieldRole::Target
        };
        candidates
            .iter()
            .filter(|id| self.policy == TargetPolicy::Shared || !self.is_mapped(id, role))
            .map(String::as_str)
            .collect()
    }

    pub fn summary(
        &self,
        direction: IntegrationDirection,
        hr_fields: &[String],
        external_fields: &[String],
    ) -> MappingSummary {
        let sources = if direction.is_reversed() {
            external_fields
        } else {
            hr_fields
        };
        let unmapped = sources
            .iter()
            .filter(|id| !self.is_shown_mapped(direction, id))
            .count();
        MappingSummary {
            mapped: self.len(),
            unmapped,
        }
    }
}
