//! The wizard's owned session state
//!
//! Every form of the wizard reads and mutates this one struct; there is no
//! ambient global state. Endpoint and method changes recompute the field
//! sets from the catalog, while direction changes only re-clamp the current
//! step and never discard entered data.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::direction::IntegrationDirection;
use super::gates::{self, ValidationError};
use super::steps::{self, StepId};
use crate::external::{ExternalFields, ExternalSystem};
use crate::mapping::{MappingStore, MappingSummary, TargetPolicy};
use crate::request::mask::SecretString;
use crate::schema::catalog;
use crate::schema::{FieldDescriptor, HttpMethod, Pagination};
use crate::sessions::SavedConfiguration;

/// Number of fields pre-selected for a fresh read request
const DEFAULT_SELECTION: usize = 3;

#[derive(Debug, Clone)]
pub struct WizardState {
    current_step: StepId,
    direction: Option<IntegrationDirection>,
    api_key: SecretString,
    base_url: String,
    endpoint: String,
    method: HttpMethod,
    available_fields: Vec<FieldDescriptor>,
    selected_fields: Vec<String>,
    required_fields: Vec<String>,
    optional_fields: Vec<String>,
    filters: IndexMap<String, String>,
    pagination: Pagination,
    field_values: IndexMap<String, String>,
    external_system: ExternalSystem,
    external_fields: ExternalFields,
    mapping: MappingStore,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Fresh session on the direction step with the default endpoint selected
    pub fn new() -> Self {
        let mut state = Self {
            current_step: StepId::Direction,
            direction: None,
            api_key: SecretString::default(),
            base_url: catalog::DEFAULT_BASE_URL.to_string(),
            endpoint: catalog::DEFAULT_ENDPOINT.to_string(),
            method: HttpMethod::Get,
            available_fields: Vec::new(),
            selected_fields: Vec::new(),
            required_fields: Vec::new(),
            optional_fields: Vec::new(),
            filters: IndexMap::new(),
            pagination: Pagination::default(),
            field_values: IndexMap::new(),
            external_system: ExternalSystem::default(),
            external_fields: ExternalFields::new(),
            mapping: MappingStore::default(),
        };
        state.refresh_endpoint_schema();
        state
    }

    pub fn with_policy(mut self, policy: TargetPolicy) -> Self {
        self.mapping.set_policy(policy);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub fn direction(&self) -> Option<IntegrationDirection> {
        self.direction
    }

    /// Direction used for orientation; unset behaves as export
    pub fn effective_direction(&self) -> IntegrationDirection {
        self.direction.unwrap_or(IntegrationDirection::ZenhrToExternal)
    }

    pub fn active_steps(&self) -> &'static [StepId] {
        steps::active_sequence(self.direction)
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn available_fields(&self) -> &[FieldDescriptor] {
        &self.available_fields
    }

    pub fn selected_fields(&self) -> &[String] {
        &self.selected_fields
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn optional_fields(&self) -> &[String] {
        &self.optional_fields
    }

    pub fn filters(&self) -> &IndexMap<String, String> {
        &self.filters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn field_values(&self) -> &IndexMap<String, String> {
        &self.field_values
    }

    pub fn external_system(&self) -> &ExternalSystem {
        &self.external_system
    }

    pub fn external_system_mut(&mut self) -> &mut ExternalSystem {
        &mut self.external_system
    }

    pub fn external_fields(&self) -> &ExternalFields {
        &self.external_fields
    }

    pub fn external_fields_mut(&mut self) -> &mut ExternalFields {
        &mut self.external_fields
    }

    pub fn mapping(&self) -> &MappingStore {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut MappingStore {
        &mut self.mapping
    }

    // ====================================================================
    // Navigation
    // ====================================================================

    /// Choose the direction and re-clamp the current step into its sequence
    pub fn set_direction(&mut self, direction: IntegrationDirection) {
        let old = self.active_steps();
        self.direction = Some(direction);
        let new = self.active_steps();
        let step = steps::reclamp(old, new, self.current_step);
        if step != self.current_step {
            debug!(from = ?self.current_step, to = ?step, "re-clamped step after direction change");
        }
        self.current_step = step;
        info!(direction = %direction, "integration direction set");
    }

    /// Advance after the current step's gate passes
    pub fn next(&mut self) -> Result<StepId, ValidationError> {
        gates::check_leave(self)?;
        let step = steps::next_step(self.active_steps(), self.current_step);
        debug!(from = ?self.current_step, to = ?step, "next step");
        self.current_step = step;
        Ok(step)
    }

    pub fn back(&mut self) -> StepId {
        let step = steps::previous_step(self.active_steps(), self.current_step);
        debug!(from = ?self.current_step, to = ?step, "previous step");
        self.current_step = step;
        step
    }

    /// Jump straight to a step of the active sequence, bypassing gates
    pub fn go_to(&mut self, step: StepId) -> Result<(), ValidationError> {
        if !self.active_steps().contains(&step) {
            return Err(ValidationError::StepUnavailable(step));
        }
        debug!(from = ?self.current_step, to = ?step, "jump to step");
        self.current_step = step;
        Ok(())
    }

    pub fn is_first_step(&self) -> bool {
        steps::is_first(self.active_steps(), self.current_step)
    }

    pub fn is_last_step(&self) -> bool {
        steps::is_last(self.active_steps(), self.current_step)
    }

    /// 1-based position of the current step and the sequence length
    pub fn progress(&self) -> (usize, usize) {
        let steps = self.active_steps();
        (steps::index_of(steps, self.current_step) + 1, steps.len())
    }

    // ====================================================================
    // HR request configuration
    // ====================================================================

    pub fn set_api_key(&mut self, api_key: impl Into<SecretString>) {
        self.api_key = api_key.into();
    }

    /// Select an HR endpoint; an empty id clears the selection
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<(), ValidationError> {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() && !catalog::is_known_endpoint(endpoint) {
            return Err(ValidationError::UnknownEndpoint(endpoint.to_string()));
        }
        self.endpoint = endpoint.to_string();
        self.refresh_endpoint_schema();
        info!(endpoint, "endpoint selected");
        Ok(())
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
        self.refresh_endpoint_schema();
        info!(method = %method, "method selected");
    }

    fn refresh_endpoint_schema(&mut self) {
        if self.endpoint.is_empty() {
            self.available_fields.clear();
            self.required_fields.clear();
            self.optional_fields.clear();
            self.selected_fields.clear();
            self.filters.clear();
            return;
        }

        self.available_fields = catalog::fields(&self.endpoint);
        self.selected_fields = if self.method == HttpMethod::Get {
            self.available_fields
                .iter()
                .take(DEFAULT_SELECTION)
                .map(|f| f.id.clone())
                .collect()
        } else {
            Vec::new()
        };
        self.filters.clear();
        self.required_fields = catalog::required_fields(&self.endpoint);
        self.optional_fields = catalog::optional_fields(&self.endpoint);

        if self.method == HttpMethod::Post {
            self.field_values = self
                .required_fields
                .iter()
                .map(|id| (id.clone(), catalog::sample_value(id).to_string()))
                .collect();
        }
    }

    pub fn toggle_field(&mut self, field_id: &str) {
        if let Some(pos) = self.selected_fields.iter().position(|f| f == field_id) {
            self.selected_fields.remove(pos);
        } else {
            self.selected_fields.push(field_id.to_string());
        }
    }

    /// Read requests select every field; writes select the optional set
    pub fn select_all_fields(&mut self) {
        self.selected_fields = if self.method == HttpMethod::Get {
            self.available_fields.iter().map(|f| f.id.clone()).collect()
        } else {
            self.optional_fields.clone()
        };
    }

    /// Read requests clear the selection; writes drop only optional fields
    pub fn deselect_all_fields(&mut self) {
        if self.method == HttpMethod::Get {
            self.selected_fields.clear();
        } else {
            let optional = &self.optional_fields;
            self.selected_fields.retain(|f| !optional.contains(f));
        }
    }

    pub fn is_field_selected(&self, field_id: &str) -> bool {
        self.selected_fields.iter().any(|f| f == field_id)
    }

    /// Required fields only apply to body-carrying requests
    pub fn is_field_required(&self, field_id: &str) -> bool {
        self.method != HttpMethod::Get && self.required_fields.iter().any(|f| f == field_id)
    }

    pub fn set_filter(&mut self, filter_id: &str, value: &str) {
        self.filters.insert(filter_id.to_string(), value.to_string());
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.values().filter(|v| !v.trim().is_empty()).count()
    }

    pub fn set_pagination(&mut self, page: u32, per_page: u32) {
        self.pagination = Pagination::new(page, per_page);
    }

    pub fn set_field_value(&mut self, field_id: &str, value: &str) {
        self.field_values
            .insert(field_id.to_string(), value.to_string());
    }

    // ====================================================================
    // External side and mapping
    // ====================================================================

    /// Replace the external field list with fields found by a connection test
    pub fn apply_discovered_fields(&mut self, fields: Vec<FieldDescriptor>) {
        info!(count = fields.len(), "external fields discovered");
        self.external_fields.replace_all(fields);
    }

    pub fn mapping_summary(&self) -> MappingSummary {
        self.mapping.summary(
            self.effective_direction(),
            &self.selected_fields,
            &self.external_fields.ids(),
        )
    }

    // ====================================================================
    // Saved configurations
    // ====================================================================

    /// Capture the live state under `name`
    pub fn snapshot(&self, name: &str) -> Result<SavedConfiguration, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::ConfigNameRequired);
        }
        Ok(SavedConfiguration {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            endpoint: self.endpoint.clone(),
            method: self.method,
            fields: self.selected_fields.clone(),
            filters: self.filters.clone(),
            pagination: self.pagination,
            field_values: self.field_values.clone(),
            direction: self.effective_direction(),
            external_system: self.external_system.clone(),
            external_fields: self.external_fields.clone(),
            mappings: self.mapping.entries().clone(),
            created_at: chrono::Utc::now(),
        })
    }

    /// Overwrite all live state from a saved configuration and return to the first step
    pub fn apply(&mut self, saved: &SavedConfiguration) {
        self.endpoint = saved.endpoint.clone();
        self.method = saved.method;
        self.available_fields = catalog::fields(&self.endpoint);
        self.required_fields = catalog::required_fields(&self.endpoint);
        self.optional_fields = catalog::optional_fields(&self.endpoint);
        self.selected_fields = saved.fields.clone();
        self.filters = saved.filters.clone();
        self.pagination = Pagination::new(saved.pagination.page, saved.pagination.per_page);
        self.field_values = saved.field_values.clone();
        self.direction = Some(saved.direction);
        self.external_system = saved.external_system.clone();
        self.external_fields = saved.external_fields.clone();
        self.mapping = MappingStore::from_entries(saved.mappings.clone(), self.mapping.policy());
        self.current_step = StepId::Direction;
        info!(id = %saved.id, name = %saved.name, "configuration loaded");
    }
}
