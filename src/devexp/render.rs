//! Review rendering
//!
//! One pure function turns wizard state into everything the review step
//! shows: a configuration summary, the request preview, the external-side
//! preview, the mapping table and code snippets.

use indexmap::IndexMap;
use serde::Serialize;

use super::codegen::{generate_for, Language};
use crate::mapping::MappingSummary;
use crate::request::builder::{generate_external_request, generate_request, RequestDescription};
use crate::schema::{catalog, HttpMethod, Pagination};
use crate::wizard::WizardState;

/// What to include in a render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub languages: Vec<Language>,
    pub reveal_secrets: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            languages: Language::ALL.to_vec(),
            reveal_secrets: false,
        }
    }
}

/// Configuration summary block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSummary {
    pub endpoint: String,
    pub endpoint_name: String,
    pub method: HttpMethod,
    pub direction: String,
    pub selected_fields: usize,
    pub active_filters: usize,
    pub pagination: Pagination,
    pub external_system: Option<String>,
}

/// One mapped pair with display names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingRow {
    pub hr_field: String,
    pub hr_name: String,
    pub external_field: String,
    pub external_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub summary: ConfigSummary,
    /// Display copy; secrets masked unless revealed
    pub request: RequestDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_request: Option<RequestDescription>,
    pub mappings: Vec<MappingRow>,
    pub mapping_summary: MappingSummary,
    pub snippets: IndexMap<String, String>,
    /// Clipboard payload; always unmasked
    #[serde(skip)]
    pub copy_payload: String,
}

pub fn render(state: &WizardState, options: &RenderOptions) -> Rendered {
    let direction = state.effective_direction();
    let request = generate_request(state, options.reveal_secrets);
    let unmasked = generate_request(state, true);

    let external = state.external_system();
    let summary = ConfigSummary {
        endpoint: state.endpoint().to_string(),
        endpoint_name: catalog::display_name(state.endpoint()),
        method: state.method(),
        direction: direction.label().to_string(),
        selected_fields: state.selected_fields().len(),
        active_filters: state.active_filter_count(),
        pagination: state.pagination(),
        external_system: (!external.base_url.trim().is_empty())
            .then(|| format!("{} ({})", external.display_name(), external.full_url())),
    };

    let mappings = state
        .mapping()
        .iter()
        .map(|(hr, ext)| MappingRow {
            hr_field: hr.to_string(),
            hr_name: catalog::field(state.endpoint(), hr)
                .map(|f| f.name)
                .unwrap_or_else(|| catalog::display_name(hr)),
            external_field: ext.to_string(),
            external_name: state
                .external_fields()
                .find(ext)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| ext.to_string()),
        })
        .collect();

    let snippets = options
        .languages
        .iter()
        .map(|lang| (lang.as_str().to_string(), generate_for(*lang, &request)))
        .collect();

    Rendered {
        summary,
        request,
        external_request: generate_external_request(
            external,
            state.mapping(),
            options.reveal_secrets,
        ),
        mappings,
        mapping_summary: state.mapping_summary(),
        snippets,
        copy_payload: unmasked.to_pretty_json(),
    }
}
