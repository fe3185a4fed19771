//! Saved configuration snapshots

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::external::{ExternalAuth, ExternalFields, ExternalSystem};
use crate::request::mask::SecretString;
use crate::schema::{catalog, FieldDescriptor, FieldType, HttpMethod, Pagination};
use crate::wizard::IntegrationDirection;

/// A named snapshot of the whole wizard state.
///
/// Every field except `id` and `name` is optional on disk so partial or
/// older files still load; missing values take the same defaults a fresh
/// session would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub id: String,
    pub name: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub method: HttpMethod,

    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub filters: IndexMap<String, String>,

    #[serde(default)]
    pub pagination: Pagination,

    #[serde(default, alias = "fieldValues")]
    pub field_values: IndexMap<String, String>,

    #[serde(default, alias = "integrationDirection")]
    pub direction: IntegrationDirection,

    #[serde(default, alias = "externalSystem")]
    pub external_system: ExternalSystem,

    #[serde(default, alias = "externalSystemFields")]
    pub external_fields: ExternalFields,

    /// HR field id to external field id
    #[serde(default, alias = "mappedFields")]
    pub mappings: IndexMap<String, String>,

    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

fn default_endpoint() -> String {
    catalog::DEFAULT_ENDPOINT.to_string()
}

impl SavedConfiguration {
    /// One-line description for listings
    pub fn describe(&self) -> String {
        format!(
            "{} {} - {} fields, {} mapped",
            self.method,
            catalog::display_name(&self.endpoint),
            self.fields.len(),
            self.mappings.len()
        )
    }

    /// Matches by exact id or case-insensitive name
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.name.eq_ignore_ascii_case(key.trim())
    }
}

fn pairs(items: &[(&str, &str)]) -> IndexMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three sample configurations a fresh store starts with
pub fn demo_configurations() -> Vec<SavedConfiguration> {
    let created_at = DateTime::<Utc>::from_timestamp(1_686_787_200, 0).unwrap_or_default();

    let applicant_fields = [
        ("applicant_id", "Applicant ID"),
        ("first_name", "First Name"),
        ("last_name", "Last Name"),
        ("email", "Email"),
        ("applied_position", "Applied Position"),
    ]
    .into_iter()
    .map(|(id, name)| FieldDescriptor::new(id, name, FieldType::String))
    .collect();

    vec![
        SavedConfiguration {
            id: "1".to_string(),
            name: "Employee List - Basic Info".to_string(),
            endpoint: "employees".to_string(),
            method: HttpMethod::Get,
            fields: strings(&["id", "first_name", "last_name", "email", "department", "position"]),
            filters: pairs(&[("status", "active")]),
            pagination: Pagination::new(1, 25),
            field_values: IndexMap::new(),
            direction: IntegrationDirection::ZenhrToExternal,
            external_system: ExternalSystem {
                name: "Sample CRM".to_string(),
                base_url: "https://api.samplecrm.com".to_string(),
                endpoint: "/contacts".to_string(),
                method: HttpMethod::Post,
                auth: ExternalAuth::ApiKey {
                    key: "X-API-Key".to_string(),
                    value: SecretString::new("sample_key_123"),
                },
            },
            external_fields: ExternalFields::new(),
            mappings: pairs(&[
                ("first_name", "contact_first_name"),
                ("last_name", "contact_last_name"),
                ("email", "contact_email"),
            ]),
            created_at,
        },
        SavedConfiguration {
            id: "2".to_string(),
            name: "Monthly Attendance Report".to_string(),
            endpoint: "attendance".to_string(),
            method: HttpMethod::Get,
            fields: strings(&["id", "employee_id", "date", "check_in", "check_out", "status"]),
            filters: pairs(&[("date_from", "2023-06-01"), ("date_to", "2023-06-30")]),
            pagination: Pagination::new(1, 50),
            field_values: IndexMap::new(),
            direction: IntegrationDirection::ZenhrToExternal,
            external_system: ExternalSystem {
                name: "Payroll System".to_string(),
                base_url: "https://payroll-api.example.com".to_string(),
                endpoint: "/attendance-records".to_string(),
                method: HttpMethod::Post,
                auth: ExternalAuth::Bearer {
                    token: SecretString::new("sample_token_xyz"),
                },
            },
            external_fields: ExternalFields::new(),
            mappings: pairs(&[
                ("employee_id", "emp_id"),
                ("date", "attendance_date"),
                ("check_in", "time_in"),
                ("check_out", "time_out"),
            ]),
            created_at,
        },
        SavedConfiguration {
            id: "3".to_string(),
            name: "Applicant Import".to_string(),
            endpoint: "employees".to_string(),
            method: HttpMethod::Post,
            fields: strings(&["department", "position", "salary", "phone", "address"]),
            filters: IndexMap::new(),
            pagination: Pagination::default(),
            field_values: pairs(&[
                ("first_name", "New"),
                ("last_name", "Employee"),
                ("email", "new.employee@example.com"),
                ("hire_date", "2023-06-15"),
                ("department", "IT"),
                ("position", "Developer"),
                ("salary", "5000"),
            ]),
            direction: IntegrationDirection::ExternalToZenhr,
            external_system: ExternalSystem {
                name: "Recruiting Platform".to_string(),
                base_url: "https://recruiting.example.com".to_string(),
                endpoint: "/api/applicants".to_string(),
                method: HttpMethod::Get,
                auth: ExternalAuth::Basic {
                    username: "apiuser".to_string(),
                    password: SecretString::new("apisecret"),
                },
            },
            external_fields: ExternalFields::from_vec(applicant_fields),
            mappings: pairs(&[
                ("first_name", "first_name"),
                ("last_name", "last_name"),
                ("email", "email"),
                ("position", "applied_position"),
            ]),
            created_at,
        },
    ]
}
