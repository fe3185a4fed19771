//! Request description builder
//!
//! Derives the canonical `{method, url, headers, body}` description from
//! wizard state. Pure: identical state yields identical output.

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::external::ExternalSystem;
use crate::mapping::MappingStore;
use crate::schema::HttpMethod;
use crate::wizard::WizardState;

/// Placeholder used wherever no API key is available or secrets must not leak
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

/// Header carrying the HR API key
pub const API_KEY_HEADER: &str = "key";

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A request ready for display or snippet generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescription {
    pub method: HttpMethod,
    pub url: String,
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl RequestDescription {
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn pretty_body(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| serde_json::to_string_pretty(b).unwrap_or_default())
    }
}

/// Percent-encode a query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Describe the HR API request. The key is masked unless `reveal`.
pub fn generate_request(state: &WizardState, reveal: bool) -> RequestDescription {
    let base = state.base_url().trim_end_matches('/');
    let resource = if state.endpoint().is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, state.endpoint())
    };

    let api_key = state.api_key();
    let key_value = if api_key.is_empty() {
        API_KEY_PLACEHOLDER.to_string()
    } else if reveal {
        api_key.expose().to_string()
    } else {
        api_key.masked()
    };

    let mut headers = IndexMap::new();
    headers.insert(API_KEY_HEADER.to_string(), key_value);
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let method = state.method();
    let values = state.field_values();
    let (url, body) = match method {
        HttpMethod::Get => (with_query(&resource, &query_pairs(state)), None),
        HttpMethod::Post | HttpMethod::Patch => (resource, Some(body_from(values, None))),
        HttpMethod::Put => {
            let id = non_empty(values.get("id"));
            (
                format!("{}/{}", resource, id.unwrap_or(":id")),
                Some(body_from(values, id)),
            )
        }
        HttpMethod::Delete => {
            let id = non_empty(values.get("id"));
            (format!("{}/{}", resource, id.unwrap_or(":id")), None)
        }
    };

    RequestDescription {
        method,
        url,
        headers,
        body,
    }
}

/// Query parameters of a read request: fields, non-empty filters, pagination
pub fn query_pairs(state: &WizardState) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if !state.selected_fields().is_empty() {
        pairs.push(("fields".to_string(), state.selected_fields().join(",")));
    }
    for (key, value) in state.filters() {
        if !value.trim().is_empty() {
            pairs.push((key.clone(), encode_component(value)));
        }
    }
    let pagination = state.pagination();
    pairs.push(("page".to_string(), pagination.page.to_string()));
    pairs.push(("per_page".to_string(), pagination.per_page.to_string()));
    pairs
}

fn with_query(url: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", url, query.join("&"))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// JSON body of the non-empty field values; `id` leads when given
fn body_from(values: &IndexMap<String, String>, id: Option<&str>) -> JsonValue {
    let mut body = Map::new();
    if let Some(id) = id {
        body.insert("id".to_string(), JsonValue::String(id.to_string()));
    }
    for (key, value) in values {
        if key == "id" && id.is_some() {
            continue;
        }
        if !value.trim().is_empty() {
            body.insert(key.clone(), JsonValue::String(value.clone()));
        }
    }
    JsonValue::Object(body)
}

/// Describe the call against the external system, with a `{{hr_field}}`
/// placeholder for each mapped external field. None without a base URL.
pub fn generate_external_request(
    system: &ExternalSystem,
    mapping: &MappingStore,
    reveal: bool,
) -> Option<RequestDescription> {
    if system.base_url.trim().is_empty() {
        return None;
    }

    let mut headers = IndexMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    for (name, value) in system.auth.headers(reveal) {
        headers.insert(name, value);
    }

    let body = system.method.has_body().then(|| {
        let mut template = Map::new();
        for (hr_field, external_field) in mapping.iter() {
            template.insert(
                external_field.to_string(),
                JsonValue::String(format!("{{{{{}}}}}", hr_field)),
            );
        }
        JsonValue::Object(template)
    });

    Some(RequestDescription {
        method: system.method,
        url: system.full_url(),
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ExternalAuth;
    use crate::request::mask::SecretString;
    use crate::wizard::IntegrationDirection;

    #[test]
    fn test_get_request_url() {
        let mut state = WizardState::new();
        state.set_filter("department", "R&D Team");
        state.set_filter("status", "");
        let request = generate_request(&state, false);
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://api.zenhr.com/api/v2/employees?fields=id,first_name,last_name\
             &department=R%26D%20Team&page=1&per_page=10"
        );
        assert_eq!(request.headers["key"], "YOUR_API_KEY");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_key_masked_unless_revealed() {
        let state = WizardState::new().with_api_key("ABCDEFGHIJKLMNOPQRST");
        assert_eq!(generate_request(&state, false).headers["key"], "ABCD...QRST");
        assert_eq!(generate_request(&state, true).headers["key"], "ABCDEFGHIJKLMNOPQRST");
        assert_eq!(state.api_key().expose(), "ABCDEFGHIJKLMNOPQRST");
    }

    #[test]
    fn test_post_body_has_only_non_empty_values() {
        let mut state = WizardState::new();
        state.set_method(HttpMethod::Post);
        state.set_field_value("phone", "");
        state.set_field_value("department", "IT");
        let request = generate_request(&state, false);
        assert_eq!(request.url, "https://api.zenhr.com/api/v2/employees");
        let body = request.body.unwrap();
        assert_eq!(body["first_name"], "John");
        assert_eq!(body["department"], "IT");
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn test_put_uses_id_segment() {
        let mut state = WizardState::new();
        state.set_method(HttpMethod::Put);
        assert!(generate_request(&state, false).url.ends_with("/employees/:id"));
        state.set_field_value("email", "a@b.co");
        state.set_field_value("id", "42");
        let request = generate_request(&state, false);
        assert!(request.url.ends_with("/employees/42"));
        let body = request.body.unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "email"]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut state = WizardState::new();
        state.set_filter("status", "active");
        assert_eq!(generate_request(&state, true), generate_request(&state, true));
    }

    #[test]
    fn test_external_request_template() {
        let mut state = WizardState::new();
        state.set_direction(IntegrationDirection::ZenhrToExternal);
        assert!(generate_external_request(state.external_system(), state.mapping(), false).is_none());

        let system = state.external_system_mut();
        system.base_url = "https://api.samplecrm.com".to_string();
        system.endpoint = "/contacts".to_string();
        system.method = HttpMethod::Post;
        system.auth = ExternalAuth::Bearer { token: SecretString::new("sample_token_xyz") };
        state.mapping_mut().set_mapping("email", "contact_email").unwrap();

        let request =
            generate_external_request(state.external_system(), state.mapping(), false).unwrap();
        assert_eq!(request.url, "https://api.samplecrm.com/contacts");
        assert_eq!(request.headers["Authorization"], "Bearer samp..._xyz");
        assert_eq!(request.body.unwrap()["contact_email"], "{{email}}");
    }
}
