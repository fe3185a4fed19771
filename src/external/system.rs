//! External system descriptor
//!
//! Authentication is a sum type: switching the kind replaces the whole
//! variant, so fields of the previous kind never linger.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::request::mask::{mask_secret, SecretString};
use crate::schema::HttpMethod;

/// Authentication of the external API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExternalAuth {
    #[default]
    None,
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: SecretString,
    },
    Bearer {
        #[serde(default)]
        token: SecretString,
    },
    ApiKey {
        #[serde(default)]
        key: String,
        #[serde(default)]
        value: SecretString,
    },
}

/// Discriminant of [`ExternalAuth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    None,
    Basic,
    Bearer,
    ApiKey,
}

impl AuthKind {
    pub const ALL: [AuthKind; 4] = [AuthKind::None, AuthKind::Basic, AuthKind::Bearer, AuthKind::ApiKey];

    pub fn label(&self) -> &'static str {
        match self {
            AuthKind::None => "No Authentication",
            AuthKind::Basic => "Basic Auth",
            AuthKind::Bearer => "Bearer Token",
            AuthKind::ApiKey => "API Key",
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthKind::None => "none",
            AuthKind::Basic => "basic",
            AuthKind::Bearer => "bearer",
            AuthKind::ApiKey => "api_key",
        };
        f.write_str(s)
    }
}

impl FromStr for AuthKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "none" | "" => Ok(AuthKind::None),
            "basic" => Ok(AuthKind::Basic),
            "bearer" | "token" => Ok(AuthKind::Bearer),
            "api_key" | "apikey" => Ok(AuthKind::ApiKey),
            other => Err(format!("unknown auth type '{}'", other)),
        }
    }
}

impl ExternalAuth {
    /// Fresh variant of the given kind with every field empty
    pub fn empty(kind: AuthKind) -> Self {
        match kind {
            AuthKind::None => ExternalAuth::None,
            AuthKind::Basic => ExternalAuth::Basic {
                username: String::new(),
                password: SecretString::default(),
            },
            AuthKind::Bearer => ExternalAuth::Bearer {
                token: SecretString::default(),
            },
            AuthKind::ApiKey => ExternalAuth::ApiKey {
                key: String::new(),
                value: SecretString::default(),
            },
        }
    }

    pub fn kind(&self) -> AuthKind {
        match self {
            ExternalAuth::None => AuthKind::None,
            ExternalAuth::Basic { .. } => AuthKind::Basic,
            ExternalAuth::Bearer { .. } => AuthKind::Bearer,
            ExternalAuth::ApiKey { .. } => AuthKind::ApiKey,
        }
    }

    /// Whether every credential of the variant is present
    pub fn is_complete(&self) -> bool {
        match self {
            ExternalAuth::None => true,
            ExternalAuth::Basic { username, password } => {
                !username.trim().is_empty() && !password.is_empty()
            }
            ExternalAuth::Bearer { token } => !token.is_empty(),
            ExternalAuth::ApiKey { key, value } => !key.trim().is_empty() && !value.is_empty(),
        }
    }

    /// Request headers carrying the credentials; secrets are masked unless `reveal`
    pub fn headers(&self, reveal: bool) -> Vec<(String, String)> {
        let shown = |s: &str| if reveal { s.to_string() } else { mask_secret(s) };
        match self {
            ExternalAuth::None => Vec::new(),
            ExternalAuth::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password.expose());
                let encoded =
                    base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
                vec![("Authorization".to_string(), format!("Basic {}", shown(&encoded)))]
            }
            ExternalAuth::Bearer { token } => {
                vec![("Authorization".to_string(), format!("Bearer {}", shown(token.expose())))]
            }
            ExternalAuth::ApiKey { key, value } if !key.is_empty() => {
                vec![(key.clone(), shown(value.expose()))]
            }
            ExternalAuth::ApiKey { .. } => Vec::new(),
        }
    }

    /// Copy with every secret replaced by its masked form
    pub fn redacted(&self) -> Self {
        let mask = |s: &SecretString| SecretString::new(s.masked());
        match self {
            ExternalAuth::None => ExternalAuth::None,
            ExternalAuth::Basic { username, password } => ExternalAuth::Basic {
                username: username.clone(),
                password: mask(password),
            },
            ExternalAuth::Bearer { token } => ExternalAuth::Bearer { token: mask(token) },
            ExternalAuth::ApiKey { key, value } => ExternalAuth::ApiKey {
                key: key.clone(),
                value: mask(value),
            },
        }
    }
}

/// The non-HR side of an integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSystem {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "baseUrl")]
    pub base_url: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub auth: ExternalAuth,
}

impl Default for ExternalSystem {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_url: String::new(),
            endpoint: String::new(),
            method: HttpMethod::Get,
            auth: ExternalAuth::None,
        }
    }
}

impl ExternalSystem {
    /// Base URL and endpoint path joined with exactly one `/`
    pub fn full_url(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.endpoint.trim().trim_start_matches('/');
        match (base.is_empty(), path.is_empty()) {
            (true, _) => String::new(),
            (false, true) => base.to_string(),
            (false, false) => format!("{}/{}", base, path),
        }
    }

    /// Base URL and endpoint path are both set
    pub fn has_api_details(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.endpoint.trim().is_empty()
    }

    /// Ready for a connection test
    pub fn is_ready(&self) -> bool {
        self.has_api_details() && self.auth.is_complete()
    }

    /// Replace the auth variant wholesale with an empty one of `kind`
    pub fn set_auth_kind(&mut self, kind: AuthKind) {
        if self.auth.kind() != kind {
            self.auth = ExternalAuth::empty(kind);
        }
    }

    /// Name for display, falling back to a generic label
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "External System"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> ExternalSystem {
        ExternalSystem {
            name: "Sample CRM".to_string(),
            base_url: "https://api.samplecrm.com/".to_string(),
            endpoint: "/contacts".to_string(),
            method: HttpMethod::Post,
            auth: ExternalAuth::None,
        }
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let auth = ExternalAuth::ApiKey {
            key: "X-API-Key".to_string(),
            value: SecretString::new("sample_key_123"),
        };
        assert_eq!(
            auth.redacted(),
            ExternalAuth::ApiKey {
                key: "X-API-Key".to_string(),
                value: SecretString::new("samp..._123"),
            }
        );
    }

    #[test]
    fn test_full_url_single_slash() {
        assert_eq!(system().full_url(), "https://api.samplecrm.com/contacts");
        let mut s = system();
        s.endpoint = "contacts".to_string();
        s.base_url = "https://api.samplecrm.com".to_string();
        assert_eq!(s.full_url(), "https://api.samplecrm.com/contacts");
    }

    #[test]
    fn test_set_auth_kind_resets_fields() {
        let mut s = system();
        s.auth = ExternalAuth::Basic {
            username: "apiuser".to_string(),
            password: SecretString::new("apisecret"),
        };
        s.set_auth_kind(AuthKind::Bearer);
        assert_eq!(s.auth, ExternalAuth::Bearer { token: SecretString::default() });
        s.set_auth_kind(AuthKind::Basic);
        assert_eq!(
            s.auth,
            ExternalAuth::Basic {
                username: String::new(),
                password: SecretString::default()
            }
        );
    }

    #[test]
    fn test_is_ready_requires_credentials() {
        let mut s = system();
        assert!(s.is_ready());
        s.set_auth_kind(AuthKind::ApiKey);
        assert!(!s.is_ready());
        s.auth = ExternalAuth::ApiKey {
            key: "X-API-Key".to_string(),
            value: SecretString::new("sample_key_123"),
        };
        assert!(s.is_ready());
        s.endpoint.clear();
        assert!(!s.is_ready());
    }

    #[test]
    fn test_auth_headers() {
        let basic = ExternalAuth::Basic {
            username: "apiuser".to_string(),
            password: SecretString::new("apisecret"),
        };
        assert_eq!(
            basic.headers(true),
            vec![("Authorization".to_string(), "Basic YXBpdXNlcjphcGlzZWNyZXQ=".to_string())]
        );
        let bearer = ExternalAuth::Bearer { token: SecretString::new("sample_token_xyz") };
        assert_eq!(bearer.headers(false)[0].1, "Bearer samp..._xyz");
        let key = ExternalAuth::ApiKey {
            key: "X-API-Key".to_string(),
            value: SecretString::new("sample_key_123"),
        };
        assert_eq!(key.headers(true), vec![("X-API-Key".to_string(), "sample_key_123".to_string())]);
    }

    #[test]
    fn test_deserialize_tagged_auth() {
        let json = r#"{"name":"Sample CRM","baseUrl":"https://api.samplecrm.com","endpoint":"/contacts",
            "method":"POST","auth":{"type":"api_key","key":"X-API-Key","value":"sample_key_123"}}"#;
        let s: ExternalSystem = serde_json::from_str(json).unwrap();
        assert_eq!(s.base_url, "https://api.samplecrm.com");
        assert_eq!(s.auth.kind(), AuthKind::ApiKey);

        let none: ExternalAuth =
            serde_json::from_str(r#"{"type":"none","username":"","token":""}"#).unwrap();
        assert_eq!(none, ExternalAuth::None);
    }
}
