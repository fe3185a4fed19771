//! Review rendering tests through the CLI
mod common;

use std::fs;

use common::{hrbridge_with_env, ExitStatus, MockEnvironment};

const KEY: &str = "ABCDEFGHIJKLMNOPQRST";

fn with_key() -> MockEnvironment {
    let mut env = MockEnvironment::new();
    env.set_env("HRBRIDGE_API_KEY", KEY);
    env
}

#[test]
fn test_review_text_masks_key() {
    let r = hrbridge_with_env(&["render", "1"], &with_key());
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.contains("Configuration Summary"));
    assert!(r.contains("ZenHR Request"));
    assert!(r.contains("ABCD...QRST"));
    assert!(!r.contains(KEY));
    assert!(!r.contains("sample_key_123"));
}

#[test]
fn test_review_url_carries_query() {
    let r = hrbridge_with_env(&["render", "1", "--json"], &with_key());
    let json = r.json();
    assert_eq!(
        json["request"]["url"],
        "https://api.zenhr.com/api/v2/employees?fields=id,first_name,last_name,email,department,position\
         &status=active&page=1&per_page=25"
    );
    assert!(json["request"].get("body").is_none());
}

#[test]
fn test_languages_narrow_snippets() {
    let r = hrbridge_with_env(&["render", "2", "--json", "-l", "python", "-l", "curl"], &with_key());
    let snippets = r.json()["snippets"].as_object().unwrap().clone();
    let langs: Vec<_> = snippets.keys().cloned().collect();
    assert_eq!(langs, vec!["python", "curl"]);
    for code in snippets.values() {
        let code = code.as_str().unwrap();
        assert!(code.contains("YOUR_API_KEY"));
        assert!(!code.contains(KEY));
    }
}

#[test]
fn test_show_secrets_reveals() {
    let r = hrbridge_with_env(&["render", "2", "--json", "--show-secrets"], &with_key());
    let json = r.json();
    assert_eq!(json["request"]["headers"]["key"], KEY);
    assert_eq!(json["external_request"]["headers"]["Authorization"], "Bearer sample_token_xyz");
}

#[test]
fn test_external_template_body() {
    let r = hrbridge_with_env(&["render", "2", "--json"], &with_key());
    let external = &r.json()["external_request"];
    assert_eq!(external["url"], "https://payroll-api.example.com/attendance-records");
    assert_eq!(external["body"]["emp_id"], "{{employee_id}}");
    assert_eq!(external["headers"]["Authorization"], "Bearer samp..._xyz");
}

#[test]
fn test_post_configuration_body() {
    let r = hrbridge_with_env(&["render", "applicant import", "--json"], &with_key());
    let json = r.json();
    assert_eq!(json["request"]["method"], "POST");
    assert_eq!(json["request"]["body"]["email"], "new.employee@example.com");
    assert_eq!(json["summary"]["direction"], "External System to ZenHR");
}

#[test]
fn test_copy_writes_unmasked_request() {
    let env = with_key();
    let target = env.config_path().join("request.json");
    let r = hrbridge_with_env(&["render", "1", "--copy", target.to_str().unwrap()], &env);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.stderr.contains("Copied request to"));

    let copied: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(copied["headers"]["key"], KEY);
    assert_eq!(copied["method"], "GET");
}

#[test]
fn test_render_without_key_uses_placeholder() {
    let env = MockEnvironment::new();
    let r = hrbridge_with_env(&["render", "1", "--json", "--show-secrets"], &env);
    assert_eq!(r.json()["request"]["headers"]["key"], "YOUR_API_KEY");
}

#[test]
fn test_conflicting_mappings_render_once() {
    let env = with_key();
    let path = env.write_file(
        "conflict.json",
        r#"{
            "id": "40",
            "name": "Conflict",
            "endpoint": "employees",
            "method": "GET",
            "integrationDirection": "zenhr_to_external",
            "mappedFields": {"first_name": "ext_name", "last_name": "ext_name"}
        }"#,
    );
    let r = hrbridge_with_env(&["configs", "import", path.to_str().unwrap()], &env);
    assert_eq!(r.exit_status, ExitStatus::Success);

    let r = hrbridge_with_env(&["render", "40", "--json"], &env);
    let json = r.json();
    let rows = json["mappings"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["hr_field"], "first_name");
}
