//! CLI surface tests: catalog listings, argument errors, completions
mod common;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;

use common::{hrbridge, hrbridge_with_env, ExitStatus, MockEnvironment};

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_endpoints_lists_catalog() {
    let r = hrbridge(&["endpoints"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    for id in ["employees", "attendance", "payroll", "company_announcements"] {
        assert!(r.contains(id), "missing {}", id);
    }
}

#[test]
fn test_fields_search() {
    let r = hrbridge(&["fields", "employees", "--search", "email"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.contains("email"));
    assert!(!r.contains("hire_date"));
}

#[test]
fn test_fields_category_is_case_insensitive() {
    let r = hrbridge(&["fields", "employees", "--category", "contact"]);
    assert!(r.contains("phone"));
    assert!(!r.contains("first_name"));
}

#[test]
fn test_fields_csv_header() {
    let r = hrbridge(&["fields", "departments", "--csv"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.stdout.starts_with("id,name,type,category,description,required"));
}

#[test]
fn test_filters_show_options() {
    let r = hrbridge(&["filters", "employees"]);
    assert!(r.contains("active | inactive | on_leave | terminated"));
}

#[test]
fn test_unknown_endpoint_fails() {
    let r = hrbridge(&["fields", "salaries"]);
    assert_eq!(r.exit_status, ExitStatus::Error);
    assert!(r.stderr.contains("unknown endpoint 'salaries'"));
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_help_exits_zero() {
    let env = MockEnvironment::new();
    AssertCommand::from_std(env.command())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wizard"));
}

#[test]
fn test_missing_subcommand_fails() {
    let env = MockEnvironment::new();
    AssertCommand::from_std(env.command()).assert().code(1);
}

#[test]
fn test_discover_requires_connection() {
    let env = MockEnvironment::new();
    AssertCommand::from_std(env.command())
        .args(["test", "1", "--discover"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--connection"));
}

#[test]
fn test_unknown_language_rejected() {
    let env = MockEnvironment::new();
    AssertCommand::from_std(env.command())
        .args(["render", "1", "-l", "cobol"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown language 'cobol'"));
}

#[test]
fn test_wizard_needs_terminal() {
    let r = hrbridge(&["wizard"]);
    assert_eq!(r.exit_status, ExitStatus::Error);
    assert!(r.stderr.contains("interactive terminal"));
}

#[test]
fn test_completions() {
    let r = hrbridge(&["completions", "bash"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.contains("hrbridge"));
}

// ============================================================================
// Config file
// ============================================================================

#[test]
fn test_config_default_options_apply() {
    let env = MockEnvironment::new();
    env.write_config(
        r#"
[defaults]
options = ["--api-key", "from-config-defaults"]
"#,
    );
    let r = hrbridge_with_env(&["render", "1", "--json", "--show-secrets"], &env);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert_eq!(r.json()["request"]["headers"]["key"], "from-config-defaults");
}

#[test]
fn test_broken_config_is_ignored() {
    let env = MockEnvironment::new();
    env.write_config("this is [not toml");
    let r = hrbridge_with_env(&["endpoints"], &env);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.stderr.contains("ignoring config file"));
}

#[test]
fn test_verbose_json_logs() {
    let mut env = MockEnvironment::new();
    env.set_env("HRBRIDGE_API_KEY", "ABCDEFGHIJKLMNOPQRST");
    let r = hrbridge_with_env(
        &["--verbose", "--log-format", "json", "test", "1", "--seed", "1", "--delay-ms", "0"],
        &env,
    );
    let first = r.stderr.lines().next().expect("no log lines");
    let line: serde_json::Value = serde_json::from_str(first).expect("log line is not JSON");
    assert!(line.get("level").is_some());
}
