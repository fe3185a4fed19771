//! Advisory value rules for request body fields
//!
//! These rules are shown next to inputs on the request-details step. They
//! never block a step transition.

use once_cell::sync::Lazy;
use regex::Regex;

static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("Invalid name regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("Invalid phone regex"));

/// Rule set for one field
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static Regex>,
    pub options: &'static [&'static str],
    pub hint: &'static str,
}

fn rule(required: bool, hint: &'static str) -> FieldRule {
    FieldRule {
        required,
        hint,
        ..FieldRule::default()
    }
}

/// Look up the rule for a field; fields without an entry have no constraints
pub fn rule_for(endpoint_id: &str, field_id: &str) -> Option<FieldRule> {
    let found = match (endpoint_id, field_id) {
        ("employees", "first_name") | ("employees", "last_name") => FieldRule {
            min_length: Some(2),
            max_length: Some(50),
            pattern: Some(&*PERSON_NAME_RE),
            ..rule(true, "Name of the employee")
        },
        ("employees", "email") => FieldRule {
            pattern: Some(&*EMAIL_RE),
            ..rule(true, "Email address must be valid and unique in the system")
        },
        ("employees", "hire_date") => rule(true, "The date employee was hired (YYYY-MM-DD)"),
        ("employees", "position") => FieldRule {
            max_length: Some(100),
            ..rule(false, "Employee's job title")
        },
        ("employees", "status") => FieldRule {
            options: &["active", "inactive", "on_leave", "terminated"],
            ..rule(false, "Current employment status")
        },
        ("employees", "phone") => FieldRule {
            pattern: Some(&*PHONE_RE),
            ..rule(false, "Employee's phone number")
        },
        ("attendance", "employee_id") => {
            rule(true, "ID of the employee this attendance record belongs to")
        }
        ("attendance", "date") => rule(true, "Date of attendance (YYYY-MM-DD)"),
        ("attendance", "check_in") => rule(true, "Check-in time (HH:MM:SS)"),
        ("attendance", "check_out") => rule(false, "Check-out time (HH:MM:SS)"),
        ("attendance", "status") => FieldRule {
            options: &["present", "absent", "late", "early_departure"],
            ..rule(false, "Attendance status")
        },
        ("leaves", "employee_id") => rule(true, "ID of the employee requesting leave"),
        ("leaves", "start_date") => rule(true, "Start date of leave (YYYY-MM-DD)"),
        ("leaves", "end_date") => rule(true, "End date of leave (YYYY-MM-DD)"),
        ("leaves", "leave_type") => rule(true, "Type of leave (annual, sick, ...)"),
        ("leaves", "reason") => FieldRule {
            max_length: Some(500),
            ..rule(false, "Reason for the leave request")
        },
        ("documents", "employee_id") => rule(true, "ID of the employee this document belongs to"),
        ("documents", "title") => FieldRule {
            max_length: Some(100),
            ..rule(true, "Title of the document")
        },
        ("documents", "type") => FieldRule {
            options: &["contract", "id", "resume", "certificate", "other"],
            ..rule(true, "Type of document")
        },
        ("documents", "expiry_date") => {
            rule(false, "Expiration date of the document (YYYY-MM-DD)")
        }
        _ => return None,
    };
    Some(found)
}

/// Return the first failing rule message for a value, or None when it passes
pub fn validate_value(endpoint_id: &str, field_id: &str, value: &str) -> Option<String> {
    let rule = rule_for(endpoint_id, field_id)?;

    if value.is_empty() {
        return rule.required.then(|| "This field is required".to_string());
    }

    let len = value.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Some(format!("Minimum length is {} characters", min));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Some(format!("Maximum length is {} characters", max));
        }
    }
    if let Some(re) = rule.pattern {
        if !re.is_match(value) {
            return Some("Invalid format".to_string());
        }
    }
    if !rule.options.is_empty() && !rule.options.contains(&value) {
        return Some(format!("Must be one of: {}", rule.options.join(", ")));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty_value() {
        assert_eq!(
            validate_value("employees", "email", ""),
            Some("This field is required".to_string())
        );
        assert_eq!(validate_value("employees", "phone", ""), None);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            validate_value("employees", "first_name", "J"),
            Some("Minimum length is 2 characters".to_string())
        );
        let long = "a".repeat(101);
        assert_eq!(
            validate_value("documents", "title", &long),
            Some("Maximum length is 100 characters".to_string())
        );
    }

    #[test]
    fn test_patterns() {
        assert_eq!(validate_value("employees", "email", "john.doe@example.com"), None);
        assert_eq!(
            validate_value("employees", "email", "not-an-email"),
            Some("Invalid format".to_string())
        );
        assert_eq!(validate_value("employees", "phone", "+1 (555) 123-4567"), None);
        assert_eq!(
            validate_value("employees", "first_name", "J0hn"),
            Some("Invalid format".to_string())
        );
    }

    #[test]
    fn test_options() {
        assert_eq!(validate_value("attendance", "status", "late"), None);
        assert_eq!(
            validate_value("documents", "type", "memo"),
            Some("Must be one of: contract, id, resume, certificate, other".to_string())
        );
    }

    #[test]
    fn test_unknown_field_has_no_rule() {
        assert!(rule_for("payroll", "bonus").is_none());
        assert_eq!(validate_value("payroll", "bonus", ""), None);
    }
}
