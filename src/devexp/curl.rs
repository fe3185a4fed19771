//! Curl command generation
//!
//! Converts a request description into an equivalent curl command for
//! sharing and debugging.

use crate::request::builder::RequestDescription;

/// Generate an equivalent curl command from the request
pub fn generate_curl_command(request: &RequestDescription) -> String {
    let mut lines: Vec<String> = vec![format!(
        "curl -X {} {}",
        request.method,
        shell_escape(&request.url)
    )];

    for (name, value) in &request.headers {
        lines.push(format!("-H {}", shell_escape(&format!("{}: {}", name, value))));
    }

    if let Some(ref body) = request.body {
        let compact = serde_json::to_string(body).unwrap_or_default();
        lines.push(format!("-d {}", shell_escape(&compact)));
    }

    let mut cmd = String::from("# cURL Command\n");
    cmd.push_str(&lines.join(" \\\n  "));
    cmd.push('\n');
    cmd
}

/// Shell-escape a string for safe inclusion in a command
fn shell_escape(s: &str) -> String {
    let needs_escaping = s.chars().any(|c| {
        matches!(c, ' ' | '\'' | '"' | '\\' | '$' | '`' | '!' | '*' | '?' |
                    '[' | ']' | '{' | '}' | '(' | ')' | '<' | '>' | '|' |
                    '&' | ';' | '\n' | '\t')
    });

    if !needs_escaping && !s.is_empty() {
        return s.to_string();
    }

    // Use single quotes and escape any single quotes within
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::HttpMethod;
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("simple"), "simple");
        assert_eq!(shell_escape("has space"), "'has space'");
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_post_command() {
        let mut headers = IndexMap::new();
        headers.insert("key".to_string(), "YOUR_API_KEY".to_string());
        let request = RequestDescription {
            method: HttpMethod::Post,
            url: "https://api.zenhr.com/api/v2/leaves".to_string(),
            headers,
            body: Some(json!({"reason": "Family's wedding"})),
        };
        let cmd = generate_curl_command(&request);
        assert!(cmd.starts_with("# cURL Command\ncurl -X POST https://api.zenhr.com/api/v2/leaves \\\n"));
        assert!(cmd.contains("-H 'key: YOUR_API_KEY'"));
        assert!(cmd.contains(r#"-d '{"reason":"Family'"'"'s wedding"}'"#));
    }
}
