//! Code snippet generation for various languages
//!
//! Generates equivalent client code in JavaScript, Python, PHP and Ruby.
//! The cURL form lives in [`super::curl`]. Snippets never embed a stored
//! API key; the `key` header always carries the placeholder.

use std::fmt;
use std::str::FromStr;

use super::curl::generate_curl_command;
use crate::request::builder::{RequestDescription, API_KEY_HEADER, API_KEY_PLACEHOLDER};
use crate::schema::HttpMethod;

/// Supported languages for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Python,
    Php,
    Ruby,
    Curl,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::JavaScript,
        Language::Python,
        Language::Php,
        Language::Ruby,
        Language::Curl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Curl => "curl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript - Fetch API",
            Language::Python => "Python - Requests",
            Language::Php => "PHP - cURL",
            Language::Ruby => "Ruby - Net::HTTP",
            Language::Curl => "cURL Command",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "php" => Ok(Language::Php),
            "ruby" | "rb" => Ok(Language::Ruby),
            "curl" | "sh" => Ok(Language::Curl),
            other => Err(format!(
                "Unknown language '{}'. Supported: javascript, python, php, ruby, curl",
                other
            )),
        }
    }
}

/// Generate code snippet for the specified language
pub fn generate_code(language: &str, request: &RequestDescription) -> Result<String, String> {
    let lang = language.parse::<Language>()?;
    Ok(generate_for(lang, request))
}

pub fn generate_for(lang: Language, request: &RequestDescription) -> String {
    let request = &with_placeholder_key(request);
    match lang {
        Language::JavaScript => generate_javascript(request),
        Language::Python => generate_python(request),
        Language::Php => generate_php(request),
        Language::Ruby => generate_ruby(request),
        Language::Curl => generate_curl_command(request),
    }
}

/// Copy of the request whose `key` header is the placeholder
pub fn with_placeholder_key(request: &RequestDescription) -> RequestDescription {
    let mut copy = request.clone();
    if let Some(value) = copy.headers.get_mut(API_KEY_HEADER) {
        *value = API_KEY_PLACEHOLDER.to_string();
    }
    copy
}

/// Generate JavaScript code (using fetch)
fn generate_javascript(request: &RequestDescription) -> String {
    let mut code = String::from("// JavaScript - Fetch API\n");

    code.push_str(&format!("fetch('{}', {{\n", escape_string(&request.url)));
    code.push_str(&format!("  method: '{}',\n", request.method));
    code.push_str("  headers: {\n");
    let lines: Vec<String> = request
        .headers
        .iter()
        .map(|(name, value)| format!("    '{}': '{}'", escape_string(name), escape_string(value)))
        .collect();
    code.push_str(&lines.join(",\n"));
    code.push_str("\n  }");

    if let Some(body) = request.pretty_body() {
        code.push_str(",\n  body: JSON.stringify(");
        code.push_str(&indent(&body, 2));
        code.push(')');
    }

    code.push_str("\n})\n");
    code.push_str(".then(response => response.json())\n");
    code.push_str(".then(data => console.log(data))\n");
    code.push_str(".catch(error => console.error('Error:', error));\n");

    code
}

/// Generate Python code (using requests library)
fn generate_python(request: &RequestDescription) -> String {
    let body = request.pretty_body();

    let mut code = String::from("# Python - Requests\nimport requests\n");
    if body.is_some() {
        code.push_str("import json\n");
    }
    code.push('\n');

    code.push_str(&format!("url = '{}'\n", escape_string(&request.url)));
    code.push_str("headers = {\n");
    let lines: Vec<String> = request
        .headers
        .iter()
        .map(|(name, value)| format!("    '{}': '{}'", escape_string(name), escape_string(value)))
        .collect();
    code.push_str(&lines.join(",\n"));
    code.push_str("\n}\n");

    let method = request.method.as_str().to_lowercase();
    if let Some(ref body_str) = body {
        code.push_str(&format!("payload = {}\n\n", python_literal(body_str)));
        code.push_str(&format!(
            "response = requests.{}(url, headers=headers, data=json.dumps(payload))\n",
            method
        ));
    } else {
        code.push_str(&format!("\nresponse = requests.{}(url, headers=headers)\n", method));
    }

    code.push_str("data = response.json()\n");
    code.push_str("print(data)\n");

    code
}

/// Generate PHP code (using curl extension)
fn generate_php(request: &RequestDescription) -> String {
    let body = request.pretty_body();

    let mut code = String::from("<?php\n// PHP - cURL\n$curl = curl_init();\n\n");

    if let Some(ref body_str) = body {
        code.push_str(&format!("$payload = json_decode('{}', true);\n\n", escape_single(body_str)));
    }

    code.push_str("curl_setopt_array($curl, [\n");
    code.push_str(&format!("  CURLOPT_URL => '{}',\n", escape_single(&request.url)));
    code.push_str("  CURLOPT_RETURNTRANSFER => true,\n");
    match request.method {
        HttpMethod::Get => {}
        HttpMethod::Post => code.push_str("  CURLOPT_POST => true,\n"),
        other => code.push_str(&format!("  CURLOPT_CUSTOMREQUEST => '{}',\n", other)),
    }
    if body.is_some() {
        code.push_str("  CURLOPT_POSTFIELDS => json_encode($payload),\n");
    }

    code.push_str("  CURLOPT_HTTPHEADER => [\n");
    let lines: Vec<String> = request
        .headers
        .iter()
        .map(|(name, value)| format!("    '{}: {}'", escape_single(name), escape_single(value)))
        .collect();
    code.push_str(&lines.join(",\n"));
    code.push_str("\n  ]\n]);\n\n");

    code.push_str("$response = curl_exec($curl);\n");
    code.push_str("curl_close($curl);\n\n");
    code.push_str("$data = json_decode($response, true);\n");
    code.push_str("print_r($data);\n");
    code.push_str("?>\n");

    code
}

/// Generate Ruby code (using Net::HTTP)
fn generate_ruby(request: &RequestDescription) -> String {
    let mut code = String::from("# Ruby - Net::HTTP\n");
    code.push_str("require 'net/http'\n");
    code.push_str("require 'json'\n");
    code.push_str("require 'uri'\n\n");

    code.push_str(&format!("uri = URI('{}')\n", escape_single(&request.url)));

    let method_class = match request.method {
        HttpMethod::Get => "Net::HTTP::Get",
        HttpMethod::Post => "Net::HTTP::Post",
        HttpMethod::Put => "Net::HTTP::Put",
        HttpMethod::Patch => "Net::HTTP::Patch",
        HttpMethod::Delete => "Net::HTTP::Delete",
    };
    code.push_str(&format!("request = {}.new(uri)\n", method_class));

    for (name, value) in &request.headers {
        code.push_str(&format!(
            "request['{}'] = '{}'\n",
            escape_single(name),
            escape_single(value)
        ));
    }

    if let Some(body) = request.pretty_body() {
        code.push_str(&format!("request.body = {}.to_json\n", ruby_literal(&body)));
    }

    code.push_str("\nresponse = Net::HTTP.start(uri.hostname, uri.port, use_ssl: uri.scheme == 'https') do |http|\n");
    code.push_str("  http.request(request)\n");
    code.push_str("end\n\n");
    code.push_str("data = JSON.parse(response.body)\n");
    code.push_str("puts data\n");

    code
}

/// Escape special characters in strings
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Escape for single-quoted PHP/Ruby strings
fn escape_single(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// JSON object text as a Python dict literal
fn python_literal(json: &str) -> String {
    json.replace(": true", ": True")
        .replace(": false", ": False")
        .replace(": null", ": None")
}

/// JSON object text as a Ruby hash literal
fn ruby_literal(json: &str) -> String {
    json.replace("\": ", "\" => ").replace(": null", ": nil")
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .enumerate()
        .map(|(i, line)| if i == 0 { line.to_string() } else { format!("{}{}", pad, line) })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn get_request() -> RequestDescription {
        let mut headers = IndexMap::new();
        headers.insert("key".to_string(), "real_secret_key_123".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        RequestDescription {
            method: HttpMethod::Get,
            url: "https://api.zenhr.com/api/v2/employees?fields=id,email&page=1&per_page=10"
                .to_string(),
            headers,
            body: None,
        }
    }

    fn post_request() -> RequestDescription {
        RequestDescription {
            method: HttpMethod::Post,
            url: "https://api.zenhr.com/api/v2/employees".to_string(),
            body: Some(json!({"first_name": "John", "email": "john.doe@example.com"})),
            ..get_request()
        }
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("js".parse::<Language>(), Ok(Language::JavaScript));
        assert_eq!("PY".parse::<Language>(), Ok(Language::Python));
        assert!("cobol".parse::<Language>().is_err());
        assert!(generate_code("cobol", &get_request()).is_err());
    }

    #[test]
    fn test_snippets_never_embed_stored_key() {
        for lang in Language::ALL {
            for request in [get_request(), post_request()] {
                let code = generate_for(lang, &request);
                assert!(!code.contains("real_secret_key_123"), "{} leaked key", lang);
                assert!(code.contains("YOUR_API_KEY"), "{} missing placeholder", lang);
            }
        }
    }

    #[test]
    fn test_get_snippets_carry_query() {
        for lang in Language::ALL {
            let code = generate_for(lang, &get_request());
            assert!(code.contains("fields=id,email&page=1&per_page=10"), "{}", lang);
        }
    }

    #[test]
    fn test_python_post() {
        let code = generate_code("python", &post_request()).unwrap();
        assert!(code.contains("import json"));
        assert!(code.contains("\"first_name\": \"John\""));
        assert!(code.contains("requests.post(url, headers=headers, data=json.dumps(payload))"));
    }

    #[test]
    fn test_javascript_post_body() {
        let code = generate_code("javascript", &post_request()).unwrap();
        assert!(code.contains("method: 'POST'"));
        assert!(code.contains("body: JSON.stringify({"));
    }

    #[test]
    fn test_ruby_and_php_methods() {
        let ruby = generate_code("ruby", &post_request()).unwrap();
        assert!(ruby.contains("Net::HTTP::Post.new(uri)"));
        assert!(ruby.contains("\"first_name\" => \"John\""));
        let php = generate_code("php", &post_request()).unwrap();
        assert!(php.contains("CURLOPT_POST => true"));
    }
}
