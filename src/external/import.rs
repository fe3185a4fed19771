//! Bulk import of external field descriptors
//!
//! The payload is tried as a JSON array of field objects first, then as CSV
//! with a header row. Import is best-effort: rows without an id and a name,
//! or with an id already present, are dropped and counted.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use super::fields::ExternalFields;
use crate::schema::{FieldDescriptor, FieldType};

/// Import error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Failed to parse the file. Please ensure it is valid JSON or CSV.")]
    Unparseable,

    #[error("Invalid format: The file must contain an array of field objects")]
    NotAList,

    #[error("Invalid CSV format: The file must have \"id\" and \"name\" columns")]
    MissingColumns,
}

/// Which parser accepted the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportFormat::Json => f.write_str("JSON"),
            ImportFormat::Csv => f.write_str("CSV"),
        }
    }
}

/// Outcome of a best-effort import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub format: ImportFormat,
    pub imported: Vec<FieldDescriptor>,
    pub rejected: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imported.is_empty() {
            write!(f, "No valid fields found in the imported file")?;
        } else {
            write!(f, "Successfully imported {} fields", self.imported.len())?;
        }
        if self.rejected > 0 {
            write!(f, " ({} rejected)", self.rejected)?;
        }
        Ok(())
    }
}

/// Parse `raw` against the ids already in `existing`
pub fn import_fields(raw: &[u8], existing: &ExternalFields) -> Result<ImportReport, ImportError> {
    let text = std::str::from_utf8(raw).map_err(|_| ImportError::Unparseable)?;
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(ImportError::Unparseable);
    }

    let mut seen: HashSet<String> = existing.iter().map(|f| f.id.clone()).collect();

    let report = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => from_json(&items, &mut seen),
        Ok(_) => return Err(ImportError::NotAList),
        Err(e) => {
            debug!(error = %e, "payload is not JSON, trying CSV");
            from_csv(text, &mut seen)?
        }
    };

    info!(
        format = %report.format,
        imported = report.imported.len(),
        rejected = report.rejected,
        "imported external fields"
    );
    Ok(report)
}

/// Import and append the accepted fields to `fields`
pub fn import_into(fields: &mut ExternalFields, raw: &[u8]) -> Result<ImportReport, ImportError> {
    let report = import_fields(raw, fields)?;
    fields.extend(report.imported.iter().cloned());
    Ok(report)
}

fn from_json(items: &[Value], seen: &mut HashSet<String>) -> ImportReport {
    let mut imported = Vec::new();
    let mut rejected = 0;

    for item in items {
        let field = item.as_object().and_then(|obj| {
            build_field(
                obj.get("id").and_then(text),
                obj.get("name").and_then(text),
                obj.get("type").and_then(text),
                obj.get("description").and_then(text),
                obj.get("category").and_then(text),
                obj.get("required").is_some_and(truthy),
            )
        });
        match field {
            Some(field) if seen.insert(field.id.clone()) => imported.push(field),
            _ => rejected += 1,
        }
    }

    ImportReport {
        format: ImportFormat::Json,
        imported,
        rejected,
    }
}

fn from_csv(text: &str, seen: &mut HashSet<String>) -> Result<ImportReport, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|_| ImportError::Unparseable)?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let (id_col, name_col) = match (column("id"), column("name")) {
        (Some(id), Some(name)) => (id, name),
        _ => return Err(ImportError::MissingColumns),
    };
    let type_col = column("type");
    let description_col = column("description");
    let category_col = column("category");
    let required_col = column("required");

    let mut imported = Vec::new();
    let mut rejected = 0;

    for record in reader.records() {
        let Ok(record) = record else {
            rejected += 1;
            continue;
        };
        if record.iter().all(|v| v.is_empty()) {
            continue;
        }
        let cell = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let field = build_field(
            cell(Some(id_col)),
            cell(Some(name_col)),
            cell(type_col),
            cell(description_col),
            cell(category_col),
            cell(required_col).is_some_and(|v| truthy(&Value::String(v))),
        );
        match field {
            Some(field) if seen.insert(field.id.clone()) => imported.push(field),
            _ => rejected += 1,
        }
    }

    Ok(ImportReport {
        format: ImportFormat::Csv,
        imported,
        rejected,
    })
}

fn build_field(
    id: Option<String>,
    name: Option<String>,
    field_type: Option<String>,
    description: Option<String>,
    category: Option<String>,
    required: bool,
) -> Option<FieldDescriptor> {
    let id = id.filter(|s| !s.is_empty())?;
    let name = name.filter(|s| !s.is_empty())?;
    let field_type = field_type
        .and_then(|t| t.parse::<FieldType>().ok())
        .unwrap_or_default();
    let mut field = FieldDescriptor::new(id, name, field_type).required(required);
    if let Some(description) = description.filter(|s| !s.is_empty()) {
        field = field.with_description(description);
    }
    if let Some(category) = category.filter(|s| !s.is_empty()) {
        field = field.with_category(category);
    }
    Some(field)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1" | "y"),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}
