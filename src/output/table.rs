//! Table and CSV output for catalog listings, saved configurations and mappings

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::devexp::render::MappingRow;
use crate::errors::{HrbridgeError, Result};
use crate::schema::{catalog, EndpointDescriptor, FieldDescriptor, FilterDescriptor};
use crate::sessions::SavedConfiguration;
use crate::wizard::IntegrationDirection;

fn new_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let header: Vec<Cell> = columns
        .iter()
        .map(|col| Cell::new(col).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(header);
    table
}

pub fn endpoints_table(endpoints: &[EndpointDescriptor]) -> String {
    let mut table = new_table(&["ID", "Name", "Description"]);
    for endpoint in endpoints {
        table.add_row(vec![&endpoint.id, &endpoint.name, &endpoint.description]);
    }
    table.to_string()
}

/// `required` marks fields that must be filled for a create request
pub fn fields_table(fields: &[FieldDescriptor], required: &[String]) -> String {
    if fields.is_empty() {
        return "(no fields)".to_string();
    }
    let mut table = new_table(&["ID", "Name", "Type", "Category", "Required", "Description"]);
    for field in fields {
        let is_required = field.required || required.iter().any(|r| r == &field.id);
        table.add_row(vec![
            field.id.clone(),
            field.name.clone(),
            field.field_type.to_string(),
            field.category.clone().unwrap_or_default(),
            if is_required { "yes" } else { "" }.to_string(),
            field.description.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

pub fn filters_table(endpoint_id: &str, filters: &[FilterDescriptor]) -> String {
    if filters.is_empty() {
        return "(no filters)".to_string();
    }
    let mut table = new_table(&["ID", "Name", "Type", "Hint"]);
    for filter in filters {
        let hint = match catalog::filter_hint(endpoint_id, &filter.id) {
            Some(h) if !h.options.is_empty() => h.options.join(" | "),
            Some(h) => h.example,
            None => filter.description.clone().unwrap_or_default(),
        };
        table.add_row(vec![
            filter.id.clone(),
            filter.name.clone(),
            filter.filter_type.to_string(),
            hint,
        ]);
    }
    table.to_string()
}

pub fn configs_table(configs: &[SavedConfiguration]) -> String {
    if configs.is_empty() {
        return "(no saved configurations)".to_string();
    }
    let mut table = new_table(&["ID", "Name", "Direction", "Request", "External System", "Created"]);
    for config in configs {
        let external = if config.external_system.base_url.is_empty() {
            String::new()
        } else {
            config.external_system.display_name().to_string()
        };
        table.add_row(vec![
            config.id.clone(),
            config.name.clone(),
            config.direction.label().to_string(),
            config.describe(),
            external,
            config.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table.to_string()
}

/// Mapped pairs in the orientation the direction shows them
pub fn mappings_table(rows: &[MappingRow], direction: IntegrationDirection) -> String {
    if rows.is_empty() {
        return "(no mappings)".to_string();
    }
    let source = format!("{} Field", direction.source().label());
    let target = format!("{} Field", direction.target().label());
    let mut table = new_table(&[&source, &target]);
    for row in rows {
        let hr = format!("{} ({})", row.hr_name, row.hr_field);
        let external = format!("{} ({})", row.external_name, row.external_field);
        if direction.is_reversed() {
            table.add_row(vec![external, hr]);
        } else {
            table.add_row(vec![hr, external]);
        }
    }
    table.to_string()
}

/// Fields as CSV with the column set the importer reads back
pub fn fields_csv(fields: &[FieldDescriptor]) -> Result<String> {
    let mut output = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut output);
        writer.write_record(["id", "name", "type", "category", "description", "required"])?;
        for field in fields {
            writer.write_record([
                field.id.as_str(),
                field.name.as_str(),
                field.field_type.as_str(),
                field.category.as_deref().unwrap_or(""),
                field.description.as_deref().unwrap_or(""),
                if field.required { "true" } else { "false" },
            ])?;
        }
        writer.flush()?;
    }
    String::from_utf8(output).map_err(|e| HrbridgeError::Argument(format!("UTF-8 error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{import::import_into, ExternalFields};

    #[test]
    fn test_endpoints_table() {
        let out = endpoints_table(&catalog::endpoints());
        assert!(out.contains("company_announcements"));
        assert!(out.contains("Employees"));
    }

    #[test]
    fn test_fields_table_marks_required() {
        let fields = catalog::fields("employees");
        let out = fields_table(&fields, &catalog::required_fields("employees"));
        assert!(out.contains("first_name"));
        assert!(out.contains("yes"));
        assert_eq!(fields_table(&[], &[]), "(no fields)");
    }

    #[test]
    fn test_filters_table_shows_options() {
        let out = filters_table("employees", &catalog::filters("employees"));
        assert!(out.contains("active | inactive"));
    }

    #[test]
    fn test_mappings_table_orientation() {
        let rows = vec![MappingRow {
            hr_field: "email".into(),
            hr_name: "Email".into(),
            external_field: "contact_email".into(),
            external_name: "Contact Email".into(),
        }];
        let out = mappings_table(&rows, IntegrationDirection::ExternalToZenhr);
        let ext_at = out.find("Contact Email (contact_email)").unwrap();
        let hr_at = out.find("Email (email)").unwrap();
        assert!(ext_at < hr_at);
        assert!(out.contains("External System Field"));
    }

    #[test]
    fn test_fields_csv_reimports() {
        let fields = catalog::fields("leaves");
        let csv_text = fields_csv(&fields).unwrap();
        let mut target = ExternalFields::new();
        let report = import_into(&mut target, csv_text.as_bytes()).unwrap();
        assert_eq!(report.imported.len(), fields.len());
        assert_eq!(report.rejected, 0);
        assert_eq!(target.ids(), fields.iter().map(|f| f.id.clone()).collect::<Vec<_>>());
    }
}
