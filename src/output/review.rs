//! Plain-text layout of a rendered review

use std::fmt::Write;

use super::table::mappings_table;
use super::terminal::Painter;
use crate::devexp::{Language, Rendered};
use crate::wizard::IntegrationDirection;

pub fn format_review(
    rendered: &Rendered,
    direction: IntegrationDirection,
    painter: Painter,
) -> String {
    let mut out = String::new();
    let summary = &rendered.summary;

    let _ = writeln!(out, "{}", painter.label("Configuration Summary"));
    let _ = writeln!(out, "  Direction:       {}", summary.direction);
    let _ = writeln!(out, "  Endpoint:        {} ({})", summary.endpoint_name, summary.endpoint);
    let _ = writeln!(out, "  Method:          {}", painter.method(summary.method));
    let _ = writeln!(out, "  Selected fields: {}", summary.selected_fields);
    let _ = writeln!(out, "  Active filters:  {}", summary.active_filters);
    let _ = writeln!(
        out,
        "  Pagination:      page {}, {} per page",
        summary.pagination.page, summary.pagination.per_page
    );
    if let Some(external) = &summary.external_system {
        let _ = writeln!(out, "  External system: {}", external);
    }

    let _ = writeln!(out, "\n{}", painter.label("ZenHR Request"));
    let _ = writeln!(out, "{}", rendered.request.to_pretty_json());

    if let Some(external) = &rendered.external_request {
        let _ = writeln!(out, "\n{}", painter.label("External Request"));
        let _ = writeln!(out, "{}", external.to_pretty_json());
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        painter.label("Field Mappings"),
        painter.muted(&format!(
            "({} mapped, {} unmapped)",
            rendered.mapping_summary.mapped, rendered.mapping_summary.unmapped
        ))
    );
    let _ = writeln!(out, "{}", mappings_table(&rendered.mappings, direction));

    for (lang, code) in &rendered.snippets {
        let title = lang
            .parse::<Language>()
            .map(|l| l.label().to_string())
            .unwrap_or_else(|_| lang.clone());
        let _ = writeln!(out, "\n{}", painter.label(&title));
        let _ = write!(out, "{}", code);
        if !code.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
