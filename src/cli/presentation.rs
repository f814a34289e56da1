//! CLI presentation: text and json formatters per command family.

use crate::query::record::QueryRecord;
use crate::service::ServiceDefinition;
use crate::types::QueryId;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// One row of `service list` output.
pub struct ServiceRow {
    pub name: String,
    pub kind: String,
    pub title: String,
    pub template: String,
    pub field_count: usize,
}

pub fn format_service_list_text(rows: &[ServiceRow]) -> String {
    if rows.is_empty() {
        return "No services registered.\n\nAdd [services.<name>] entries to config/config.toml."
            .to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Kind", "Title", "Template", "Fields"]);
    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            row.kind.clone(),
            row.title.clone(),
            row.template.clone(),
            row.field_count.to_string(),
        ]);
    }
    format!("{}\n\nTotal: {} service(s)", table, rows.len())
}

pub fn format_service_list_json(rows: &[ServiceRow]) -> String {
    let services: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "name": row.name,
                "kind": row.kind,
                "title": row.title,
                "template": row.template,
                "field_count": row.field_count,
            })
        })
        .collect();
    let out = json!({ "services": services, "total": rows.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_service_show_text(name: &str, definition: &ServiceDefinition) -> String {
    let mut output = format!("{}\n", format!("Service: {}", name).bold().underline());
    output.push_str(&format!("Title: {}\n", definition.title));
    output.push_str(&format!("Results title: {}\n", definition.results_title));
    output.push_str(&format!("Template: {}\n", definition.template));
    output.push_str(&format!("Auto go: {}\n", definition.auto_go));
    output.push_str(&format!("Keep alive: {}\n", definition.keep_alive));

    if definition.tools.is_empty() {
        output.push_str("Tools: (none)\n");
    } else {
        output.push_str("Tools:\n");
        for (tool, enabled) in &definition.tools.enabled {
            let marker = if *enabled { "enabled" } else { "disabled" };
            output.push_str(&format!("  {:<12} {}\n", tool, marker));
        }
        if let Some(default) = &definition.tools.default {
            output.push_str(&format!("  default: {}\n", default));
        }
    }

    if definition.fields.is_empty() {
        output.push_str("Fields: (none)\n");
    } else {
        output.push_str("Fields:\n");
        for field in &definition.fields {
            output.push_str(&format!(
                "  {} ({:?}) \"{}\"\n",
                field.name, field.kind, field.label
            ));
            for option in &field.options {
                output.push_str(&format!("    {} = \"{}\"\n", option.value, option.label));
            }
        }
    }
    output
}

pub fn format_service_show_json(name: &str, definition: &ServiceDefinition) -> String {
    let out = json!({ "name": name, "definition": definition });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

/// Check report: one marker line per check, summary when any check failed.
pub fn format_validation_result(subject: &str, checks: &[(String, bool)]) -> String {
    let mut output = format!("Validating: {}\n\n", subject);
    let failed = checks.iter().filter(|(_, passed)| !*passed).count();

    if failed == 0 {
        output.push_str("✓ All validation checks passed\n");
        return output;
    }

    for (description, passed) in checks {
        if *passed {
            output.push_str(&format!("✓ {}\n", description));
        } else {
            output.push_str(&format!("✗ {}\n", description));
        }
    }
    output.push_str(&format!(
        "\nValidation failed: {}/{} checks passed\n",
        checks.len() - failed,
        checks.len()
    ));
    output
}

pub fn format_query_result_text(
    results_title: &str,
    query_id: QueryId,
    record: &QueryRecord,
    markup: &str,
) -> String {
    let mut output = format!("{}\n", results_title.bold().underline());
    output.push_str(&format!("Query: {}\n", query_id));
    for layer in &record.layers {
        match record.result_for(layer) {
            Some(result) if !result.failed => {
                output.push_str(&format!("  {}: {} feature(s)\n", layer, result.features.len()));
            }
            _ => {
                output.push_str(&format!("  {}: failed\n", layer));
            }
        }
    }
    if !markup.is_empty() {
        output.push('\n');
        output.push_str(markup);
        output.push('\n');
    }
    output
}

pub fn format_query_result_json(
    service: &str,
    results_title: &str,
    query_id: QueryId,
    record: &QueryRecord,
    markup: &str,
) -> String {
    let layers: Vec<_> = record
        .layers
        .iter()
        .map(|layer| match record.result_for(layer) {
            Some(result) if !result.failed => json!({
                "path": layer,
                "failed": false,
                "feature_count": result.features.len(),
            }),
            _ => json!({ "path": layer, "failed": true, "feature_count": 0 }),
        })
        .collect();
    let out = json!({
        "service": service,
        "query_id": query_id,
        "results_title": results_title,
        "layers": layers,
        "markup": markup,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
