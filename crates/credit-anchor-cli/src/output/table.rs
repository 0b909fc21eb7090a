use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, record_lists, result_of, scalar_text};

/// Format output as tables: the result fields, then one table per record list.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    let result = result_of(value);
    let mut sections = vec![field_table(result)];

    for (name, records) in record_lists(result) {
        sections.push(format!("{name}:\n{}", records_table(records)));
    }

    if let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) {
        sections.extend(envelope_notes(envelope));
    }
    sections.join("\n\n")
}

fn field_table(value: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, text) in flatten(value) {
        builder.push_record([key, text]);
    }
    Table::from(builder).to_string()
}

fn records_table(records: &[Value]) -> String {
    let headers: Vec<String> = match records.iter().find_map(Value::as_object) {
        Some(first) => first.keys().cloned().collect(),
        None => return "(empty)".to_string(),
    };

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for map in records.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    Table::from(builder).to_string()
}

fn envelope_notes(envelope: &Map<String, Value>) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let lines: Vec<String> = warnings
                .iter()
                .map(|w| format!("  - {}", scalar_text(w)))
                .collect();
            notes.push(format!("Warnings:\n{}", lines.join("\n")));
        }
    }
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        notes.push(format!("Methodology: {methodology}"));
    }
    notes
}
