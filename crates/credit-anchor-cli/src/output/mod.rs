pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` member of an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into `(dotted.key, text)` rows.
///
/// Arrays of scalars are joined; arrays of objects are left to the caller
/// and rendered here as a count.
pub(crate) fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&path, val, rows);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            rows.push((prefix.to_string(), format!("[{} rows]", items.len())));
        }
        _ => rows.push((prefix.to_string(), scalar_text(value))),
    }
}

/// Arrays of objects inside a result, keyed by field name.
pub(crate) fn record_lists(value: &Value) -> Vec<(&str, &[Value])> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| match v {
                Value::Array(items) if items.iter().any(Value::is_object) => {
                    Some((k.as_str(), items.as_slice()))
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_uses_dotted_paths() {
        let rows = flatten(&json!({
            "breakdown": { "total_cost": "612000", "amortization": { "emi": "17000" } },
            "eligible": true,
            "requested_emi": null
        }));
        assert!(rows.contains(&("breakdown.amortization.emi".into(), "17000".into())));
        assert!(rows.contains(&("eligible".into(), "true".into())));
        assert!(rows.contains(&("requested_emi".into(), String::new())));
    }

    #[test]
    fn test_flatten_summarises_record_arrays() {
        let rows = flatten(&json!({ "ranked": [{ "rank": 1 }, { "rank": 2 }] }));
        assert_eq!(rows, vec![("ranked".to_string(), "[2 rows]".to_string())]);
    }

    #[test]
    fn test_scalar_arrays_are_joined() {
        assert_eq!(scalar_text(&json!(["a", "b"])), "a; b");
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let v = json!({ "result": { "emi": "1" }, "warnings": [] });
        assert_eq!(result_of(&v), &json!({ "emi": "1" }));
        let bare = json!({ "simulated_score": 735 });
        assert_eq!(result_of(&bare), &bare);
    }
}
