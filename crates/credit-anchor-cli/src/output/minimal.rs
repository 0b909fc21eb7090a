use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline figure of each command, most specific first.
const HEADLINE_POINTERS: [&str; 10] = [
    "/emi",
    "/breakdown/total_cost",
    "/total_amount",
    "/total_score",
    "/simulated_score",
    "/eligible_amount",
    "/cheapest_lender",
    "/current_score",
    "/dti_pct",
    "/total_points",
];

/// Print just the headline value of a result.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

pub fn render_minimal(value: &Value) -> String {
    let result = result_of(value);

    for pointer in HEADLINE_POINTERS {
        if let Some(found) = result.pointer(pointer) {
            if !found.is_null() {
                return scalar_text(found);
            }
        }
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{key}: {}", scalar_text(val)))
            .unwrap_or_default(),
        other => scalar_text(other),
    }
}
