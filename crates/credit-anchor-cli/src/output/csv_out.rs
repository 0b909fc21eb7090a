use serde_json::Value;
use std::io::{self, Write};

use super::{flatten, record_lists, result_of, scalar_text};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        tracing::error!(error = %e, "CSV output failed");
    }
}

/// A result holding exactly one record list (comparison, history, roadmap)
/// is written as that table; anything else as `field,value` rows.
pub fn write_csv<W: Write>(writer: W, value: &Value) -> csv::Result<()> {
    let result = result_of(value);
    let mut wtr = csv::Writer::from_writer(writer);

    match record_lists(result).as_slice() {
        [(_, records)] => write_records(&mut wtr, records)?,
        _ => {
            wtr.write_record(["field", "value"])?;
            for (key, text) in flatten(result) {
                wtr.write_record([key, text])?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

fn write_records<W: Write>(wtr: &mut csv::Writer<W>, records: &[Value]) -> csv::Result<()> {
    let headers: Vec<String> = match records.iter().find_map(Value::as_object) {
        Some(first) => first.keys().cloned().collect(),
        None => return Ok(()),
    };
    wtr.write_record(&headers)?;
    for map in records.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
