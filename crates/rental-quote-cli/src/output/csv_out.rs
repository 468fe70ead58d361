use serde_json::Value;
use std::io;

use rental_quote_core::schedule::CSV_HEADER;

use super::{format_value, payload};

/// Write output as CSV to stdout.
///
/// A quote prints its 12-month schedule in the same layout as the schedule
/// file; anything else prints as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = payload(value);

    match result.get("schedule") {
        Some(Value::Array(rows)) => write_rows(&mut wtr, rows),
        _ => write_fields(&mut wtr, result),
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let _ = wtr.write_record(CSV_HEADER);

    for row in rows {
        let record: Vec<String> = CSV_HEADER
            .iter()
            .map(|h| row.get(*h).map(format_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) {
    let _ = wtr.write_record(["field", "value"]);
    if let Value::Object(map) = result {
        for (key, val) in map {
            if val.is_array() || val.is_object() {
                continue;
            }
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    }
}
