use serde_json::Value;
use tabled::{builder::Builder, Table};

use rental_quote_core::schedule::CSV_HEADER;

use super::{format_value, payload};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let result = payload(value);

    print_summary(result);

    if let Some(Value::Array(adjustments)) = result.get("adjustments") {
        if !adjustments.is_empty() {
            println!("\nAdd-ons:");
            print_adjustments(adjustments);
        }
    }

    if let Some(Value::Array(rows)) = result.get("schedule") {
        println!("\n12-month budget:");
        print_schedule(rows);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }

    if let Some(Value::String(path)) = value.get("schedule_file") {
        println!("\nSchedule written to: {}", path);
    }
}

fn print_summary(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", format_value(result));
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_adjustments(adjustments: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Item", "Amount"]);
    for item in adjustments {
        let label = item.get("label").map(format_value).unwrap_or_default();
        let amount = item.get("amount").map(format_value).unwrap_or_default();
        builder.push_record([label, amount]);
    }
    println!("{}", Table::from(builder));
}

fn print_schedule(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(CSV_HEADER);
    for row in rows {
        let record: Vec<String> = CSV_HEADER
            .iter()
            .map(|h| row.get(*h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}
