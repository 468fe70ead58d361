use serde_json::Value;

use super::{format_value, payload};

/// Print just the monthly rent, the one number most callers want.
pub fn print_minimal(value: &Value) {
    let result = payload(value);
    match result.get("monthly_rent") {
        Some(rent) => println!("{}", format_value(rent)),
        None => println!("{}", format_value(result)),
    }
}
