use serde_json::Value;

use super::{result_of, scalar};

/// Headline figure of each command, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "best_option",
    "monthly_repayment",
    "new_term_months",
    "tax_due",
    "expected_rate_percent",
    "net_cost",
    "title",
    "name",
];

/// Print just the key answer value from the output.
///
/// Looks for the first well-known headline field, then falls back to the
/// first field of the result. Arrays print one headline per line.
pub fn print_minimal(value: &Value) {
    match result_of(value) {
        Value::Array(rows) => {
            for row in rows {
                println!("{}", headline(row));
            }
        }
        other => println!("{}", headline(other)),
    }
}

fn headline(value: &Value) -> String {
    let Value::Object(map) = value else {
        return scalar(value);
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return scalar(val);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, scalar(val)),
        None => String::new(),
    }
}
