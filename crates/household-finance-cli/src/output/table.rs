use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cells, flatten_scalars, headers, object_arrays, result_of};

/// Render output as tables: the scalar fields of the result first, then one
/// table per series (asset values, yearly breakdown, ...), then warnings.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(map) => print_object(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", other),
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn print_object(map: &Map<String, Value>) {
    let fields = flatten_scalars(map);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in object_arrays(map) {
        println!("\n{}", name.bold());
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let cols = headers(rows);
    if cols.is_empty() {
        for item in rows {
            println!("{}", super::scalar(item));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(cols.iter().map(String::as_str));
    for row in rows {
        builder.push_record(cells(row, &cols));
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
