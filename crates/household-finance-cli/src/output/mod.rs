pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` of a computation envelope, or the value itself when the
/// command returned a bare object or array.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Scalar fields of `map` with nested objects flattened to dotted keys
/// (`lease.net_cost`). Arrays are left out; callers render them separately.
pub(crate) fn flatten_scalars(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    collect(None, map, &mut rows);
    rows
}

fn collect(prefix: Option<&str>, map: &Map<String, Value>, rows: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match val {
            Value::Object(inner) => collect(Some(&name), inner, rows),
            Value::Array(_) => {}
            other => rows.push((name, scalar(other))),
        }
    }
}

/// Arrays of objects inside `map`, by field name (`asset_values`,
/// `yearly_breakdown`, `marked_regions`).
pub(crate) fn object_arrays(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                Some((key.as_str(), items.as_slice()))
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers for an array of objects, taken from its first row.
pub(crate) fn headers(rows: &[Value]) -> Vec<String> {
    rows.first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default()
}

/// One row of cells in `headers` order. Nested objects are rendered as
/// compact JSON.
pub(crate) fn cells(row: &Value, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| row.get(h.as_str()).map(scalar).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let value = json!({
            "best_option": "NovatedLease",
            "lease": { "net_cost": "54375.57", "monthly_payment": "1174.25" },
            "asset_values": [{ "year": 0 }]
        });
        let rows = flatten_scalars(value.as_object().unwrap());
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"best_option"));
        assert!(keys.contains(&"lease.net_cost"));
        assert!(!keys.iter().any(|k| k.starts_with("asset_values")));
    }

    #[test]
    fn test_object_arrays_found() {
        let value = json!({
            "yearly_breakdown": [{ "year": 1 }, { "year": 2 }],
            "warnings": ["a"],
            "empty": []
        });
        let arrays = object_arrays(value.as_object().unwrap());
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].0, "yearly_breakdown");
        assert_eq!(arrays[0].1.len(), 2);
    }

    #[test]
    fn test_result_of_envelope_and_bare() {
        let envelope = json!({ "result": { "x": 1 }, "warnings": [] });
        assert_eq!(result_of(&envelope), &json!({ "x": 1 }));
        let bare = json!([1, 2]);
        assert_eq!(result_of(&bare), &bare);
    }

    #[test]
    fn test_cells_follow_headers() {
        let rows = vec![json!({ "year": 1, "principal": "10.5" })];
        let h = headers(&rows);
        assert_eq!(cells(&rows[0], &h).len(), 2);
    }
}
