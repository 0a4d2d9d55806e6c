use serde_json::Value;
use std::io;

use super::{cells, flatten_scalars, headers, result_of, scalar};

/// Write output as CSV to stdout.
///
/// Series commands (`breakdown`, `treaties`, `territory --play`) become one
/// row per item. Reports become `field,value` rows with nested sections
/// flattened to dotted field names; their series are left to the JSON and
/// table formats.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match result_of(value) {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            let mut res = wtr.write_record(["field", "value"]);
            for (key, val) in flatten_scalars(map) {
                res = res.and_then(|_| wtr.write_record([key, val]));
            }
            res
        }
        other => wtr.write_record([scalar(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!(error = %e, "failed to write CSV");
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) -> csv::Result<()> {
    let cols = headers(rows);
    if cols.is_empty() {
        for item in rows {
            wtr.write_record([scalar(item)])?;
        }
        return Ok(());
    }

    wtr.write_record(&cols)?;
    for row in rows {
        wtr.write_record(cells(row, &cols))?;
    }
    Ok(())
}
