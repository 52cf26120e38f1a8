use serde_json::Value;
use std::io;

use super::{flatten_object, format_value};

/// Write output as CSV to stdout: one `field,value` row per flattened line
/// item, or one row per element for list output.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let (scalars, lists) = flatten_object(body);
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &scalars {
                let _ = wtr.write_record([key.as_str(), &format_value(val)]);
            }
            // Lists become indexed rows, e.g. chart_series.0.value
            for (key, items) in &lists {
                for (i, item) in items.iter().enumerate() {
                    if let Value::Object(fields) = item {
                        for (field, val) in fields {
                            let name = format!("{key}.{i}.{field}");
                            let _ = wtr.write_record([name.as_str(), &format_value(val)]);
                        }
                    }
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
