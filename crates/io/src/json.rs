// JSON report sink

use std::fs;
use std::path::Path;

use crosscheck_recon::{Report, ReportRow};
use serde_json::json;

use crate::error::WriteError;

/// Write the report as one JSON document: summary first, then rows in
/// emission order. Cell values serialize as null, number, or string per
/// variant, so consumers see the same no-coercion distinction the report
/// CSV flattens away.
pub fn write_report_json(path: &Path, report: &Report) -> Result<(), WriteError> {
    let rows: Vec<serde_json::Value> = report.rows.iter().map(row_json).collect();
    let top = json!({
        "summary": report.summary,
        "rows": rows,
    });

    let mut bytes = serde_json::to_vec_pretty(&top).map_err(|e| write_error(path, &e))?;
    bytes.push(b'\n');
    fs::write(path, bytes).map_err(|e| write_error(path, &e))
}

fn row_json(row: &ReportRow) -> serde_json::Value {
    match row {
        ReportRow::MissingInTarget { key, values } => json!({
            "type": "missing_in_target",
            "key": key,
            "values": values,
        }),
        ReportRow::MissingInSource { key, values } => json!({
            "type": "missing_in_source",
            "key": key,
            "values": values,
        }),
        ReportRow::FieldDiscrepancy {
            key,
            field,
            source,
            target,
        } => json!({
            "type": "field_discrepancy",
            "key": key,
            "field": field,
            "source": source,
            "target": target,
        }),
    }
}

fn write_error(path: &Path, detail: &dyn std::fmt::Display) -> WriteError {
    WriteError {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}
