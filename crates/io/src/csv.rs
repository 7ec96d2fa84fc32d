// CSV import/export

use std::fmt;
use std::path::Path;

use crosscheck_recon::{ReportRow, Table, Value};

use crate::error::{LoadError, WriteError};

/// Header row of the report file. Downstream consumers key on these names.
const REPORT_HEADER: [&str; 5] = [
    "Type",
    "Record Identifier",
    "Field",
    "Source Value",
    "Target Value",
];

/// Load a delimited-text file into a table, sniffing the delimiter.
/// The first row names the columns; the first column is the key.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    parse_table(&content, delimiter, path)
}

/// Load with an explicit delimiter instead of sniffing.
pub fn load_table_with_delimiter(path: &Path, delimiter: u8) -> Result<Table, LoadError> {
    let content = read_file_as_utf8(path)?;
    parse_table(&content, delimiter, path)
}

/// Read file bytes and decode as UTF-8 (BOM tolerated). Undecodable bytes
/// are a load error, not silently replaced: a mangled input would otherwise
/// reconcile into nonsense discrepancies.
fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::NotFound {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let (decoded, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(LoadError::Decode {
            path: path.to_path_buf(),
        });
    }
    Ok(decoded.into_owned())
}

/// Pick the delimiter that parses the first few lines into the most
/// consistent multi-field shape. Candidates: tab, semicolon, comma, pipe;
/// comma wins when nothing else is viable.
fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

    let sample = content.lines().take(10).collect::<Vec<_>>().join("\n");

    let mut best = b',';
    let mut best_score = 0u64;

    for delim in CANDIDATES {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample.as_bytes());

        let widths: Vec<usize> = reader
            .records()
            .filter_map(|r| r.ok())
            .map(|r| r.len())
            .collect();

        let Some(&first) = widths.first() else { continue };
        if first <= 1 {
            continue;
        }

        // Consistency times width: more lines agreeing on a wider shape
        // means a more likely real delimiter.
        let consistent = widths.iter().filter(|&&w| w == first).count() as u64;
        let score = consistent * first as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn parse_table(content: &str, delimiter: u8, path: &Path) -> Result<Table, LoadError> {
    // Not flexible: a row with the wrong field count is malformed input,
    // because every record must carry exactly the declared columns.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(path, e))?;
        rows.push(record.iter().map(Value::parse).collect());
    }

    Ok(Table::from_rows(columns, rows))
}

fn malformed(path: &Path, detail: impl fmt::Display) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Write report rows to a CSV file in emission order.
///
/// Missing-record rows carry the whole record positionally and so have
/// variable width; the writer must be flexible. The handle is scoped here
/// and released on every exit path, including mid-write failures.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| write_error(path, e))?;

    writer
        .write_record(REPORT_HEADER)
        .map_err(|e| write_error(path, e))?;

    for row in rows {
        let record = match row {
            ReportRow::MissingInTarget { key, values }
            | ReportRow::MissingInSource { key, values } => {
                let mut record = vec![row.label().to_string(), key.to_string()];
                record.extend(values.iter().map(|v| v.to_string()));
                record
            }
            ReportRow::FieldDiscrepancy {
                key,
                field,
                source,
                target,
            } => vec![
                row.label().to_string(),
                key.to_string(),
                field.clone(),
                source.to_string(),
                target.to_string(),
            ],
        };
        writer
            .write_record(&record)
            .map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, detail: impl fmt::Display) -> WriteError {
    WriteError {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}
