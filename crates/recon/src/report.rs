use crate::model::{ReconSummary, ReconciliationResult, Record, ReportRow, Value};

/// A flattened reconciliation report: rows in emission order plus the
/// discrepancy count the report consumer depends on.
#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub discrepancy_count: usize,
    pub summary: ReconSummary,
}

/// Flatten a reconciliation result into report rows.
///
/// Emission order is fixed: missing-in-target records, missing-in-source
/// records, then one row per differing non-key field of each matched pair.
/// `columns` is the explicit ordered column list (typically the source's):
/// its first entry names the key, the rest drive both the positional layout
/// of missing rows and the field-comparison order for matched pairs.
/// `discrepancy_count` always equals the number of `FieldDiscrepancy` rows.
pub fn build_report(result: &ReconciliationResult, columns: &[String]) -> Report {
    let (key_col, value_cols): (Option<&str>, &[String]) = match columns.split_first() {
        Some((key, rest)) => (Some(key.as_str()), rest),
        None => (None, &[]),
    };

    let positional = |record: &Record| -> (Value, Vec<Value>) {
        let key = match key_col {
            Some(col) => record.get(col).clone(),
            None => Value::Empty,
        };
        let values = value_cols.iter().map(|col| record.get(col).clone()).collect();
        (key, values)
    };

    let mut rows = Vec::new();

    for record in &result.missing_in_target {
        let (key, values) = positional(record);
        rows.push(ReportRow::MissingInTarget { key, values });
    }
    for record in &result.missing_in_source {
        let (key, values) = positional(record);
        rows.push(ReportRow::MissingInSource { key, values });
    }

    let mut discrepancy_count = 0;
    for pair in &result.matched_pairs {
        for column in value_cols {
            let source = pair.source.get(column);
            let target = pair.target.get(column);
            if source != target {
                rows.push(ReportRow::FieldDiscrepancy {
                    key: pair.key.clone(),
                    field: column.clone(),
                    source: source.clone(),
                    target: target.clone(),
                });
                discrepancy_count += 1;
            }
        }
    }

    let summary = ReconSummary {
        missing_in_target: result.missing_in_target.len(),
        missing_in_source: result.missing_in_source.len(),
        matched: result.matched_pairs.len(),
        discrepancies: discrepancy_count,
    };

    Report {
        rows,
        discrepancy_count,
        summary,
    }
}
