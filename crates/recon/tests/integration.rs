use std::collections::HashSet;

use crosscheck_recon::{
    build_report, reconcile, reconcile_with, DuplicatePolicy, ReconcileOptions, ReportRow, Table,
    Value,
};

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| Value::parse(cell)).collect())
            .collect(),
    )
}

fn key_set(table: &Table) -> HashSet<Value> {
    let key_col = table.key_column().unwrap();
    table.rows.iter().map(|r| r.get(key_col).clone()).collect()
}

// -------------------------------------------------------------------------
// Spec scenarios
// -------------------------------------------------------------------------

#[test]
fn audit_scenario_one_drifted_field() {
    let source = table(
        &["ID", "Name", "Age"],
        &[&["1", "Alice", "30"], &["2", "Bob", "25"]],
    );
    let target = table(
        &["ID", "Name", "Age"],
        &[&["1", "Alice", "31"], &["3", "Carl", "40"]],
    );

    let result = reconcile(&source, &target);
    assert_eq!(result.missing_in_target.len(), 1);
    assert_eq!(*result.missing_in_target[0].get("ID"), Value::Number(2.0));
    assert_eq!(result.missing_in_source.len(), 1);
    assert_eq!(*result.missing_in_source[0].get("ID"), Value::Number(3.0));

    let report = build_report(&result, &source.columns);
    assert_eq!(report.discrepancy_count, 1);
    assert_eq!(
        report.rows.last(),
        Some(&ReportRow::FieldDiscrepancy {
            key: Value::Number(1.0),
            field: "Age".into(),
            source: Value::Number(30.0),
            target: Value::Number(31.0),
        })
    );
}

#[test]
fn empty_source_marks_every_target_row_missing() {
    let source = Table::empty();
    let target = table(&["ID", "Name"], &[&["1", "Alice"], &["2", "Bob"]]);

    let result = reconcile(&source, &target);
    assert!(result.missing_in_target.is_empty());
    assert_eq!(result.missing_in_source.len(), 2);

    // With no source schema the caller falls back to the target's columns.
    let report = build_report(&result, &target.columns);
    assert_eq!(report.discrepancy_count, 0);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(
        report.rows[0],
        ReportRow::MissingInSource {
            key: Value::Number(1.0),
            values: vec![Value::Text("Alice".into())],
        }
    );
}

#[test]
fn duplicate_source_key_matches_by_last_occurrence_only() {
    let source = table(&["ID", "V"], &[&["1", "a"], &["1", "b"]]);
    let target = table(&["ID", "V"], &[&["1", "b"]]);

    let result = reconcile(&source, &target);
    assert_eq!(result.matched_pairs.len(), 1);

    let report = build_report(&result, &source.columns);
    assert_eq!(report.discrepancy_count, 0, "last-wins pair must compare clean");
}

// -------------------------------------------------------------------------
// Properties
// -------------------------------------------------------------------------

#[test]
fn result_keys_partition_the_key_universe() {
    let source = table(
        &["ID", "V"],
        &[&["1", "a"], &["2", "b"], &["3", "c"], &["5", "e"]],
    );
    let target = table(
        &["ID", "V"],
        &[&["2", "b"], &["3", "x"], &["4", "d"]],
    );

    let result = reconcile(&source, &target);

    let key_col = "ID";
    let missing_t: HashSet<Value> = result
        .missing_in_target
        .iter()
        .map(|r| r.get(key_col).clone())
        .collect();
    let missing_s: HashSet<Value> = result
        .missing_in_source
        .iter()
        .map(|r| r.get(key_col).clone())
        .collect();
    let matched: HashSet<Value> = result.matched_pairs.iter().map(|p| p.key.clone()).collect();

    assert!(missing_t.is_disjoint(&matched));
    assert!(missing_s.is_disjoint(&matched));
    assert!(missing_t.is_disjoint(&missing_s));

    let universe: HashSet<Value> = key_set(&source).union(&key_set(&target)).cloned().collect();
    let covered: HashSet<Value> = missing_t
        .union(&missing_s)
        .cloned()
        .collect::<HashSet<_>>()
        .union(&matched)
        .cloned()
        .collect();
    assert_eq!(covered, universe);
}

#[test]
fn self_reconcile_is_clean() {
    let a = table(
        &["ID", "Name", "Age"],
        &[&["1", "Alice", "30"], &["2", "Bob", "25"], &["3", "Carl", "40"]],
    );

    let result = reconcile(&a, &a);
    assert!(result.missing_in_target.is_empty());
    assert!(result.missing_in_source.is_empty());
    assert_eq!(result.matched_pairs.len(), 3);

    let report = build_report(&result, &a.columns);
    assert_eq!(report.discrepancy_count, 0);
    assert!(report.rows.is_empty());
}

#[test]
fn missing_sets_swap_under_argument_swap() {
    let a = table(&["ID", "V"], &[&["1", "a"], &["2", "b"]]);
    let b = table(&["ID", "V"], &[&["2", "b"], &["3", "c"]]);

    let forward = reconcile(&a, &b);
    let backward = reconcile(&b, &a);

    let ids = |records: &[crosscheck_recon::Record]| -> HashSet<Value> {
        records.iter().map(|r| r.get("ID").clone()).collect()
    };

    assert_eq!(ids(&forward.missing_in_target), ids(&backward.missing_in_source));
    assert_eq!(ids(&forward.missing_in_source), ids(&backward.missing_in_target));
}

#[test]
fn strict_mode_rejects_what_last_wins_accepts() {
    let source = table(&["ID", "V"], &[&["1", "a"], &["1", "b"]]);
    let target = table(&["ID", "V"], &[&["1", "b"]]);

    assert_eq!(reconcile(&source, &target).matched_pairs.len(), 1);

    let strict = ReconcileOptions {
        on_duplicate: DuplicatePolicy::Reject,
    };
    let err = reconcile_with(&source, &target, &strict).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("duplicate keys"));
    assert!(rendered.contains("source key \"1\" appears 2 times"));
}
