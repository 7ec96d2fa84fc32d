use std::collections::{HashMap, HashSet};

use crate::error::{DuplicateKey, ReconcileError, Side};
use crate::model::{MatchedPair, ReconciliationResult, Table, Value};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when the same key occurs more than once within one input.
///
/// `LastWins` keeps the index-overwrite behavior the report format was built
/// around: a later row for a key replaces the earlier one for matching, and
/// the earlier rows are silently dropped as match candidates. `Reject` turns
/// any duplicate into a `ReconcileError` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    LastWins,
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub on_duplicate: DuplicatePolicy,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Reconcile two tables under the default last-wins duplicate policy.
/// Total over its inputs: empty tables yield empty or fully-missing record
/// sets, never an error.
pub fn reconcile(source: &Table, target: &Table) -> ReconciliationResult {
    run(source, target)
}

/// Reconcile with explicit options. Only the `Reject` duplicate policy can
/// fail, and only when a key occurs more than once on either side.
pub fn reconcile_with(
    source: &Table,
    target: &Table,
    options: &ReconcileOptions,
) -> Result<ReconciliationResult, ReconcileError> {
    if options.on_duplicate == DuplicatePolicy::Reject {
        let mut dups = Vec::new();
        collect_duplicates(source, Side::Source, &mut dups);
        collect_duplicates(target, Side::Target, &mut dups);
        if !dups.is_empty() {
            return Err(ReconcileError::DuplicateKeys(dups));
        }
    }
    Ok(run(source, target))
}

fn run(source: &Table, target: &Table) -> ReconciliationResult {
    let source_index = index_last_wins(source);
    let target_index = index_last_wins(target);

    let mut missing_in_target = Vec::new();
    let mut matched_pairs = Vec::new();

    // Missing rows keep every occurrence in row order; matched pairs are
    // emitted once per key, positioned at the key's first source occurrence
    // but carrying the last-wins record from each side.
    if let Some(key_col) = source.key_column() {
        let mut seen: HashSet<Value> = HashSet::new();
        for row in &source.rows {
            let key = row.get(key_col);
            let Some(&target_idx) = target_index.get(key) else {
                missing_in_target.push(row.clone());
                continue;
            };
            if seen.insert(key.clone()) {
                if let Some(&source_idx) = source_index.get(key) {
                    matched_pairs.push(MatchedPair {
                        key: key.clone(),
                        source: source.rows[source_idx].clone(),
                        target: target.rows[target_idx].clone(),
                    });
                }
            }
        }
    }

    let mut missing_in_source = Vec::new();
    if let Some(key_col) = target.key_column() {
        for row in &target.rows {
            if !source_index.contains_key(row.get(key_col)) {
                missing_in_source.push(row.clone());
            }
        }
    }

    ReconciliationResult {
        missing_in_target,
        missing_in_source,
        matched_pairs,
    }
}

/// key → row position, later rows overwriting earlier ones.
fn index_last_wins(table: &Table) -> HashMap<Value, usize> {
    let mut index = HashMap::new();
    if let Some(key_col) = table.key_column() {
        for (i, row) in table.rows.iter().enumerate() {
            index.insert(row.get(key_col).clone(), i);
        }
    }
    index
}

/// Report each duplicated key once, in first-occurrence row order.
fn collect_duplicates(table: &Table, side: Side, out: &mut Vec<DuplicateKey>) {
    let Some(key_col) = table.key_column() else {
        return;
    };

    let mut counts: HashMap<&Value, usize> = HashMap::new();
    for row in &table.rows {
        *counts.entry(row.get(key_col)).or_insert(0) += 1;
    }

    let mut reported: HashSet<&Value> = HashSet::new();
    for row in &table.rows {
        let key = row.get(key_col);
        if counts.get(key).copied().unwrap_or(0) > 1 && reported.insert(key) {
            out.push(DuplicateKey {
                side,
                key: key.clone(),
                count: counts[key],
            });
        }
    }
}
