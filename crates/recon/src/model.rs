use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single cell value. Equality is per-variant; a `Number` never equals a
/// `Text`, even when they print the same. Callers that want type-insensitive
/// comparison must normalize before reconciling.
#[derive(Debug, Clone)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
}

impl Value {
    /// Infer a value from a raw cell: empty string stays empty, anything
    /// that parses as a finite number becomes `Number`, the rest is `Text`.
    /// "NaN"/"inf" spellings are kept as text so every `Number` is finite.
    pub fn parse(raw: &str) -> Value {
        if raw.is_empty() {
            return Value::Empty;
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

// Numbers compare by bit pattern so that Eq/Hash stay consistent. All
// constructed numbers are finite, and "-0" vs "0" counting as different
// representations is in line with the no-coercion comparison policy.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Empty => state.write_u8(0),
            Value::Number(n) => {
                state.write_u8(1);
                state.write_u64(n.to_bits());
            }
            Value::Text(s) => {
                state.write_u8(2);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Empty => serializer.serialize_unit(),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

static EMPTY_VALUE: Value = Value::Empty;

/// One record of a table: column name → value. Columns the record does not
/// carry read as `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    pub fn new(values: HashMap<String, Value>) -> Record {
        Record { values }
    }

    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&EMPTY_VALUE)
    }
}

/// An in-memory dataset: ordered columns (the first is the key column) and
/// rows in file order. Built once by a loader, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    /// The defined zero-columns, zero-rows state a loader substitutes when
    /// an input cannot be read. Reconciling against it yields an
    /// entirely-missing result rather than an error.
    pub fn empty() -> Table {
        Table::default()
    }

    /// Build a table from positional rows. Each row is zipped against the
    /// declared columns; loaders guarantee equal lengths.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Table {
        let rows = rows
            .into_iter()
            .map(|row| {
                Record::new(columns.iter().cloned().zip(row).collect())
            })
            .collect();
        Table { columns, rows }
    }

    pub fn key_column(&self) -> Option<&str> {
        self.columns.first().map(|c| c.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

/// A source and target record sharing a key. Under the last-wins duplicate
/// policy each side contributes its final occurrence of the key.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub key: Value,
    pub source: Record,
    pub target: Record,
}

/// The three record sets a reconcile call produces. Owned by the caller,
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    pub missing_in_target: Vec<Record>,
    pub missing_in_source: Vec<Record>,
    pub matched_pairs: Vec<MatchedPair>,
}

// ---------------------------------------------------------------------------
// Report rows
// ---------------------------------------------------------------------------

/// One emitted line of the reconciliation report. Missing rows carry the
/// whole record as positional values and have variable width; discrepancy
/// rows are always five columns.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    MissingInTarget { key: Value, values: Vec<Value> },
    MissingInSource { key: Value, values: Vec<Value> },
    FieldDiscrepancy { key: Value, field: String, source: Value, target: Value },
}

impl ReportRow {
    /// The `Type` column label, part of the report file contract.
    pub fn label(&self) -> &'static str {
        match self {
            ReportRow::MissingInTarget { .. } => "Missing in Target",
            ReportRow::MissingInSource { .. } => "Missing in Source",
            ReportRow::FieldDiscrepancy { .. } => "Field Discrepancy",
        }
    }
}

/// Counts for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub missing_in_target: usize,
    pub missing_in_source: usize,
    pub matched: usize,
    pub discrepancies: usize,
}
