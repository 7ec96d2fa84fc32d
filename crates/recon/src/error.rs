use std::fmt;

use crate::model::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

/// A key that occurs more than once within one input.
#[derive(Debug, Clone)]
pub struct DuplicateKey {
    pub side: Side,
    pub key: Value,
    pub count: usize,
}

#[derive(Debug)]
pub enum ReconcileError {
    /// Duplicate keys found under the `Reject` policy.
    DuplicateKeys(Vec<DuplicateKey>),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::DuplicateKeys(dups) => {
                writeln!(f, "duplicate keys found:")?;
                for dup in dups {
                    writeln!(
                        f,
                        "  {} key \"{}\" appears {} times",
                        dup.side.as_str(),
                        dup.key,
                        dup.count
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
