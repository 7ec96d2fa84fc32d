use std::fmt;
use std::path::PathBuf;

/// Why an input could not be turned into a table. All variants are recovered
/// locally by callers: report the condition, substitute `Table::empty()`,
/// keep going.
#[derive(Debug)]
pub enum LoadError {
    /// The path cannot be opened or read.
    NotFound { path: PathBuf, detail: String },
    /// The bytes are not valid UTF-8 text.
    Decode { path: PathBuf },
    /// The text is not well-formed delimited data (e.g. ragged rows).
    Malformed { path: PathBuf, detail: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { path, detail } => {
                write!(f, "cannot read {}: {detail}", path.display())
            }
            LoadError::Decode { path } => {
                write!(f, "cannot decode {}: not valid UTF-8", path.display())
            }
            LoadError::Malformed { path, detail } => {
                write!(f, "invalid delimited data in {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// A report that cannot be persisted has no value; write failures are the
/// one fatal condition of the pipeline.
#[derive(Debug)]
pub struct WriteError {
    pub path: PathBuf,
    pub detail: String,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot write report to {}: {}", self.path.display(), self.detail)
    }
}

impl std::error::Error for WriteError {}
