// File I/O - table loading and report sinks

pub mod csv;
pub mod error;
pub mod json;

pub use csv::{load_table, load_table_with_delimiter, write_report};
pub use error::{LoadError, WriteError};
pub use json::write_report_json;
