//! CLI Exit Code Registry
//!
//! Single source of truth for the shell contract — scripts rely on these.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success (report written, even when fully missing)  |
//! | 1    | Reserved: unspecified failure                      |
//! | 2    | Usage error (bad arguments; also produced by clap) |
//! | 3    | Duplicate keys under `--on-duplicate error`        |
//! | 4    | Report could not be written                        |

/// Success - the report was written. Unreadable inputs do not fail the run;
/// they reconcile as empty tables.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments. clap uses the same code for parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Duplicate keys found while `--on-duplicate error` is in force.
pub const EXIT_DUPLICATE_KEYS: u8 = 3;

/// The report file could not be written. A report that cannot be persisted
/// has no value, so this is the one fatal I/O condition.
pub const EXIT_REPORT_WRITE: u8 = 4;
