//! Errors from reading telemetry logs.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from [`read_log()`](crate::read_log).
#[derive(Debug)]
pub enum TelemetryError {
    /// The CSV layer rejected the input.
    Csv(csv::Error),
    /// The log file could not be opened.
    Io(io::Error),
    /// The header row is not the expected column list.
    HeaderMismatch {
        /// Columns actually found.
        found: Vec<String>,
    },
    /// A data row could not be parsed.
    MalformedRow {
        /// 1-based line number in the input.
        line: u64,
        /// What was wrong with it.
        detail: String,
    },
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::HeaderMismatch { found } => {
                write!(f, "unexpected telemetry header: {}", found.join(","))
            }
            Self::MalformedRow { line, detail } => {
                write!(f, "malformed telemetry row at line {line}: {detail}")
            }
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for TelemetryError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<io::Error> for TelemetryError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
