//! Telemetry sinks for the Pestis epidemic simulator.
//!
//! The engine emits one [`TelemetryRecord`](pestis_core::TelemetryRecord)
//! per step into whatever [`TelemetrySink`](pestis_core::TelemetrySink) it
//! was given. This crate provides the concrete sinks:
//!
//! - [`CsvSink`]: the downstream log format, one row per step with
//!   totals truncated to integers.
//! - [`MemorySink`]: keeps every record in memory, for tests and
//!   in-process analysis.
//!
//! and [`read_log()`] to parse a CSV log back into records.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod csv_sink;
pub mod error;
pub mod memory;
pub mod reader;

pub use csv_sink::{CsvSink, HEADER};
pub use error::TelemetryError;
pub use memory::MemorySink;
pub use reader::{read_log, read_log_file};
