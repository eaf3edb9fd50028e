//! CSV telemetry log.
//!
//! One header row, then one row per step:
//!
//! ```text
//! Second,Healthy,Exposed,Infected,Recovered,Dead
//! 1,999900,100,0,0,0
//! ```
//!
//! Totals are truncated toward zero to whole numbers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pestis_core::{SinkError, TelemetryRecord, TelemetrySink};

/// Column names, in row order.
pub const HEADER: [&str; 6] = ["Second", "Healthy", "Exposed", "Infected", "Recovered", "Dead"];

/// Writes telemetry rows to any [`Write`].
///
/// The header is written on construction. Every row is flushed through
/// to the underlying writer before [`append`](TelemetrySink::append)
/// returns, so a failed write is reported for the step that produced it.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) a log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        log::debug!("writing telemetry to {}", path.display());
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap `inner` and write the header row.
    ///
    /// # Errors
    ///
    /// [`SinkError::Io`] if the header cannot be written through.
    pub fn new(inner: W) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(HEADER).map_err(sink_error)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Data rows written so far, excluding the header.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|e| {
            let cause = e.error();
            SinkError::Io(io::Error::new(cause.kind(), cause.to_string()))
        })
    }
}

impl<W: Write> TelemetrySink for CsvSink<W> {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        let totals = record.totals().as_array();
        let mut row = Vec::with_capacity(HEADER.len());
        row.push(record.tick.0.to_string());
        row.extend(totals.iter().map(|&v| (v as u64).to_string()));
        self.writer.write_record(&row).map_err(sink_error)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for CsvSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("rows", &self.rows)
            .finish()
    }
}

fn sink_error(e: csv::Error) -> SinkError {
    let detail = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => SinkError::Io(io),
        _ => SinkError::Encode { detail },
    }
}
