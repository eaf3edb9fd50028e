//! Test fixtures and mock sinks for Pestis development.
//!
//! [`fixtures`] builds small density grids and fast-moving diseases so
//! that integration tests reach interesting states in a few thousand
//! ticks. [`FailingSink`] and [`SharedSink`] stand in for real telemetry
//! outputs; [`FailingWriter`] breaks the byte stream under a real one.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pestis_core::{SinkError, TelemetryRecord, TelemetrySink};

/// Accepts `succeed_count` records, then fails every append.
///
/// Failures are reported as [`SinkError::Encode`] so tests can tell them
/// apart from real I/O errors.
#[derive(Debug)]
pub struct FailingSink {
    pub succeed_count: usize,
    accepted: Vec<TelemetryRecord>,
    failures: usize,
}

impl FailingSink {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            accepted: Vec::new(),
            failures: 0,
        }
    }

    /// Records accepted before the sink started failing.
    pub fn accepted(&self) -> &[TelemetryRecord] {
        &self.accepted
    }

    /// Number of rejected appends.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl TelemetrySink for FailingSink {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        if self.accepted.len() < self.succeed_count {
            self.accepted.push(*record);
            return Ok(());
        }
        self.failures += 1;
        Err(SinkError::Encode {
            detail: format!("injected failure at tick {}", record.tick),
        })
    }
}

/// A [`Write`] that accepts `succeed_writes` write calls, then fails
/// every write with [`io::ErrorKind::Other`]. Flushing never fails on its
/// own, so any error is attributable to a write.
#[derive(Debug, Default)]
pub struct FailingWriter {
    pub succeed_writes: usize,
    written: Vec<u8>,
    failures: usize,
}

impl FailingWriter {
    pub fn new(succeed_writes: usize) -> Self {
        Self {
            succeed_writes,
            ..Self::default()
        }
    }

    /// Bytes accepted before the writer started failing.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Number of rejected writes.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.succeed_writes == 0 {
            self.failures += 1;
            return Err(io::Error::new(io::ErrorKind::Other, "injected write failure"));
        }
        self.succeed_writes -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A cloneable in-memory sink whose records can be inspected while the
/// simulation still owns a handle.
#[derive(Clone, Debug, Default)]
pub struct SharedSink {
    records: Arc<Mutex<Vec<TelemetryRecord>>>,
}

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, through any clone.
    pub fn records(&self) -> Vec<TelemetryRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TelemetrySink for SharedSink {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        let mut guard = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(*record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestis_core::{TickId, Totals};

    fn rec(t: u64) -> TelemetryRecord {
        TelemetryRecord::new(TickId(t), Totals::default())
    }

    #[test]
    fn failing_sink_fails_after_n() {
        let mut sink = FailingSink::new(2);
        assert!(sink.append(&rec(1)).is_ok());
        assert!(sink.append(&rec(2)).is_ok());
        assert!(matches!(sink.append(&rec(3)), Err(SinkError::Encode { .. })));
        assert_eq!(sink.accepted().len(), 2);
        assert_eq!(sink.failures(), 1);
    }

    #[test]
    fn shared_sink_visible_through_clone() {
        let mut sink = SharedSink::new();
        let observer = sink.clone();
        sink.append(&rec(1)).unwrap();
        assert_eq!(observer.records().len(), 1);
    }
}
