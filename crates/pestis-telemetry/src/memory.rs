//! In-memory sink.

use pestis_core::{SinkError, TelemetryRecord, TelemetrySink};

/// Keeps every record it receives, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemorySink {
    records: Vec<TelemetryRecord>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far, oldest first.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TelemetryRecord> {
        self.records.last()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been received.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the records out of the sink.
    pub fn into_records(self) -> Vec<TelemetryRecord> {
        self.records
    }
}

impl TelemetrySink for MemorySink {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        Ok(())
    }
}
