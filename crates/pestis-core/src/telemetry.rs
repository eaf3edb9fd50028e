//! Telemetry record and sink trait.
//!
//! The engine emits exactly one [`TelemetryRecord`] per step to an
//! injected [`TelemetrySink`]. Sinks own whatever output resource they
//! write to; the engine never touches global output state.

use crate::compartment::Totals;
use crate::error::SinkError;
use crate::id::TickId;

/// One per-step aggregate snapshot.
///
/// Field order is the stable log order consumed downstream:
/// tick, healthy, exposed, infected, recovered, dead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetryRecord {
    /// Tick index (simulated seconds elapsed).
    pub tick: TickId,
    /// Sum of the Susceptible grid.
    pub healthy: f64,
    /// Sum of the Exposed grid.
    pub exposed: f64,
    /// Sum of the Infected grid.
    pub infected: f64,
    /// Sum of the Recovered grid.
    pub recovered: f64,
    /// Sum of the Dead grid.
    pub dead: f64,
}

impl TelemetryRecord {
    /// Build a record from a tick and its totals.
    pub fn new(tick: TickId, totals: Totals) -> Self {
        Self {
            tick,
            healthy: totals.healthy,
            exposed: totals.exposed,
            infected: totals.infected,
            recovered: totals.recovered,
            dead: totals.dead,
        }
    }

    /// The five totals carried by this record.
    pub fn totals(&self) -> Totals {
        Totals {
            healthy: self.healthy,
            exposed: self.exposed,
            infected: self.infected,
            recovered: self.recovered,
            dead: self.dead,
        }
    }
}

/// Append-only consumer of per-step telemetry.
///
/// Errors are propagated to the caller of `update()`: silently dropping
/// rows would corrupt downstream analysis.
pub trait TelemetrySink {
    /// Append one record.
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError>;

    /// Flush buffered records to the underlying resource.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for &mut S {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        (**self).append(record)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for Box<S> {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        (**self).append(record)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// A sink that discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn append(&mut self, _record: &TelemetryRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(usize);

    impl TelemetrySink for Counting {
        fn append(&mut self, _record: &TelemetryRecord) -> Result<(), SinkError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn record_round_trips_totals() {
        let totals = Totals {
            healthy: 1.0,
            exposed: 2.0,
            infected: 3.0,
            recovered: 4.0,
            dead: 5.0,
        };
        let r = TelemetryRecord::new(TickId(7), totals);
        assert_eq!(r.tick, TickId(7));
        assert_eq!(r.totals(), totals);
    }

    fn emit<S: TelemetrySink>(mut sink: S, rec: &TelemetryRecord) {
        sink.append(rec).unwrap();
    }

    #[test]
    fn borrowed_and_boxed_sinks_forward() {
        let mut c = Counting(0);
        let rec = TelemetryRecord::new(TickId(1), Totals::default());
        emit(&mut c, &rec);
        let mut boxed: Box<dyn TelemetrySink> = Box::new(NullSink);
        boxed.append(&rec).unwrap();
        boxed.flush().unwrap();
        assert_eq!(c.0, 1);
    }
}
