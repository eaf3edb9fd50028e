//! Runtime error types: stepping and seeding.
//!
//! Construction-time errors live in [`config`](crate::config).

use std::error::Error;
use std::fmt;

use pestis_core::{GridError, SinkError};

/// Errors from [`Simulation::update()`](crate::Simulation::update).
#[derive(Debug)]
pub enum StepError {
    /// The telemetry sink rejected this step's record. The grids have
    /// already advanced; only the log row is missing.
    Telemetry(SinkError),
    /// A band worker died before returning its band. No grid was
    /// modified for this step.
    WorkerLost {
        /// Index of the band that was not returned.
        band: usize,
    },
    /// A band did not match the rows it was cut from. No grid was
    /// modified for this step.
    BandLayout {
        /// Index of the offending band.
        band: usize,
        /// What did not fit.
        source: GridError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telemetry(e) => write!(f, "telemetry write failed: {e}"),
            Self::WorkerLost { band } => write!(f, "band worker lost while processing band {band}"),
            Self::BandLayout { band, source } => write!(f, "band {band} layout: {source}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Telemetry(e) => Some(e),
            Self::WorkerLost { .. } => None,
            Self::BandLayout { source, .. } => Some(source),
        }
    }
}

impl From<SinkError> for StepError {
    fn from(e: SinkError) -> Self {
        Self::Telemetry(e)
    }
}

/// Errors from resolving an [`OutbreakRequest`](crate::OutbreakRequest).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedError {
    /// The place name is unknown to the resolver or projects off-grid.
    UnknownPlace {
        /// The name as given.
        name: String,
    },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlace { name } => write!(f, "unknown place '{name}'"),
        }
    }
}

impl Error for SeedError {}
