//! Parallel SEIRD step engine for Pestis epidemic grid simulations.
//!
//! [`Simulation`] owns the compartment grids and advances them one
//! simulated second per [`update()`](Simulation::update):
//!
//! 1. Band update: the grid is split into contiguous row-bands which a
//!    persistent worker pool advances independently (the per-cell
//!    transition is purely pointwise).
//! 2. Long-distance transmission: on a fixed cadence, a single-threaded
//!    stochastic pass may seed a remote high-population cell.
//! 3. Aggregates are recomputed by exact summation and one telemetry
//!    record is emitted.
//!
//! All randomness is confined to step 2, on the calling thread, so runs
//! are reproducible for a fixed seed regardless of band count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod air_travel;
pub mod band;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub(crate) mod pool;
pub mod rates;
pub mod seeder;
pub mod stop;
pub mod world;

pub use air_travel::{AirRoute, AirTravel};
pub use band::{partition_rows, Band};
pub use clock::Elapsed;
pub use config::{AirTravelConfig, ConfigError, SeedingConfig, SimConfig};
pub use error::{SeedError, StepError};
pub use metrics::StepMetrics;
pub use rates::TransitionRates;
pub use seeder::{OutbreakRequest, SeedReport};
pub use stop::{RunSummary, StopCondition, StopReason};
pub use world::Simulation;
