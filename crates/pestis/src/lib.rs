//! Pestis: a grid-based SEIRD epidemic simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Pestis sub-crates. For most users, adding `pestis` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pestis::prelude::*;
//!
//! // One city of 10000 on a 64x32 grid.
//! let density = DensityGrid::from_cells(64, 32, [(CellCoord::new(40, 12), 10_000.0)]).unwrap();
//! let disease = DiseaseProfile::preset("influenza").unwrap();
//! let config = SimConfig::new(disease, density, 42);
//! let mut sim = Simulation::new(config, MemorySink::new()).unwrap();
//!
//! assert!(sim.seed(40, 12, 2));
//! let summary = sim.run_until(StopCondition::InfectedAtLeast(1.0), 1_000_000).unwrap();
//! assert_eq!(summary.reason, StopReason::ConditionMet);
//! assert_eq!(sim.sink().len() as u64, summary.ticks_run);
//! println!("first case at {}", sim.elapsed());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pestis-core` | IDs, disease profiles, grids, telemetry trait, places |
//! | [`engine`] | `pestis-engine` | `Simulation`, configuration, air travel, seeding |
//! | [`telemetry`] | `pestis-telemetry` | CSV and in-memory sinks, log reader |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`pestis-core`).
///
/// Contains [`types::DiseaseProfile`] and its presets, the
/// [`types::DensityGrid`] and [`types::CompartmentGrids`], the
/// [`types::TelemetrySink`] trait, and the [`types::PlaceTable`] gazetteer.
pub use pestis_core as types;

/// The simulation engine (`pestis-engine`).
///
/// [`engine::Simulation`] advances the world one simulated second per
/// update; [`engine::SimConfig`] configures it.
pub use pestis_engine as engine;

/// Telemetry sinks (`pestis-telemetry`).
///
/// [`telemetry::CsvSink`] writes the downstream log format,
/// [`telemetry::read_log`] reads it back.
pub use pestis_telemetry as telemetry;

/// Common imports for typical Pestis usage.
///
/// ```rust
/// use pestis::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use pestis_core::{
        CellCoord, CellState, Compartment, CompartmentGrids, DensityGrid, DiseaseProfile, Place,
        PlaceResolver, PlaceTable, TelemetryRecord, TelemetrySink, TickId, Totals,
    };

    // Errors
    pub use pestis_core::{GridError, ProfileError, SinkError};
    pub use pestis_engine::{ConfigError, SeedError, StepError};

    // Engine
    pub use pestis_engine::{
        AirRoute, AirTravelConfig, Elapsed, OutbreakRequest, RunSummary, SeedingConfig, SimConfig,
        Simulation, StepMetrics, StopCondition, StopReason,
    };

    // Telemetry
    pub use pestis_core::NullSink;
    pub use pestis_telemetry::{CsvSink, MemorySink};
}
