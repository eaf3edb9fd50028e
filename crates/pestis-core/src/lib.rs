//! Core types and traits for the Pestis epidemic grid simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data the engine operates on: identifiers, disease profiles, the
//! baseline density grid, the five compartment grids, the telemetry
//! record and sink trait, the place gazetteer, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compartment;
pub mod density;
pub mod disease;
pub mod error;
pub mod id;
pub mod place;
pub mod telemetry;

pub use compartment::{CellState, Compartment, CompartmentGrids, Totals};
pub use density::DensityGrid;
pub use disease::DiseaseProfile;
pub use error::{GridError, ProfileError, SinkError};
pub use id::{CellCoord, TickId};
pub use place::{Place, PlaceResolver, PlaceTable};
pub use telemetry::{NullSink, TelemetryRecord, TelemetrySink};
