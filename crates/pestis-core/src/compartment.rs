//! The five compartment grids and their derived aggregates.
//!
//! [`CompartmentGrids`] is the authoritative per-cell state of a run.
//! [`Totals`] are always recomputed from it by exact summation and are
//! never mutated on their own.

use std::fmt;
use std::ops::Range;

use crate::density::DensityGrid;
use crate::error::GridError;
use crate::id::CellCoord;

/// One of the five disjoint population buckets held by every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Compartment {
    /// Never infected; can be exposed.
    Susceptible,
    /// Infected but not yet infectious.
    Exposed,
    /// Infectious.
    Infected,
    /// Recovered and immune.
    Recovered,
    /// Dead. Excluded from the transmitting population.
    Dead,
}

impl Compartment {
    /// All compartments in canonical (telemetry) order.
    pub const ALL: [Compartment; 5] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::Recovered,
        Compartment::Dead,
    ];

    /// Lower-case name, used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Susceptible => "susceptible",
            Self::Exposed => "exposed",
            Self::Infected => "infected",
            Self::Recovered => "recovered",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The population of one cell split across the five compartments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellState {
    /// Susceptible mass.
    pub susceptible: f64,
    /// Exposed mass.
    pub exposed: f64,
    /// Infected mass.
    pub infected: f64,
    /// Recovered mass.
    pub recovered: f64,
    /// Dead mass.
    pub dead: f64,
}

impl CellState {
    /// Living population: everyone except the dead.
    pub fn living(&self) -> f64 {
        self.susceptible + self.exposed + self.infected + self.recovered
    }

    /// Total mass including the dead.
    pub fn total(&self) -> f64 {
        self.living() + self.dead
    }
}

/// Scalar aggregates over the whole grid, in telemetry order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
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

impl Totals {
    /// Total mass across all compartments.
    pub fn population(&self) -> f64 {
        self.healthy + self.exposed + self.infected + self.recovered + self.dead
    }

    /// The five totals as an array in telemetry order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.healthy,
            self.exposed,
            self.infected,
            self.recovered,
            self.dead,
        ]
    }
}

/// Five same-shaped row-major grids, one per [`Compartment`].
///
/// Also used as the working copy a band worker owns: a band is simply a
/// `CompartmentGrids` of the full width and the band's row count.
#[derive(Clone, Debug, PartialEq)]
pub struct CompartmentGrids {
    width: u32,
    height: u32,
    susceptible: Vec<f64>,
    exposed: Vec<f64>,
    infected: Vec<f64>,
    recovered: Vec<f64>,
    dead: Vec<f64>,
}

impl CompartmentGrids {
    /// Initial state for a run: all baseline mass is Susceptible.
    pub fn from_density(density: &DensityGrid) -> Self {
        let n = density.cell_count();
        Self {
            width: density.width(),
            height: density.height(),
            susceptible: density.values().to_vec(),
            exposed: vec![0.0; n],
            infected: vec![0.0; n],
            recovered: vec![0.0; n],
            dead: vec![0.0; n],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in each grid.
    pub fn cell_count(&self) -> usize {
        self.susceptible.len()
    }

    /// Row-major flat index for `(x, y)`, or `None` if out of bounds.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| CellCoord::new(x, y).index(self.width))
    }

    /// Read-only view of one compartment grid.
    pub fn grid(&self, compartment: Compartment) -> &[f64] {
        match compartment {
            Compartment::Susceptible => &self.susceptible,
            Compartment::Exposed => &self.exposed,
            Compartment::Infected => &self.infected,
            Compartment::Recovered => &self.recovered,
            Compartment::Dead => &self.dead,
        }
    }

    fn grid_mut(&mut self, compartment: Compartment) -> &mut [f64] {
        match compartment {
            Compartment::Susceptible => &mut self.susceptible,
            Compartment::Exposed => &mut self.exposed,
            Compartment::Infected => &mut self.infected,
            Compartment::Recovered => &mut self.recovered,
            Compartment::Dead => &mut self.dead,
        }
    }

    /// State of the cell at flat `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn cell(&self, index: usize) -> CellState {
        CellState {
            susceptible: self.susceptible[index],
            exposed: self.exposed[index],
            infected: self.infected[index],
            recovered: self.recovered[index],
            dead: self.dead[index],
        }
    }

    /// Overwrite the cell at flat `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn set_cell(&mut self, index: usize, state: CellState) {
        self.susceptible[index] = state.susceptible;
        self.exposed[index] = state.exposed;
        self.infected[index] = state.infected;
        self.recovered[index] = state.recovered;
        self.dead[index] = state.dead;
    }

    /// Move `amount` from one compartment to another at flat `index`.
    ///
    /// Mass is only relocated, never created. `amount` is taken as given;
    /// callers cap it to the source compartment's content.
    pub fn transfer(&mut self, index: usize, from: Compartment, to: Compartment, amount: f64) {
        self.grid_mut(from)[index] -= amount;
        self.grid_mut(to)[index] += amount;
    }

    /// Exact per-compartment sums over the whole grid.
    pub fn totals(&self) -> Totals {
        Totals {
            healthy: self.susceptible.iter().sum(),
            exposed: self.exposed.iter().sum(),
            infected: self.infected.iter().sum(),
            recovered: self.recovered.iter().sum(),
            dead: self.dead.iter().sum(),
        }
    }

    /// Infected + Exposed per cell, the combined overlay shown to viewers.
    pub fn active_overlay(&self) -> Vec<f64> {
        self.infected
            .iter()
            .zip(&self.exposed)
            .map(|(i, e)| i + e)
            .collect()
    }

    /// Write the [`active_overlay`](Self::active_overlay) into `out`
    /// without allocating. Only the first `min(out.len(), cell_count())`
    /// cells are written.
    pub fn write_active_overlay(&self, out: &mut [f64]) {
        for ((o, i), e) in out.iter_mut().zip(&self.infected).zip(&self.exposed) {
            *o = i + e;
        }
    }

    /// Copy the given rows out into an independent, band-sized grid set.
    ///
    /// # Errors
    ///
    /// [`GridError::BandOutOfRange`] if the rows are empty, reversed, or
    /// run past `height()`.
    pub fn extract_rows(&self, rows: Range<u32>) -> Result<CompartmentGrids, GridError> {
        if rows.start >= rows.end || rows.end > self.height {
            return Err(GridError::BandOutOfRange {
                start_row: rows.start,
                end_row: rows.end,
                height: self.height,
            });
        }
        let w = self.width as usize;
        let span = rows.start as usize * w..rows.end as usize * w;
        Ok(CompartmentGrids {
            width: self.width,
            height: rows.end - rows.start,
            susceptible: self.susceptible[span.clone()].to_vec(),
            exposed: self.exposed[span.clone()].to_vec(),
            infected: self.infected[span.clone()].to_vec(),
            recovered: self.recovered[span.clone()].to_vec(),
            dead: self.dead[span].to_vec(),
        })
    }

    /// Write a band produced by [`extract_rows`](Self::extract_rows) back,
    /// starting at `start_row`.
    ///
    /// Nothing is written on error.
    ///
    /// # Errors
    ///
    /// [`GridError::BandWidthMismatch`] if the band is not exactly as wide
    /// as this grid, [`GridError::BandOutOfRange`] if it would overrun the
    /// last row.
    pub fn write_rows(&mut self, start_row: u32, band: &CompartmentGrids) -> Result<(), GridError> {
        if band.width != self.width {
            return Err(GridError::BandWidthMismatch {
                expected: self.width,
                actual: band.width,
            });
        }
        let end_row = u64::from(start_row) + u64::from(band.height);
        if end_row > u64::from(self.height) {
            return Err(GridError::BandOutOfRange {
                start_row,
                end_row: u32::try_from(end_row).unwrap_or(u32::MAX),
                height: self.height,
            });
        }
        let w = self.width as usize;
        let start = start_row as usize * w;
        let span = start..start + band.cell_count();
        self.susceptible[span.clone()].copy_from_slice(&band.susceptible);
        self.exposed[span.clone()].copy_from_slice(&band.exposed);
        self.infected[span.clone()].copy_from_slice(&band.infected);
        self.recovered[span.clone()].copy_from_slice(&band.recovered);
        self.dead[span].copy_from_slice(&band.dead);
        Ok(())
    }
}
