//! Outbreak seeding: turning a point-and-radius request into initial
//! Exposed mass.
//!
//! The seeded region is the half-open square
//! `[cx - r, cx + r) x [cy - r, cy + r)`, clipped to the grid. Each
//! populated cell in it moves `min(susceptible, cap)` from Susceptible to
//! Exposed. Coordinates off the grid are clipped, never an error.

use pestis_core::{Compartment, CompartmentGrids};

/// Where to start an outbreak.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutbreakRequest {
    /// Explicit grid coordinates. May lie partly or wholly off-grid.
    At {
        /// Column of the centre.
        x: i64,
        /// Row of the centre.
        y: i64,
        /// Half-width of the seeded square.
        radius: u32,
    },
    /// A place name, resolved through a
    /// [`PlaceResolver`](pestis_core::PlaceResolver).
    Place {
        /// Name to resolve.
        name: String,
        /// Half-width of the seeded square.
        radius: u32,
    },
}

impl OutbreakRequest {
    /// A coordinate request with the given radius.
    pub fn at(x: i64, y: i64, radius: u32) -> Self {
        Self::At { x, y, radius }
    }

    /// A place-name request with the given radius.
    pub fn place(name: impl Into<String>, radius: u32) -> Self {
        Self::Place {
            name: name.into(),
            radius,
        }
    }
}

/// What a seeding pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeedReport {
    /// Number of cells that received Exposed mass.
    pub cells_seeded: usize,
    /// Total mass moved from Susceptible to Exposed.
    pub moved: f64,
}

impl SeedReport {
    /// Whether at least one cell was seeded.
    pub fn seeded(&self) -> bool {
        self.cells_seeded > 0
    }
}

/// Clip `[center - radius, center + radius)` to `[0, len)`.
fn clip_axis(center: i64, radius: u32, len: u32) -> std::ops::Range<u32> {
    let lo = center.saturating_sub(i64::from(radius)).clamp(0, i64::from(len));
    let hi = center.saturating_add(i64::from(radius)).clamp(0, i64::from(len));
    lo as u32..hi.max(lo) as u32
}

/// Seed the square around `(center_x, center_y)`.
pub fn seed_square(
    grids: &mut CompartmentGrids,
    center_x: i64,
    center_y: i64,
    radius: u32,
    per_cell_cap: f64,
) -> SeedReport {
    let xs = clip_axis(center_x, radius, grids.width());
    let ys = clip_axis(center_y, radius, grids.height());
    let mut report = SeedReport::default();

    for y in ys {
        for x in xs.clone() {
            let Some(idx) = grids.index_of(x, y) else {
                continue;
            };
            let susceptible = grids.grid(Compartment::Susceptible)[idx];
            if susceptible > 0.0 {
                let amount = susceptible.min(per_cell_cap);
                grids.transfer(idx, Compartment::Susceptible, Compartment::Exposed, amount);
                report.cells_seeded += 1;
                report.moved += amount;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestis_core::{CellCoord, DensityGrid};
    use proptest::prelude::*;

    fn grids(width: u32, height: u32, cells: &[((u32, u32), f64)]) -> CompartmentGrids {
        let density = DensityGrid::from_cells(
            width,
            height,
            cells.iter().map(|&((x, y), p)| (CellCoord::new(x, y), p)),
        )
        .unwrap();
        CompartmentGrids::from_density(&density)
    }

    #[test]
    fn square_is_half_open() {
        let mut g = grids(10, 10, &[((4, 4), 50.0), ((5, 5), 50.0), ((6, 6), 50.0)]);
        let report = seed_square(&mut g, 5, 5, 1, 100.0);
        // Covers x, y in {4, 5}: (6, 6) is outside.
        assert_eq!(report.cells_seeded, 2);
        assert_eq!(report.moved, 100.0);
        assert_eq!(g.cell(g.index_of(6, 6).unwrap()).exposed, 0.0);
    }

    #[test]
    fn per_cell_cap_applies() {
        let mut g = grids(3, 3, &[((1, 1), 1000.0), ((0, 0), 30.0)]);
        let report = seed_square(&mut g, 1, 1, 2, 100.0);
        assert_eq!(report.cells_seeded, 2);
        assert_eq!(report.moved, 130.0);
        let c = g.cell(g.index_of(1, 1).unwrap());
        assert_eq!(c.susceptible, 900.0);
        assert_eq!(c.exposed, 100.0);
    }

    #[test]
    fn zero_population_region_is_not_seeded() {
        let mut g = grids(8, 8, &[((7, 7), 500.0)]);
        let before = g.clone();
        let report = seed_square(&mut g, 1, 1, 2, 100.0);
        assert!(!report.seeded());
        assert_eq!(g, before);
    }

    #[test]
    fn off_grid_request_is_clipped() {
        let mut g = grids(4, 4, &[((0, 0), 10.0)]);
        let report = seed_square(&mut g, -2, -2, 3, 100.0);
        assert_eq!(report.cells_seeded, 1);

        let mut g = grids(4, 4, &[((0, 0), 10.0)]);
        assert!(!seed_square(&mut g, 100, 100, 5, 100.0).seeded());
        assert!(!seed_square(&mut g, i64::MIN, i64::MAX, u32::MAX, 100.0).seeded());
    }

    #[test]
    fn zero_radius_seeds_nothing() {
        let mut g = grids(4, 4, &[((2, 2), 10.0)]);
        assert!(!seed_square(&mut g, 2, 2, 0, 100.0).seeded());
    }

    proptest! {
        #[test]
        fn seeding_moves_mass_without_creating_it(
            cx in -20i64..40,
            cy in -20i64..40,
            radius in 0u32..30,
            pops in proptest::collection::vec(0.0f64..500.0, 400),
        ) {
            let density = DensityGrid::new(20, 20, pops).unwrap();
            let mut g = CompartmentGrids::from_density(&density);
            let before = g.totals();
            let report = seed_square(&mut g, cx, cy, radius, 100.0);
            let after = g.totals();
            prop_assert!((after.population() - before.population()).abs() < 1e-6);
            prop_assert!((after.exposed - report.moved).abs() < 1e-6);
            prop_assert!(report.cells_seeded <= (2 * radius as usize).pow(2));
        }
    }
}
