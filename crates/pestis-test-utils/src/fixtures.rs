//! Reusable grids and diseases.
//!
//! - [`single_city`]: one populated cell on an otherwise empty grid.
//! - [`uniform`]: the same population everywhere.
//! - [`hub_and_town`]: a small infected town and a large hub, for
//!   long-distance transmission.
//! - [`patchwork`]: deterministic uneven populations with empty cells.
//! - [`fast_disease`] / [`harmless_disease`]: profiles with periods of a
//!   few minutes instead of days.

use pestis_core::{CellCoord, DensityGrid, DiseaseProfile};

pub fn single_city(width: u32, height: u32, x: u32, y: u32, population: f64) -> DensityGrid {
    DensityGrid::from_cells(width, height, [(CellCoord::new(x, y), population)])
        .expect("fixture grid is valid")
}

pub fn uniform(width: u32, height: u32, population: f64) -> DensityGrid {
    DensityGrid::new(width, height, vec![population; (width * height) as usize])
        .expect("fixture grid is valid")
}

/// 20 x 12 grid: a 50000-person town at (2, 2) and a 2-million hub at
/// (17, 9). Only the hub is above the default long-distance target
/// threshold.
pub fn hub_and_town() -> DensityGrid {
    DensityGrid::from_cells(
        20,
        12,
        [
            (CellCoord::new(2, 2), 50_000.0),
            (CellCoord::new(17, 9), 2_000_000.0),
        ],
    )
    .expect("fixture grid is valid")
}

/// Uneven populations with roughly one cell in five empty.
pub fn patchwork(width: u32, height: u32) -> DensityGrid {
    let values = (0..width * height)
        .map(|i| {
            let h = i.wrapping_mul(2_654_435_761) >> 7;
            if h % 5 == 0 {
                0.0
            } else {
                f64::from(h % 10_000)
            }
        })
        .collect();
    DensityGrid::new(width, height, values).expect("fixture grid is valid")
}

/// Spreads and resolves within minutes of simulated time.
pub fn fast_disease() -> DiseaseProfile {
    DiseaseProfile::builder("Fastpox")
        .infectivity(0.01)
        .severity(0.5)
        .lethality(0.2)
        .incubation_period_days(0.001)
        .infection_duration_days(0.002)
        .transmission_air(1.0)
        .build()
        .expect("fixture disease is valid")
}

/// Like [`fast_disease`] but never lethal.
pub fn harmless_disease() -> DiseaseProfile {
    DiseaseProfile::builder("Sniffles")
        .infectivity(0.01)
        .lethality(0.0)
        .incubation_period_days(0.001)
        .infection_duration_days(0.002)
        .build()
        .expect("fixture disease is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_well_formed() {
        assert_eq!(single_city(3, 3, 1, 1, 10.0).total(), 10.0);
        assert_eq!(uniform(4, 2, 5.0).total(), 40.0);
        assert_eq!(hub_and_town().cells_above(100_000.0), [CellCoord::new(17, 9)]);
        let p = patchwork(16, 16);
        assert!(p.values().iter().any(|&v| v == 0.0));
        assert!(p.values().iter().any(|&v| v > 0.0));
        fast_disease().validate().unwrap();
        assert_eq!(harmless_disease().lethality(), 0.0);
    }
}
