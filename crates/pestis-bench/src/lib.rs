//! Benchmark profiles for the Pestis epidemic simulator.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarks and examples:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), COVID-19
//! - [`stress_profile`]: 360x180 grid (~65K cells, one-degree cells), measles
//! - [`reference_density`]: deterministic uneven populations with empty
//!   ocean-like cells and a few large hubs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pestis_core::{DensityGrid, DiseaseProfile};
use pestis_engine::SimConfig;

/// Deterministic `width x height` population grid.
///
/// About a third of cells are empty; every 997th cell is a hub of
/// 250000 or more; the rest hold up to 20000 people.
pub fn reference_density(width: u32, height: u32) -> DensityGrid {
    let values = (0..u64::from(width) * u64::from(height))
        .map(|i| {
            let h = i.wrapping_mul(6_364_136_223_846_793_005) >> 33;
            if i % 997 == 0 {
                250_000.0 + (h % 1_000_000) as f64
            } else if h % 3 == 0 {
                0.0
            } else {
                (h % 20_000) as f64
            }
        })
        .collect();
    DensityGrid::new(width, height, values).expect("reference density is valid")
}

/// Build a reference benchmark profile: 100x100 grid (10K cells).
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig::new(DiseaseProfile::covid19(), reference_density(100, 100), seed)
}

/// Build a stress profile: 360x180 grid (64800 cells).
pub fn stress_profile(seed: u64) -> SimConfig {
    SimConfig::new(DiseaseProfile::measles(), reference_density(360, 180), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestis_core::NullSink;
    use pestis_engine::Simulation;

    #[test]
    fn reference_profile_validates_and_steps() {
        let mut sim = Simulation::new(reference_profile(1), NullSink).unwrap();
        assert!(sim.seed(50, 50, 10));
        for _ in 0..10 {
            sim.update().unwrap();
        }
        assert_eq!(sim.tick().0, 10);
    }

    #[test]
    fn density_is_deterministic_with_hubs() {
        let a = reference_density(100, 100);
        assert_eq!(a, reference_density(100, 100));
        assert!(!a.cells_above(100_000.0).is_empty());
        assert!(a.values().iter().any(|&v| v == 0.0));
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile(0).validate().unwrap();
    }
}
