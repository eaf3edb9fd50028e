//! Reproducibility: fixed seed, fixed or varying band count.

use pestis_core::{DensityGrid, NullSink};
use pestis_engine::{AirRoute, AirTravelConfig, SimConfig, Simulation};
use pestis_telemetry::MemorySink;
use pestis_test_utils::fixtures;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

fn hub_config(seed: u64, bands: usize) -> SimConfig {
    let mut config = SimConfig::new(fixtures::fast_disease(), fixtures::hub_and_town(), seed);
    config.band_count = Some(bands);
    config.air_travel = AirTravelConfig {
        cadence_ticks: 60,
        probability_scale: 0.5,
        ..AirTravelConfig::default()
    };
    config
}

fn run(config: SimConfig, ticks: u64) -> (MemorySink, Vec<AirRoute>) {
    let mut sim = Simulation::new(config, MemorySink::new()).unwrap();
    assert!(sim.seed(2, 2, 1));
    for _ in 0..ticks {
        sim.update().unwrap();
    }
    let routes = sim.air_routes().to_vec();
    (sim.into_sink(), routes)
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn same_seed_same_records() {
    let (a, routes_a) = run(hub_config(2024, 3), 5_000);
    let (b, routes_b) = run(hub_config(2024, 3), 5_000);
    assert_eq!(a.len(), 5_000);
    assert_eq!(a.records(), b.records());
    assert_eq!(routes_a, routes_b);
    assert!(!routes_a.is_empty(), "expected long-distance events");
}

#[test]
fn band_count_does_not_change_results() {
    let (one, routes_one) = run(hub_config(8, 1), 4_000);
    for bands in [2, 4, 7, 12] {
        let (many, routes_many) = run(hub_config(8, bands), 4_000);
        assert_eq!(one.records(), many.records(), "bands = {bands}");
        assert_eq!(routes_one, routes_many, "bands = {bands}");
    }
}

#[test]
fn one_step_one_band_vs_four_bands() {
    let density = fixtures::patchwork(37, 23);
    let build = |bands| {
        let mut config = SimConfig::new(fixtures::fast_disease(), density.clone(), 0);
        config.band_count = Some(bands);
        let mut sim = Simulation::new(config, NullSink).unwrap();
        sim.seed(18, 11, 9);
        sim.update().unwrap();
        sim
    };
    let single = build(1);
    let quad = build(4);
    assert_eq!(single.band_count(), 1);
    assert_eq!(quad.band_count(), 4);
    assert_eq!(single.grids(), quad.grids());
}

#[test]
fn reset_replays_identically() {
    let mut sim = Simulation::new(hub_config(31, 2), MemorySink::new()).unwrap();
    sim.seed(2, 2, 1);
    for _ in 0..3_000 {
        sim.update().unwrap();
    }
    let first_routes = sim.air_routes().to_vec();
    let first_records = sim.sink().records().to_vec();

    sim.reset(31);
    sim.seed(2, 2, 1);
    for _ in 0..3_000 {
        sim.update().unwrap();
    }
    assert_eq!(sim.air_routes(), first_routes.as_slice());
    assert_eq!(&sim.sink().records()[3_000..], first_records.as_slice());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn band_invariance_over_random_counts(
        pops in proptest::collection::vec(0.0f64..5_000.0, 15 * 11),
        bands in 2usize..16,
        steps in 1usize..40,
    ) {
        let density = DensityGrid::new(15, 11, pops).unwrap();
        let advance = |bands| {
            let mut config = SimConfig::new(fixtures::fast_disease(), density.clone(), 3);
            config.band_count = Some(bands);
            let mut sim = Simulation::new(config, NullSink).unwrap();
            sim.seed(7, 5, 4);
            for _ in 0..steps {
                sim.update().unwrap();
            }
            sim.grids().clone()
        };
        prop_assert_eq!(advance(1), advance(bands));
    }
}
