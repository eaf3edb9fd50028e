//! Pestis headless run: a synthetic world, one outbreak, a CSV log.
//!
//! Demonstrates:
//!   1. Building a density grid from a handful of cities
//!   2. Resolving an outbreak location through a place table
//!   3. Running to a stop condition with a CSV telemetry sink
//!   4. Reading the log back
//!
//! Run with:
//!   cargo run --example headless [disease]

use pestis_core::{place, CellCoord, DensityGrid, DiseaseProfile, Place, PlaceTable};
use pestis_engine::{OutbreakRequest, SimConfig, Simulation, StopCondition};
use pestis_telemetry::{read_log_file, CsvSink};

// ─── Grid parameters ────────────────────────────────────────────

// Five-degree cells.
const WIDTH: u32 = 72;
const HEIGHT: u32 = 36;
const MAX_DAYS: u64 = 5;

// ─── A small gazetteer ──────────────────────────────────────────

const CITIES: &[(&str, f64, f64, f64)] = &[
    ("Tokyo", 35.68, 139.69, 37_400_000.0),
    ("Delhi", 28.70, 77.10, 31_000_000.0),
    ("Shanghai", 31.23, 121.47, 27_000_000.0),
    ("São Paulo", -23.55, -46.63, 22_000_000.0),
    ("Cairo", 30.04, 31.24, 21_000_000.0),
    ("New York", 40.71, -74.01, 18_800_000.0),
    ("Lagos", 6.52, 3.38, 14_800_000.0),
    ("Paris", 48.86, 2.35, 11_000_000.0),
];

fn ascii(name: &str) -> String {
    name.replace('ã', "a")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let disease_name = std::env::args().nth(1).unwrap_or_else(|| "COVID-19".into());
    let disease = DiseaseProfile::preset(&disease_name).ok_or_else(|| {
        let names: Vec<String> = DiseaseProfile::presets()
            .iter()
            .map(|d| d.name().to_owned())
            .collect();
        format!("unknown disease '{disease_name}', try one of: {}", names.join(", "))
    })?;

    // Each city spreads over its cell and the four neighbours, with a
    // thin rural population everywhere.
    let mut cells = Vec::new();
    for &(_, lat, lon, pop) in CITIES {
        let Some(c) = place::project_equirectangular(lat, lon, WIDTH, HEIGHT) else {
            continue;
        };
        cells.push((c, pop * 0.6));
        for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
            let x = i64::from(c.x) + dx;
            let y = i64::from(c.y) + dy;
            if (0..i64::from(WIDTH)).contains(&x) && (0..i64::from(HEIGHT)).contains(&y) {
                cells.push((CellCoord::new(x as u32, y as u32), pop * 0.1));
            }
        }
    }
    let rural = (0..WIDTH * HEIGHT).map(|i| (CellCoord::from_index(i as usize, WIDTH), 50.0));
    let density = DensityGrid::from_cells(WIDTH, HEIGHT, cells.into_iter().chain(rural))?;

    let mut places = PlaceTable::new(WIDTH, HEIGHT);
    places.extend(CITIES.iter().map(|&(name, lat, lon, pop)| Place {
        name: name.into(),
        ascii_name: ascii(name),
        lat,
        lon,
        population: Some(pop),
    }));

    let log_path = std::env::temp_dir().join("pestis-headless.csv");
    let config = SimConfig::new(disease, density, 42);
    let mut sim = Simulation::new(config, CsvSink::create(&log_path)?)?;
    println!("{sim:?}");

    sim.seed_request(&OutbreakRequest::place("Sao Paulo", 3), &places)?;

    // ─── Run, one day at a time ─────────────────────────────────

    for day in 1..=MAX_DAYS {
        let summary = sim.run_until(StopCondition::Day(day), 86_400)?;
        let t = summary.final_totals;
        println!(
            "{}  S={:>12.0}  E={:>10.0}  I={:>10.0}  R={:>10.0}  D={:>8.0}  routes={}",
            sim.elapsed(),
            t.healthy,
            t.exposed,
            t.infected,
            t.recovered,
            t.dead,
            sim.air_routes().len(),
        );
    }
    for route in sim.air_routes() {
        println!(
            "  {}: {} -> {} ({} exposed)",
            pestis_engine::Elapsed::from_seconds(route.tick.0),
            route.source,
            route.target,
            route.amount
        );
    }
    println!("last step: {:?}", sim.last_metrics());

    sim.flush_telemetry()?;
    drop(sim);

    let records = read_log_file(&log_path)?;
    println!("{} telemetry rows in {}", records.len(), log_path.display());
    Ok(())
}
