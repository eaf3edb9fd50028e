//! The simulation world.
//!
//! [`Simulation`] is the primary user-facing API. It owns the five
//! compartment grids, the band worker pool, the random source for
//! long-distance transmission, and the injected telemetry sink. Each
//! call to [`update()`](Simulation::update) advances the world by one
//! simulated second.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] when its sink is. All mutating methods take
//! `&mut self` and all read accessors borrow from `self`, so a caller
//! can never observe grids, totals, or the air-route record while a step
//! is in flight.
//!
//! # Shutdown
//!
//! Dropping a `Simulation` flushes the sink, then closes the band task
//! channel and joins every worker thread. A flush failure at that point
//! has no caller to return to and is logged at error level; call
//! [`flush_telemetry()`](Simulation::flush_telemetry) or
//! [`into_sink()`](Simulation::into_sink) first to handle it yourself.

use std::time::Instant;

use log::{debug, error, info, trace, warn};
use pestis_core::{
    CompartmentGrids, DensityGrid, DiseaseProfile, NullSink, PlaceResolver, SinkError,
    TelemetryRecord, TelemetrySink, TickId, Totals,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::air_travel::{AirRoute, AirTravel};
use crate::clock::Elapsed;
use crate::config::{ConfigError, SeedingConfig, SimConfig};
use crate::error::{SeedError, StepError};
use crate::metrics::StepMetrics;
use crate::pool::BandPool;
use crate::rates::TransitionRates;
use crate::seeder::{seed_square, OutbreakRequest};
use crate::stop::{RunSummary, StopCondition, StopReason};

// Compile-time assertion: Simulation is Send for a Send sink.
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation<NullSink>>();
    }
};

// ── Simulation ─────────────────────────────────────────────────────

/// A SEIRD epidemic running on a population grid.
///
/// # Examples
///
/// ```
/// use pestis_core::{CellCoord, DensityGrid, DiseaseProfile, NullSink};
/// use pestis_engine::{SimConfig, Simulation};
///
/// let density = DensityGrid::from_cells(3, 3, [(CellCoord::new(1, 1), 1000.0)]).unwrap();
/// let config = SimConfig::new(DiseaseProfile::covid19(), density, 42);
/// let mut sim = Simulation::new(config, NullSink).unwrap();
///
/// assert!(sim.seed(1, 1, 1));
/// assert_eq!(sim.totals().exposed, 100.0);
///
/// sim.update().unwrap();
/// assert_eq!(sim.tick().0, 1);
/// ```
pub struct Simulation<S: TelemetrySink = NullSink> {
    disease: DiseaseProfile,
    density: DensityGrid,
    rates: TransitionRates,
    grids: CompartmentGrids,
    totals: Totals,
    overlay: Vec<f64>,
    tick: TickId,
    rng: ChaCha8Rng,
    rng_seed: u64,
    air_travel: AirTravel,
    seeding: SeedingConfig,
    pool: BandPool,
    // Only `into_sink` takes this, and it consumes the world.
    sink: Option<S>,
    last_metrics: StepMetrics,
}

impl<S: TelemetrySink> Simulation<S> {
    /// Create a world at tick 0 with every living cell fully Susceptible.
    ///
    /// Validates the configuration and spawns the band workers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the disease profile or tuning is out of
    /// range, the derived rates are unstable, or a worker thread cannot be
    /// spawned.
    pub fn new(config: SimConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let band_count = config.resolved_band_count();
        let SimConfig {
            disease,
            density,
            seed,
            air_travel,
            seeding,
            ..
        } = config;

        let rates = TransitionRates::from_profile(&disease);
        let pool = BandPool::new(density.height(), band_count)?;
        let grids = CompartmentGrids::from_density(&density);
        let air_travel = AirTravel::new(air_travel, &density);

        info!(
            "simulation created: {}x{} grid, {} bands, {} hubs, disease '{}', seed {seed}",
            density.width(),
            density.height(),
            pool.band_count(),
            air_travel.hubs().len(),
            disease.name(),
        );

        Ok(Self {
            totals: grids.totals(),
            overlay: grids.active_overlay(),
            disease,
            density,
            rates,
            grids,
            tick: TickId::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            rng_seed: seed,
            air_travel,
            seeding,
            pool,
            sink: Some(sink),
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Seeding ────────────────────────────────────────────────────

    /// Seed an outbreak in the square of half-width `radius` around
    /// `(center_x, center_y)`.
    ///
    /// Each populated cell in the region moves up to the per-cell cap from
    /// Susceptible to Exposed. Coordinates may lie partly or wholly off
    /// the grid. Returns `false` if no cell was seeded.
    pub fn seed(&mut self, center_x: i64, center_y: i64, radius: u32) -> bool {
        let report = seed_square(
            &mut self.grids,
            center_x,
            center_y,
            radius,
            self.seeding.per_cell_cap,
        );
        if !report.seeded() {
            warn!("no populated cells within radius {radius} of ({center_x}, {center_y})");
            return false;
        }
        self.refresh_aggregates();
        info!(
            "seeded {} cells around ({center_x}, {center_y}), {} exposed",
            report.cells_seeded, report.moved
        );
        true
    }

    /// [`seed()`](Self::seed) with the configured default radius.
    pub fn seed_default(&mut self, center_x: i64, center_y: i64) -> bool {
        self.seed(center_x, center_y, self.seeding.default_radius)
    }

    /// Resolve `request` and seed it.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::UnknownPlace`] if a place name cannot be
    /// resolved. A resolvable request that finds nothing to seed is
    /// `Ok(false)`.
    pub fn seed_request(
        &mut self,
        request: &OutbreakRequest,
        resolver: &dyn PlaceResolver,
    ) -> Result<bool, SeedError> {
        match request {
            OutbreakRequest::At { x, y, radius } => Ok(self.seed(*x, *y, *radius)),
            OutbreakRequest::Place { name, radius } => {
                let cell = resolver
                    .resolve(name)
                    .ok_or_else(|| SeedError::UnknownPlace { name: name.clone() })?;
                debug!("resolved '{name}' to {cell}");
                Ok(self.seed(i64::from(cell.x), i64::from(cell.y), *radius))
            }
        }
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance the world by one simulated second.
    ///
    /// Runs the band update, then (on cadence) one long-distance
    /// transmission attempt, then recomputes aggregates and appends one
    /// telemetry record.
    ///
    /// # Errors
    ///
    /// [`StepError::WorkerLost`] and [`StepError::BandLayout`] leave the
    /// world exactly as it was.
    /// [`StepError::Telemetry`] is raised after the step has been applied:
    /// the tick has advanced and only the log row is missing.
    pub fn update(&mut self) -> Result<StepMetrics, StepError> {
        let step_start = Instant::now();

        self.pool.step(&mut self.grids, self.rates)?;
        let band_us = step_start.elapsed().as_micros() as u64;
        self.tick = self.tick.next();

        let mut air_travel_us = 0;
        let mut air_travel_fired = false;
        if self.air_travel.is_due(self.tick) {
            let air_start = Instant::now();
            air_travel_fired = self
                .air_travel
                .attempt(
                    self.tick,
                    &mut self.grids,
                    self.disease.transmission_air(),
                    &mut self.rng,
                )
                .is_some();
            air_travel_us = air_start.elapsed().as_micros() as u64;
        }

        let telemetry_start = Instant::now();
        self.refresh_aggregates();
        let record = TelemetryRecord::new(self.tick, self.totals);
        let appended = self.sink_mut().append(&record);
        let telemetry_us = telemetry_start.elapsed().as_micros() as u64;

        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            band_us,
            air_travel_us,
            telemetry_us,
            band_count: self.pool.band_count(),
            air_travel_fired,
        };
        self.last_metrics = metrics.clone();
        trace!(
            "tick {}: S={} E={} I={} R={} D={} ({} us)",
            self.tick,
            self.totals.healthy,
            self.totals.exposed,
            self.totals.infected,
            self.totals.recovered,
            self.totals.dead,
            metrics.total_us
        );

        appended?;
        Ok(metrics)
    }

    /// Step until `condition` holds or `max_ticks` steps have run.
    ///
    /// The condition is checked before the first step, so a run whose
    /// condition already holds executes nothing.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run_until(
        &mut self,
        condition: StopCondition,
        max_ticks: u64,
    ) -> Result<RunSummary, StepError> {
        let mut ticks_run = 0;
        let reason = loop {
            if condition.is_met(self.tick, &self.totals) {
                break StopReason::ConditionMet;
            }
            if ticks_run == max_ticks {
                break StopReason::TickLimit;
            }
            self.update()?;
            ticks_run += 1;
        };
        info!(
            "run ended at {} after {ticks_run} ticks ({reason:?})",
            self.elapsed()
        );
        Ok(RunSummary {
            ticks_run,
            reason,
            final_totals: self.totals,
        })
    }

    /// Return the world to tick 0 with a new seed.
    ///
    /// All mass goes back into Susceptible from the density grid, the
    /// air-route record is cleared, and the random source is reseeded.
    /// The sink is left untouched.
    pub fn reset(&mut self, seed: u64) {
        self.grids = CompartmentGrids::from_density(&self.density);
        self.refresh_aggregates();
        self.tick = TickId::default();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.rng_seed = seed;
        self.air_travel.clear_routes();
        self.last_metrics = StepMetrics::default();
        info!("simulation reset with seed {seed}");
    }

    fn refresh_aggregates(&mut self) {
        self.totals = self.grids.totals();
        self.grids.write_active_overlay(&mut self.overlay);
    }

    // ── Read access ────────────────────────────────────────────────

    /// Steps completed since construction or the last reset.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Simulated seconds elapsed. One tick is one second.
    pub fn seconds_elapsed(&self) -> u64 {
        self.tick.0
    }

    /// Simulated time elapsed, for display.
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::from_seconds(self.tick.0)
    }

    /// Aggregates as of the last completed step or seeding.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// The authoritative compartment grids.
    pub fn grids(&self) -> &CompartmentGrids {
        &self.grids
    }

    /// Infected + Exposed per cell, row-major.
    pub fn active_overlay(&self) -> &[f64] {
        &self.overlay
    }

    /// Long-distance transmissions recorded so far, oldest first.
    pub fn air_routes(&self) -> &[AirRoute] {
        self.air_travel.routes()
    }

    /// The pathogen for this run.
    pub fn disease(&self) -> &DiseaseProfile {
        &self.disease
    }

    /// The immutable baseline population.
    pub fn density(&self) -> &DensityGrid {
        &self.density
    }

    /// Per-second transition rates derived from the disease.
    pub fn rates(&self) -> TransitionRates {
        self.rates
    }

    /// Number of row-bands (and worker threads).
    pub fn band_count(&self) -> usize {
        self.pool.band_count()
    }

    /// Seed the random source was last initialised with.
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The telemetry sink.
    pub fn sink(&self) -> &S {
        match &self.sink {
            Some(sink) => sink,
            None => unreachable!("sink taken from a live simulation"),
        }
    }

    /// The telemetry sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        match &mut self.sink {
            Some(sink) => sink,
            None => unreachable!("sink taken from a live simulation"),
        }
    }

    /// Flush buffered telemetry.
    pub fn flush_telemetry(&mut self) -> Result<(), SinkError> {
        self.sink_mut().flush()
    }

    /// Shut down the workers and hand back the sink, unflushed.
    pub fn into_sink(mut self) -> S {
        match self.sink.take() {
            Some(sink) => sink,
            None => unreachable!("sink taken from a live simulation"),
        }
    }
}

impl<S: TelemetrySink> Drop for Simulation<S> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.flush() {
                error!("telemetry flush on drop failed at tick {}: {e}", self.tick);
            }
        }
    }
}

impl<S: TelemetrySink> std::fmt::Debug for Simulation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("disease", &self.disease.name())
            .field("width", &self.grids.width())
            .field("height", &self.grids.height())
            .field("tick", &self.tick)
            .field("band_count", &self.pool.band_count())
            .field("rng_seed", &self.rng_seed)
            .finish()
    }
}
