//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the constructor input for a [`Simulation`](crate::Simulation).
//! [`validate()`](SimConfig::validate) checks every structural invariant
//! up front so that a run never starts in an undefined state.

use std::error::Error;
use std::fmt;

use pestis_core::{DensityGrid, DiseaseProfile, GridError, ProfileError};

use crate::rates::TransitionRates;

// ── AirTravelConfig ────────────────────────────────────────────────

/// Tuning for the long-distance ("air travel") transmission process.
///
/// The defaults reproduce the reference cadence: one attempt per
/// simulated hour, gated on more than a thousand infected worldwide.
#[derive(Clone, Debug, PartialEq)]
pub struct AirTravelConfig {
    /// Ticks between attempts. Default: 3600.
    pub cadence_ticks: u64,
    /// Attempts are skipped unless total infected exceeds this. Default: 1000.
    pub min_total_infected: f64,
    /// Fire probability is `transmission_air * probability_scale`. Default: 0.05.
    pub probability_scale: f64,
    /// A cell is a candidate source if its Infected exceeds this. Default: 10.
    pub source_min_infected: f64,
    /// A cell is a candidate target if its baseline population exceeds this.
    /// Default: 100000.
    pub target_min_population: f64,
    /// The target is only seeded if its Susceptible exceeds this. Default: 100.
    pub target_min_susceptible: f64,
    /// Mass moved Susceptible→Exposed at the target, at most. Default: 10.
    pub max_transfer: f64,
}

impl Default for AirTravelConfig {
    fn default() -> Self {
        Self {
            cadence_ticks: 3600,
            min_total_infected: 1000.0,
            probability_scale: 0.05,
            source_min_infected: 10.0,
            target_min_population: 100_000.0,
            target_min_susceptible: 100.0,
            max_transfer: 10.0,
        }
    }
}

impl AirTravelConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::InvalidAirTravel { reason });
        if self.cadence_ticks == 0 {
            return invalid("cadence_ticks must be >= 1".into());
        }
        if !(0.0..=1.0).contains(&self.probability_scale) {
            return invalid(format!(
                "probability_scale must be in [0, 1], got {}",
                self.probability_scale
            ));
        }
        for (name, value) in [
            ("min_total_infected", self.min_total_infected),
            ("source_min_infected", self.source_min_infected),
            ("target_min_population", self.target_min_population),
            ("target_min_susceptible", self.target_min_susceptible),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        if !self.max_transfer.is_finite() || self.max_transfer <= 0.0 {
            return invalid(format!(
                "max_transfer must be finite and > 0, got {}",
                self.max_transfer
            ));
        }
        Ok(())
    }
}

// ── SeedingConfig ──────────────────────────────────────────────────

/// Tuning for the outbreak seeder.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedingConfig {
    /// Mass moved Susceptible→Exposed per seeded cell, at most. Default: 100.
    pub per_cell_cap: f64,
    /// Radius used by
    /// [`Simulation::seed_default()`](crate::Simulation::seed_default).
    /// Default: 5.
    pub default_radius: u32,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            per_cell_cap: 100.0,
            default_radius: 5,
        }
    }
}

impl SeedingConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.per_cell_cap.is_finite() || self.per_cell_cap <= 0.0 {
            return Err(ConfigError::InvalidSeeding {
                reason: format!(
                    "per_cell_cap must be finite and > 0, got {}",
                    self.per_cell_cap
                ),
            });
        }
        Ok(())
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything needed to construct a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// The pathogen for this run.
    pub disease: DiseaseProfile,
    /// Baseline population per cell.
    pub density: DensityGrid,
    /// Seed for the long-distance transmission random source.
    pub seed: u64,
    /// Number of row-bands (and worker threads). `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 10]`).
    pub band_count: Option<usize>,
    /// Long-distance transmission tuning.
    pub air_travel: AirTravelConfig,
    /// Outbreak seeder tuning.
    pub seeding: SeedingConfig,
}

impl SimConfig {
    /// A config with default tuning and auto-detected band count.
    pub fn new(disease: DiseaseProfile, density: DensityGrid, seed: u64) -> Self {
        Self {
            disease,
            density,
            seed,
            band_count: None,
            air_travel: AirTravelConfig::default(),
            seeding: SeedingConfig::default(),
        }
    }

    /// Resolve the number of row-bands, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`. The result never exceeds
    /// the grid height, so no band is ever empty.
    pub fn resolved_band_count(&self) -> usize {
        let requested = match self.band_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 10),
        };
        requested.min(self.density.height() as usize)
    }

    /// Validate the disease, tuning structs, and rate stability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.disease.validate()?;
        self.air_travel.validate()?;
        self.seeding.validate()?;
        TransitionRates::from_profile(&self.disease).check_stable()?;
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing a [`Simulation`](crate::Simulation).
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The disease profile has an out-of-range parameter.
    Profile(ProfileError),
    /// The density grid is malformed.
    Grid(GridError),
    /// A per-second rate would exceed 1, making the explicit update
    /// overshoot a compartment.
    UnstableRates {
        /// Which rate and its value.
        reason: String,
    },
    /// [`AirTravelConfig`] invariant violated.
    InvalidAirTravel {
        /// Description of which invariant was violated.
        reason: String,
    },
    /// [`SeedingConfig`] invariant violated.
    InvalidSeeding {
        /// Description of which invariant was violated.
        reason: String,
    },
    /// A band worker thread could not be spawned.
    ThreadSpawnFailed {
        /// The OS error message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(e) => write!(f, "invalid disease profile: {e}"),
            Self::Grid(e) => write!(f, "invalid density grid: {e}"),
            Self::UnstableRates { reason } => write!(f, "unstable transition rates: {reason}"),
            Self::InvalidAirTravel { reason } => write!(f, "invalid air travel config: {reason}"),
            Self::InvalidSeeding { reason } => write!(f, "invalid seeding config: {reason}"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn band worker: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Profile(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProfileError> for ConfigError {
    fn from(e: ProfileError) -> Self {
        Self::Profile(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        let density = DensityGrid::new(4, 3, vec![1.0; 12]).unwrap();
        SimConfig::new(DiseaseProfile::covid19(), density, 7)
    }

    #[test]
    fn defaults_validate() {
        config().validate().unwrap();
        assert_eq!(AirTravelConfig::default().cadence_ticks, 3600);
        assert_eq!(SeedingConfig::default().per_cell_cap, 100.0);
    }

    #[test]
    fn band_count_clamped_to_height() {
        let mut c = config();
        c.band_count = Some(8);
        assert_eq!(c.resolved_band_count(), 3);
        c.band_count = Some(0);
        assert_eq!(c.resolved_band_count(), 1);
        c.band_count = Some(2);
        assert_eq!(c.resolved_band_count(), 2);
    }

    #[test]
    fn auto_band_count_is_bounded() {
        let density = DensityGrid::new(1, 100, vec![0.0; 100]).unwrap();
        let c = SimConfig::new(DiseaseProfile::influenza(), density, 0);
        let n = c.resolved_band_count();
        assert!((1..=10).contains(&n), "got {n}");
    }

    #[test]
    fn zero_cadence_rejected() {
        let mut c = config();
        c.air_travel.cadence_ticks = 0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidAirTravel { .. })
        ));
    }

    #[test]
    fn bad_probability_scale_rejected() {
        let mut c = config();
        c.air_travel.probability_scale = 1.5;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidAirTravel { .. })
        ));
    }

    #[test]
    fn bad_seeding_rejected() {
        let mut c = config();
        c.seeding.per_cell_cap = 0.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidSeeding { .. })
        ));
    }

    #[test]
    fn runaway_infectivity_rejected() {
        let mut c = config();
        c.disease = DiseaseProfile::builder("runaway")
            .infectivity(2.0)
            .incubation_period_days(1.0)
            .infection_duration_days(1.0)
            .build()
            .unwrap();
        assert!(matches!(
            c.validate(),
            Err(ConfigError::UnstableRates { .. })
        ));
    }

    #[test]
    fn grid_error_converts() {
        let err: ConfigError = DensityGrid::new(0, 0, vec![]).unwrap_err().into();
        assert!(matches!(err, ConfigError::Grid(GridError::EmptyDimensions { .. })));
        assert!(err.source().is_some());
    }
}
