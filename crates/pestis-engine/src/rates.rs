//! Transition rates and the pointwise per-cell update.
//!
//! Every flow of a tick is computed from the cell's tick-start state and
//! applied as a delta, the explicit-Euler discretisation of
//!
//! ```text
//! dS/dt = -S * beta * I / N
//! dE/dt =  S * beta * I / N - sigma * E
//! dI/dt =  sigma * E - (gamma + mu) * I
//! dR/dt =  gamma * I
//! dD/dt =  mu * I
//! ```
//!
//! with `N = S + E + I + R` (the dead do not transmit) and one tick equal
//! to one second. No cell reads any other cell, so splitting the grid
//! into row-bands and advancing them independently is exact.

use pestis_core::{CellState, CompartmentGrids, DiseaseProfile};

use crate::config::ConfigError;

/// Seconds per simulated day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-second rate constants derived from a [`DiseaseProfile`].
///
/// Constant for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRates {
    /// Susceptible→Exposed rate constant (`beta`), the profile's infectivity.
    pub exposure: f64,
    /// Exposed→Infected rate (`sigma = 1 / incubation`).
    pub infection: f64,
    /// Infected→Recovered rate (`gamma = (1 - lethality) / duration`).
    pub recovery: f64,
    /// Infected→Dead rate (`mu = lethality / duration`).
    pub death: f64,
}

impl TransitionRates {
    /// Derive the four rates from a disease profile.
    pub fn from_profile(disease: &DiseaseProfile) -> Self {
        let incubation_s = disease.incubation_period_days() * SECONDS_PER_DAY;
        let duration_s = disease.infection_duration_days() * SECONDS_PER_DAY;
        Self {
            exposure: disease.infectivity(),
            infection: 1.0 / incubation_s,
            recovery: (1.0 - disease.lethality()) / duration_s,
            death: disease.lethality() / duration_s,
        }
    }

    /// Reject rates for which a one-second step could drain a compartment
    /// below zero.
    pub fn check_stable(&self) -> Result<(), ConfigError> {
        let unstable = |reason: String| Err(ConfigError::UnstableRates { reason });
        if self.exposure > 1.0 {
            return unstable(format!("exposure rate {} > 1 per tick", self.exposure));
        }
        if self.infection > 1.0 {
            return unstable(format!("infection rate {} > 1 per tick", self.infection));
        }
        if self.recovery + self.death > 1.0 {
            return unstable(format!(
                "recovery + death rate {} > 1 per tick",
                self.recovery + self.death
            ));
        }
        Ok(())
    }

    /// Advance one cell by one tick.
    pub fn advance_cell(&self, c: CellState) -> CellState {
        // Nothing incubating or infectious: every flow is zero.
        if c.exposed == 0.0 && c.infected == 0.0 {
            return c;
        }

        let incubated = c.exposed * self.infection;
        let recovered = c.infected * self.recovery;
        let died = c.infected * self.death;

        let living = c.living();
        let divisor = if living == 0.0 { 1.0 } else { living };
        let pressure = c.infected / divisor * self.exposure;
        let exposed = c.susceptible * pressure;

        CellState {
            susceptible: c.susceptible - exposed,
            exposed: c.exposed + exposed - incubated,
            infected: c.infected + incubated - recovered - died,
            recovered: c.recovered + recovered,
            dead: c.dead + died,
        }
    }

    /// Advance every cell of a grid (or band) by one tick, in place.
    pub fn advance_band(&self, cells: &mut CompartmentGrids) {
        for idx in 0..cells.cell_count() {
            let next = self.advance_cell(cells.cell(idx));
            cells.set_cell(idx, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestis_core::DensityGrid;
    use proptest::prelude::*;

    fn covid_rates() -> TransitionRates {
        TransitionRates::from_profile(&DiseaseProfile::covid19())
    }

    #[test]
    fn rates_from_covid_profile() {
        let r = covid_rates();
        assert_eq!(r.exposure, 5.6e-6);
        assert!((r.infection - 1.0 / (5.0 * 86_400.0)).abs() < 1e-18);
        assert!((r.recovery - 0.99 / (10.0 * 86_400.0)).abs() < 1e-18);
        assert!((r.death - 0.01 / (10.0 * 86_400.0)).abs() < 1e-18);
        r.check_stable().unwrap();
    }

    #[test]
    fn idle_cell_is_unchanged() {
        let c = CellState {
            susceptible: 500.0,
            recovered: 20.0,
            dead: 3.0,
            ..CellState::default()
        };
        assert_eq!(covid_rates().advance_cell(c), c);
    }

    #[test]
    fn flows_use_tick_start_values() {
        let r = covid_rates();
        let c = CellState {
            susceptible: 900.0,
            exposed: 50.0,
            infected: 50.0,
            recovered: 0.0,
            dead: 0.0,
        };
        let next = r.advance_cell(c);

        let incubated = 50.0 * r.infection;
        let leaving = 50.0 * (r.recovery + r.death);
        let exposed = 900.0 * (50.0 / 1000.0 * r.exposure);
        assert!((next.infected - (50.0 + incubated - leaving)).abs() < 1e-12);
        assert!((next.exposed - (50.0 + exposed - incubated)).abs() < 1e-12);
        assert!((next.susceptible - (900.0 - exposed)).abs() < 1e-12);
        assert!((next.recovered - 50.0 * r.recovery).abs() < 1e-15);
        assert!((next.dead - 50.0 * r.death).abs() < 1e-15);
    }

    #[test]
    fn dead_excluded_from_divisor() {
        let r = covid_rates();
        let with_dead = CellState {
            susceptible: 100.0,
            infected: 100.0,
            dead: 1000.0,
            ..CellState::default()
        };
        let without_dead = CellState {
            dead: 0.0,
            ..with_dead
        };
        let a = r.advance_cell(with_dead);
        let b = r.advance_cell(without_dead);
        assert_eq!(a.susceptible, b.susceptible);
    }

    #[test]
    fn zero_living_population_has_no_pressure() {
        // Only dead mass: no flow, no division by zero.
        let c = CellState {
            dead: 10.0,
            ..CellState::default()
        };
        let next = covid_rates().advance_cell(c);
        assert_eq!(next, c);
        assert!(next.susceptible.is_finite());
    }

    #[test]
    fn advance_band_matches_per_cell() {
        let density = DensityGrid::new(3, 2, vec![10.0, 0.0, 500.0, 70.0, 1.0, 0.0]).unwrap();
        let mut grids = CompartmentGrids::from_density(&density);
        grids.set_cell(
            2,
            CellState {
                susceptible: 400.0,
                exposed: 60.0,
                infected: 40.0,
                ..CellState::default()
            },
        );
        let before = grids.clone();
        let r = covid_rates();
        r.advance_band(&mut grids);
        for idx in 0..grids.cell_count() {
            assert_eq!(grids.cell(idx), r.advance_cell(before.cell(idx)));
        }
    }

    proptest! {
        #[test]
        fn cell_update_conserves_mass_and_stays_non_negative(
            s in 0.0f64..1e6,
            e in 0.0f64..1e5,
            i in 0.0f64..1e5,
            rec in 0.0f64..1e5,
            d in 0.0f64..1e5,
            preset in 0usize..6,
        ) {
            let disease = &DiseaseProfile::presets()[preset];
            let r = TransitionRates::from_profile(disease);
            let c = CellState { susceptible: s, exposed: e, infected: i, recovered: rec, dead: d };
            let next = r.advance_cell(c);
            let tol = 1e-9 * c.total().max(1.0);
            prop_assert!((next.total() - c.total()).abs() <= tol);
            prop_assert!(next.susceptible >= 0.0);
            prop_assert!(next.exposed >= 0.0);
            prop_assert!(next.infected >= 0.0);
            prop_assert!(next.recovered >= rec);
            prop_assert!(next.dead >= d);
        }
    }
}
