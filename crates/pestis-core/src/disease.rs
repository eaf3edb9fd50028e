//! Disease profiles: the immutable rate parameters of one pathogen.
//!
//! A [`DiseaseProfile`] is plain data. Named presets are constructed as
//! values (see [`DiseaseProfile::presets`]); nothing about the engine's
//! behaviour varies per disease except these numbers.
//!
//! Constructed via the builder pattern: [`DiseaseProfile::builder`].

use crate::error::ProfileError;

/// Immutable parameter bundle describing a pathogen.
///
/// Rates are expressed in the units the engine consumes: `infectivity`
/// is already a per-second exposure rate constant; the two periods are
/// mean durations in days.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseProfile {
    name: String,
    infectivity: f64,
    severity: f64,
    lethality: f64,
    incubation_period_days: f64,
    infection_duration_days: f64,
    transmission_land: f64,
    transmission_air: f64,
    transmission_sea: f64,
}

/// Builder for [`DiseaseProfile`].
///
/// Required: `name` (given to [`DiseaseProfile::builder`]),
/// `incubation_period_days` and `infection_duration_days`. Everything
/// else defaults to zero.
pub struct DiseaseProfileBuilder {
    name: String,
    infectivity: f64,
    severity: f64,
    lethality: f64,
    incubation_period_days: Option<f64>,
    infection_duration_days: Option<f64>,
    transmission_land: f64,
    transmission_air: f64,
    transmission_sea: f64,
}

impl DiseaseProfile {
    /// Start building a profile with the given display name.
    pub fn builder(name: impl Into<String>) -> DiseaseProfileBuilder {
        DiseaseProfileBuilder {
            name: name.into(),
            infectivity: 0.0,
            severity: 0.0,
            lethality: 0.0,
            incubation_period_days: None,
            infection_duration_days: None,
            transmission_land: 0.0,
            transmission_air: 0.0,
            transmission_sea: 0.0,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exposure rate constant, per second.
    pub fn infectivity(&self) -> f64 {
        self.infectivity
    }

    /// Symptom severity in `[0, 1]`. Advisory only; the engine ignores it.
    pub fn severity(&self) -> f64 {
        self.severity
    }

    /// Fraction of infected who die, in `[0, 1]`.
    pub fn lethality(&self) -> f64 {
        self.lethality
    }

    /// Mean Exposed→Infected duration, in days.
    pub fn incubation_period_days(&self) -> f64 {
        self.incubation_period_days
    }

    /// Mean Infected→{Recovered, Dead} duration, in days.
    pub fn infection_duration_days(&self) -> f64 {
        self.infection_duration_days
    }

    /// Overland spread modifier in `[0, 1]`.
    pub fn transmission_land(&self) -> f64 {
        self.transmission_land
    }

    /// Air-travel spread modifier in `[0, 1]`. Scales the probability of
    /// long-distance transmission events.
    pub fn transmission_air(&self) -> f64 {
        self.transmission_air
    }

    /// Sea-travel spread modifier in `[0, 1]`.
    pub fn transmission_sea(&self) -> f64 {
        self.transmission_sea
    }

    /// Check every parameter against its valid range.
    ///
    /// Profiles produced by [`DiseaseProfileBuilder::build`] always pass;
    /// the engine re-validates at construction regardless.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let fail = |parameter, value, requirement| ProfileError {
            disease: self.name.clone(),
            parameter,
            value,
            requirement,
        };
        if !self.infectivity.is_finite() || self.infectivity < 0.0 {
            return Err(fail("infectivity", self.infectivity, "finite and >= 0"));
        }
        for (parameter, value) in [
            ("severity", self.severity),
            ("lethality", self.lethality),
            ("transmission_land", self.transmission_land),
            ("transmission_air", self.transmission_air),
            ("transmission_sea", self.transmission_sea),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(fail(parameter, value, "in [0, 1]"));
            }
        }
        for (parameter, value) in [
            ("incubation_period_days", self.incubation_period_days),
            ("infection_duration_days", self.infection_duration_days),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(fail(parameter, value, "finite and > 0"));
            }
        }
        Ok(())
    }

    /// The built-in presets, in menu order.
    pub fn presets() -> Vec<DiseaseProfile> {
        vec![
            Self::influenza(),
            Self::covid19(),
            Self::measles(),
            Self::ebola(),
            Self::smallpox(),
            Self::common_cold(),
        ]
    }

    /// Look up a preset by name, ignoring ASCII case.
    pub fn preset(name: &str) -> Option<DiseaseProfile> {
        Self::presets()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Seasonal influenza (R0 ~1.3).
    pub fn influenza() -> Self {
        Self::preset_data("Influenza", 4.3e-6, 0.1, 0.001, 2.0, 6.0, [0.7, 0.8, 0.6])
    }

    /// COVID-19 (R0 ~2.8).
    pub fn covid19() -> Self {
        Self::preset_data("COVID-19", 5.6e-6, 0.3, 0.01, 5.0, 10.0, [0.8, 0.9, 0.7])
    }

    /// Measles (R0 ~15).
    pub fn measles() -> Self {
        Self::preset_data("Measles", 3.75e-5, 0.5, 0.0015, 12.0, 8.0, [0.9, 0.7, 0.5])
    }

    /// Ebola (R0 ~1.95). Spreads mostly by direct contact.
    pub fn ebola() -> Self {
        Self::preset_data("Ebola", 5.5e-6, 0.9, 0.5, 9.0, 7.0, [0.3, 0.1, 0.05])
    }

    /// Smallpox (R0 ~4.5).
    pub fn smallpox() -> Self {
        Self::preset_data("Smallpox", 3.7e-6, 0.8, 0.3, 12.0, 24.0, [0.8, 0.6, 0.4])
    }

    /// Common cold (R0 ~2.5), effectively non-lethal.
    pub fn common_cold() -> Self {
        Self::preset_data(
            "Common Cold (Rhinovirus)",
            1.0e-5,
            0.05,
            0.0,
            2.0,
            5.0,
            [0.9, 0.8, 0.7],
        )
    }

    fn preset_data(
        name: &str,
        infectivity: f64,
        severity: f64,
        lethality: f64,
        incubation_period_days: f64,
        infection_duration_days: f64,
        [land, air, sea]: [f64; 3],
    ) -> Self {
        Self {
            name: name.to_string(),
            infectivity,
            severity,
            lethality,
            incubation_period_days,
            infection_duration_days,
            transmission_land: land,
            transmission_air: air,
            transmission_sea: sea,
        }
    }
}

impl DiseaseProfileBuilder {
    /// Exposure rate constant, per second (default: 0).
    pub fn infectivity(mut self, v: f64) -> Self {
        self.infectivity = v;
        self
    }

    /// Severity in `[0, 1]` (default: 0).
    pub fn severity(mut self, v: f64) -> Self {
        self.severity = v;
        self
    }

    /// Lethality in `[0, 1]` (default: 0).
    pub fn lethality(mut self, v: f64) -> Self {
        self.lethality = v;
        self
    }

    /// Mean incubation period in days. Required, must be > 0.
    pub fn incubation_period_days(mut self, v: f64) -> Self {
        self.incubation_period_days = Some(v);
        self
    }

    /// Mean infectious period in days. Required, must be > 0.
    pub fn infection_duration_days(mut self, v: f64) -> Self {
        self.infection_duration_days = Some(v);
        self
    }

    /// Overland modifier in `[0, 1]` (default: 0).
    pub fn transmission_land(mut self, v: f64) -> Self {
        self.transmission_land = v;
        self
    }

    /// Air-travel modifier in `[0, 1]` (default: 0).
    pub fn transmission_air(mut self, v: f64) -> Self {
        self.transmission_air = v;
        self
    }

    /// Sea-travel modifier in `[0, 1]` (default: 0).
    pub fn transmission_sea(mut self, v: f64) -> Self {
        self.transmission_sea = v;
        self
    }

    /// Build the profile, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if either period is unset or any
    /// parameter is out of range.
    pub fn build(self) -> Result<DiseaseProfile, ProfileError> {
        let missing = |parameter| ProfileError {
            disease: self.name.clone(),
            parameter,
            value: f64::NAN,
            requirement: "set before build",
        };
        let incubation_period_days = self
            .incubation_period_days
            .ok_or_else(|| missing("incubation_period_days"))?;
        let infection_duration_days = self
            .infection_duration_days
            .ok_or_else(|| missing("infection_duration_days"))?;

        let profile = DiseaseProfile {
            name: self.name,
            infectivity: self.infectivity,
            severity: self.severity,
            lethality: self.lethality,
            incubation_period_days,
            infection_duration_days,
            transmission_land: self.transmission_land,
            transmission_air: self.transmission_air,
            transmission_sea: self.transmission_sea,
        };
        profile.validate()?;
        Ok(profile)
    }
}
