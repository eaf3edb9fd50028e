//! Stop conditions for [`Simulation::run_until()`](crate::Simulation::run_until).

use pestis_core::{TickId, Totals};

use crate::rates::SECONDS_PER_DAY;

/// When a headless run should end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopCondition {
    /// Never met; the run ends only at the tick limit.
    Indefinite,
    /// Total Infected reaches at least this value.
    InfectedAtLeast(f64),
    /// Total Dead reaches at least this value.
    DeadAtLeast(f64),
    /// Total Recovered reaches at least this value.
    RecoveredAtLeast(f64),
    /// The simulated clock reaches the start of this day.
    Day(u64),
}

impl StopCondition {
    /// Whether the condition holds after the step that produced `tick`.
    pub fn is_met(&self, tick: TickId, totals: &Totals) -> bool {
        match *self {
            Self::Indefinite => false,
            Self::InfectedAtLeast(v) => totals.infected >= v,
            Self::DeadAtLeast(v) => totals.dead >= v,
            Self::RecoveredAtLeast(v) => totals.recovered >= v,
            Self::Day(d) => tick.0 >= d.saturating_mul(SECONDS_PER_DAY as u64),
        }
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The [`StopCondition`] was met.
    ConditionMet,
    /// The tick limit was reached first.
    TickLimit,
}

/// Outcome of a completed [`run_until()`](crate::Simulation::run_until).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Steps executed by this call.
    pub ticks_run: u64,
    /// Why the run ended.
    pub reason: StopReason,
    /// Aggregates after the last step.
    pub final_totals: Totals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(infected: f64, recovered: f64, dead: f64) -> Totals {
        Totals {
            infected,
            recovered,
            dead,
            ..Totals::default()
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        let t = totals(50.0, 20.0, 5.0);
        assert!(StopCondition::InfectedAtLeast(50.0).is_met(TickId(1), &t));
        assert!(!StopCondition::InfectedAtLeast(50.1).is_met(TickId(1), &t));
        assert!(StopCondition::RecoveredAtLeast(20.0).is_met(TickId(1), &t));
        assert!(StopCondition::DeadAtLeast(5.0).is_met(TickId(1), &t));
        assert!(!StopCondition::DeadAtLeast(6.0).is_met(TickId(1), &t));
    }

    #[test]
    fn day_boundary() {
        let t = Totals::default();
        assert!(!StopCondition::Day(1).is_met(TickId(86_399), &t));
        assert!(StopCondition::Day(1).is_met(TickId(86_400), &t));
        assert!(StopCondition::Day(0).is_met(TickId(0), &t));
        assert!(!StopCondition::Day(u64::MAX).is_met(TickId(u64::MAX - 1), &t));
    }

    #[test]
    fn indefinite_never_met() {
        let t = totals(1e12, 1e12, 1e12);
        assert!(!StopCondition::Indefinite.is_met(TickId(u64::MAX), &t));
    }
}
