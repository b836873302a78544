//! Survivor session state: the unit of persistence.

use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_MAX, START_DAY, START_HEALTH, START_HUNGER, START_SUPPLIES};
use crate::outcome::Ending;

/// One survivor's persisted progression record, keyed by name.
///
/// `health` may be driven below zero by turn resolution; the classifier
/// inspects the raw value. `hunger` has no upper ceiling. `supplies` never
/// drops below zero because every decrement is guarded at the point of
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivorState {
    pub name: String,
    pub day: u32,
    pub health: i32,
    pub hunger: i32,
    pub supplies: i32,
    pub infected: bool,
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_status: Option<Ending>,
}

impl SurvivorState {
    /// Fresh day-one record for a newly named survivor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day: START_DAY,
            health: START_HEALTH,
            hunger: START_HUNGER,
            supplies: START_SUPPLIES,
            infected: false,
            finished: false,
            final_status: None,
        }
    }

    /// Raise health, clamped to the 100-point ceiling. Decreases are applied
    /// directly by the resolver and are deliberately not clamped at zero.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(HEALTH_MAX);
    }

    /// Mark the record terminal. Once set it is never unset, and the service
    /// refuses further resolutions against the record.
    pub fn finish(&mut self, status: Ending) {
        self.finished = true;
        self.final_status = Some(status);
    }

    /// Snapshot of the vitals displayed for an already-finished survivor.
    #[must_use]
    pub const fn vitals(&self) -> Vitals {
        Vitals {
            health: self.health,
            supplies: self.supplies,
            hunger: self.hunger,
            infected: self.infected,
        }
    }
}

/// Final-stat display block for finished sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub supplies: i32,
    pub hunger: i32,
    pub infected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_starts_on_day_one() {
        let state = SurvivorState::new("alice");
        assert_eq!(state.name, "alice");
        assert_eq!(state.day, 1);
        assert_eq!(state.health, 100);
        assert_eq!(state.hunger, 50);
        assert_eq!(state.supplies, 3);
        assert!(!state.infected);
        assert!(!state.finished);
        assert!(state.final_status.is_none());
    }

    #[test]
    fn heal_clamps_at_ceiling_but_not_floor() {
        let mut state = SurvivorState::new("bob");
        state.health = 95;
        state.heal(10);
        assert_eq!(state.health, 100);

        state.health = -12;
        state.heal(5);
        assert_eq!(state.health, -7);
    }

    #[test]
    fn finish_sets_status_and_flag_together() {
        let mut state = SurvivorState::new("caro");
        state.finish(Ending::SanctuaryWeak);
        assert!(state.finished);
        assert_eq!(state.final_status, Some(Ending::SanctuaryWeak));
    }

    #[test]
    fn wire_format_uses_camel_case_status_field() {
        let mut state = SurvivorState::new("dana");
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("finalStatus").is_none());

        state.finish(Ending::Died);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["finalStatus"], "died");
        assert_eq!(json["finished"], true);

        let back: SurvivorState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
