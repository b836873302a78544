//! Turn resolution: one action tag applied to a live survivor record.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    EAT_HUNGER_RELIEF, EAT_SUPPLY_COST, INFECTION_HP_LOSS, REST_HEAL, REST_HUNGER_COST,
    SEARCH_HUNGER_COST, SEARCH_INFECTION_CHANCE, SEARCH_SUPPLY_MAX, STARVATION_HP_LOSS,
    STARVATION_THRESHOLD,
};
use crate::state::SurvivorState;

/// Generic category of a scene choice, decoupled from its narrative label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionTag {
    Search,
    Rest,
    Eat,
    /// Any unrecognized tag. Resolves as a stat no-op, never as an error;
    /// the storyline is free to introduce flavor tags such as `risk`.
    #[default]
    Other,
}

impl ActionTag {
    /// Total parse: unknown tags fold into [`ActionTag::Other`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_str(raw).unwrap_or(Self::Other)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Rest => "rest",
            Self::Eat => "eat",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "search" => Ok(Self::Search),
            "rest" => Ok(Self::Rest),
            "eat" => Ok(Self::Eat),
            _ => Err(()),
        }
    }
}

/// Maximum tag capacity stored inline without additional allocations.
pub type TurnTagSet = SmallVec<[TurnTag; 4]>;

/// Marker describing a notable event inside one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnTag {
    SuppliesFound,
    InfectionContracted,
    StarvationTick,
    InfectionTick,
}

impl TurnTag {
    /// Stable key used in structured log lines.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SuppliesFound => "turn.supplies-found",
            Self::InfectionContracted => "turn.infection-contracted",
            Self::StarvationTick => "turn.starvation-tick",
            Self::InfectionTick => "turn.infection-tick",
        }
    }
}

/// Stat movement recorded while resolving a single turn.
///
/// The report is derived data for logging and QA aggregation; the mutated
/// state alone is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Day the survivor woke up on after the turn resolved.
    pub day: u32,
    pub health_delta: i32,
    pub hunger_delta: i32,
    pub supplies_delta: i32,
    pub tags: TurnTagSet,
}

/// Apply one action to a live survivor record.
///
/// The caller guarantees the record is not finished. Resolution itself never
/// fails and never rejects a tag. All randomness is drawn from `rng` in a
/// fixed order (supply roll, then infection roll), so a scripted generator
/// reproduces a turn exactly. Effect order is fixed: action effect, day
/// advance, starvation decay, infection decay.
pub fn resolve<R: Rng + ?Sized>(
    state: &mut SurvivorState,
    action: ActionTag,
    rng: &mut R,
) -> TurnReport {
    let (health_before, hunger_before, supplies_before) =
        (state.health, state.hunger, state.supplies);
    let mut tags = TurnTagSet::new();

    match action {
        ActionTag::Search => {
            let found = rng.gen_range(0..=SEARCH_SUPPLY_MAX);
            state.supplies += found;
            state.hunger += SEARCH_HUNGER_COST;
            if found > 0 {
                tags.push(TurnTag::SuppliesFound);
            }
            // The exposure roll happens even when already infected so the
            // draw sequence stays stable across a session.
            if rng.gen_bool(SEARCH_INFECTION_CHANCE) {
                if !state.infected {
                    tags.push(TurnTag::InfectionContracted);
                }
                state.infected = true;
            }
        }
        ActionTag::Rest => {
            state.heal(REST_HEAL);
            state.hunger += REST_HUNGER_COST;
        }
        ActionTag::Eat => {
            if state.supplies > 0 {
                state.supplies -= EAT_SUPPLY_COST;
                state.hunger = (state.hunger - EAT_HUNGER_RELIEF).max(0);
            }
        }
        ActionTag::Other => {}
    }

    state.day += 1;

    if state.hunger >= STARVATION_THRESHOLD {
        state.health -= STARVATION_HP_LOSS;
        tags.push(TurnTag::StarvationTick);
    }
    if state.infected {
        state.health -= INFECTION_HP_LOSS;
        tags.push(TurnTag::InfectionTick);
    }

    TurnReport {
        day: state.day,
        health_delta: state.health - health_before,
        hunger_delta: state.hunger - hunger_before,
        supplies_delta: state.supplies - supplies_before,
        tags,
    }
}
