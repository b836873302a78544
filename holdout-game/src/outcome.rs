//! Terminal outcome classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    SANCTUARY_STRONG_HEALTH_FLOOR, SANCTUARY_STRONG_HUNGER_CEILING, SANCTUARY_STRONG_SUPPLY_FLOOR,
    SANCTUARY_WEAK_HEALTH_FLOOR,
};
use crate::state::SurvivorState;

/// Classified terminal result for a survivor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Health reached zero or below.
    Died,
    /// Arrived healthy, provisioned, fed, and clean of infection.
    SanctuaryStrong,
    /// Arrived uninfected with health to spare.
    SanctuaryWeak,
    /// Arrived, barely.
    SanctuaryBarely,
}

impl Ending {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Died => "died",
            Self::SanctuaryStrong => "sanctuary_strong",
            Self::SanctuaryWeak => "sanctuary_weak",
            Self::SanctuaryBarely => "sanctuary_barely",
        }
    }

    /// Narrative epilogue carried alongside the tag so clients never have to
    /// recompute an ending.
    #[must_use]
    pub const fn epilogue(self) -> &'static str {
        match self {
            Self::Died => {
                "succumbed to exhaustion and disease. The unforgiving pandemic claimed another life"
            }
            Self::SanctuaryStrong => {
                "reached the sanctuary and is now saved and doing great in the community"
            }
            Self::SanctuaryWeak => {
                "reached the sanctuary and is now saved, but with lingering health issues"
            }
            Self::SanctuaryBarely => {
                "barely survived to reach the sanctuary, collapsing at the gate"
            }
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether a freshly resolved state is terminal.
///
/// Priority is fixed: death first, then the sanctuary tiers once `day` has
/// moved past `last_day` (the storyline length). Health is inspected raw;
/// the resolver never clamps it at zero.
#[must_use]
pub fn classify(state: &SurvivorState, last_day: u32) -> Option<Ending> {
    if state.health <= 0 {
        return Some(Ending::Died);
    }
    if state.day <= last_day {
        return None;
    }
    if state.health > SANCTUARY_STRONG_HEALTH_FLOOR
        && state.supplies > SANCTUARY_STRONG_SUPPLY_FLOOR
        && state.hunger < SANCTUARY_STRONG_HUNGER_CEILING
        && !state.infected
    {
        return Some(Ending::SanctuaryStrong);
    }
    if state.health > SANCTUARY_WEAK_HEALTH_FLOOR && !state.infected {
        return Some(Ending::SanctuaryWeak);
    }
    Some(Ending::SanctuaryBarely)
}
