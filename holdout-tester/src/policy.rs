//! Scripted survivor policies for batch playtesting.

use clap::ValueEnum;
use holdout_game::{ActionTag, SurvivorState};

const HUNGRY_THRESHOLD: i32 = 70;
const DESPERATE_THRESHOLD: i32 = 80;
const WOUNDED_THRESHOLD: i32 = 60;

/// Decision strategy steering a simulated survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyId {
    /// Search every day, whatever happens
    Forager,
    /// Rest every day
    Homebody,
    /// Eat when hungry and stocked, otherwise search
    Rationer,
    /// Rest when hurt, eat when desperate, search otherwise
    Balanced,
}

impl PolicyId {
    pub const ALL: [Self; 4] = [Self::Forager, Self::Homebody, Self::Rationer, Self::Balanced];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forager => "forager",
            Self::Homebody => "homebody",
            Self::Rationer => "rationer",
            Self::Balanced => "balanced",
        }
    }

    /// Next action for the coming day.
    #[must_use]
    pub fn decide(self, state: &SurvivorState) -> ActionTag {
        match self {
            Self::Forager => ActionTag::Search,
            Self::Homebody => ActionTag::Rest,
            Self::Rationer => {
                if state.hunger >= HUNGRY_THRESHOLD && state.supplies > 0 {
                    ActionTag::Eat
                } else {
                    ActionTag::Search
                }
            }
            Self::Balanced => {
                if state.hunger >= DESPERATE_THRESHOLD && state.supplies > 0 {
                    ActionTag::Eat
                } else if state.health <= WOUNDED_THRESHOLD {
                    ActionTag::Rest
                } else {
                    ActionTag::Search
                }
            }
        }
    }
}
