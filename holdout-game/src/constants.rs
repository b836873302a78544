//! Centralized balance and tuning constants for the Holdout turn engine.
//!
//! These values define the deterministic math for turn resolution and
//! outcome classification. Keeping them together ensures that gameplay can
//! only be adjusted via code changes reviewed in version control, rather
//! than through external JSON assets.

// Starting vitals ----------------------------------------------------------
pub(crate) const START_DAY: u32 = 1;
pub(crate) const START_HEALTH: i32 = 100;
pub(crate) const START_HUNGER: i32 = 50;
pub(crate) const START_SUPPLIES: i32 = 3;

// Action tuning ------------------------------------------------------------
pub(crate) const HEALTH_MAX: i32 = 100;
pub(crate) const SEARCH_SUPPLY_MAX: i32 = 1;
pub(crate) const SEARCH_HUNGER_COST: i32 = 5;
pub(crate) const SEARCH_INFECTION_CHANCE: f64 = 0.10;
pub(crate) const REST_HEAL: i32 = 10;
pub(crate) const REST_HUNGER_COST: i32 = 10;
pub(crate) const EAT_SUPPLY_COST: i32 = 1;
pub(crate) const EAT_HUNGER_RELIEF: i32 = 20;

// Nightly decay ------------------------------------------------------------
pub(crate) const STARVATION_THRESHOLD: i32 = 100;
pub(crate) const STARVATION_HP_LOSS: i32 = 15;
pub(crate) const INFECTION_HP_LOSS: i32 = 5;

// Sanctuary classification -------------------------------------------------
pub(crate) const SANCTUARY_STRONG_HEALTH_FLOOR: i32 = 70;
pub(crate) const SANCTUARY_STRONG_SUPPLY_FLOOR: i32 = 5;
pub(crate) const SANCTUARY_STRONG_HUNGER_CEILING: i32 = 50;
pub(crate) const SANCTUARY_WEAK_HEALTH_FLOOR: i32 = 30;
