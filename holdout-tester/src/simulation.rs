//! Deterministic batch simulation over the turn engine.

use std::collections::BTreeMap;

use serde::Serialize;

use holdout_game::{SceneCatalog, SurvivorState, TurnTag, classify, resolve, turn_rng};

use crate::policy::PolicyId;

/// Hard stop for a single session; generous, since every turn advances the
/// day and classification fires once it passes the storyline end.
const MAX_TURNS: u32 = 64;

/// Configuration for one batch of sessions.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub iterations: usize,
}

/// Record of one completed session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub ending: String,
    pub days: u32,
    pub final_health: i32,
    pub infected: bool,
    pub starvation_ticks: u32,
}

/// Aggregated results for one policy under one seed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub policy: String,
    pub seed: u64,
    pub sessions: usize,
    pub endings: BTreeMap<String, usize>,
    pub average_days: f64,
    pub infected_finishes: usize,
    pub starvation_ticks: u64,
    /// Turns that violated an engine guarantee; always zero unless the
    /// engine regresses.
    pub invariant_breaches: usize,
}

/// Play one full session under `policy`, drawing every turn from the
/// derived (seed, name, day) stream.
#[must_use]
pub fn run_session(
    catalog: &SceneCatalog,
    policy: PolicyId,
    seed: u64,
    name: &str,
    breaches: &mut usize,
) -> SessionRecord {
    let last_day = catalog.last_day();
    let mut state = SurvivorState::new(name);
    let mut starvation_ticks = 0_u32;

    for _ in 0..MAX_TURNS {
        let day_before = state.day;
        let action = policy.decide(&state);
        let mut rng = turn_rng(seed, name, state.day);
        let report = resolve(&mut state, action, &mut rng);

        if state.supplies < 0 || state.day != day_before + 1 {
            *breaches += 1;
        }
        if report.tags.contains(&TurnTag::StarvationTick) {
            starvation_ticks += 1;
        }

        if let Some(ending) = classify(&state, last_day) {
            state.finish(ending);
            break;
        }
    }

    let ending = state
        .final_status
        .map_or_else(|| String::from("unresolved"), |e| e.to_string());
    SessionRecord {
        ending,
        days: state.day,
        final_health: state.health,
        infected: state.infected,
        starvation_ticks,
    }
}

/// Run `iterations` sessions and fold them into a report.
#[must_use]
pub fn run_batch(catalog: &SceneCatalog, policy: PolicyId, config: SimulationConfig) -> BatchReport {
    let mut endings = BTreeMap::new();
    let mut total_days = 0_u64;
    let mut infected_finishes = 0_usize;
    let mut starvation_ticks = 0_u64;
    let mut breaches = 0_usize;

    for iteration in 0..config.iterations {
        let name = format!("{}-{iteration}", policy.as_str());
        let record = run_session(catalog, policy, config.seed, &name, &mut breaches);

        *endings.entry(record.ending.clone()).or_insert(0) += 1;
        total_days += u64::from(record.days);
        infected_finishes += usize::from(record.infected);
        starvation_ticks += u64::from(record.starvation_ticks);
    }

    let average_days = if config.iterations == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        {
            total_days as f64 / config.iterations as f64
        }
    };

    BatchReport {
        policy: policy.as_str().to_string(),
        seed: config.seed,
        sessions: config.iterations,
        endings,
        average_days,
        infected_finishes,
        starvation_ticks,
        invariant_breaches: breaches,
    }
}
