//! Holdout Session Engine
//!
//! Platform-agnostic core logic for the Holdout pandemic-survival session
//! backend: turn resolution, outcome classification, the scene catalog, RNG
//! stream derivation, and the persistence contract. No HTTP, no async
//! runtime; the delivery surface lives in `holdout-server`.

pub mod action;
pub mod constants;
pub mod outcome;
pub mod rng;
pub mod scenes;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use action::{ActionTag, TurnReport, TurnTag, TurnTagSet, resolve};
pub use outcome::{Ending, classify};
pub use rng::turn_rng;
pub use scenes::{Scene, SceneCatalog, SceneChoice};
pub use state::{SurvivorState, Vitals};
pub use store::{
    FileStore, MemoryStore, SessionStore, StoreError, decode_state, encode_state,
};
