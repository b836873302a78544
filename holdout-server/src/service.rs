//! Session orchestration: create-or-resume, apply-action, terminate.
//!
//! The load-resolve-persist sequence is a read-modify-write against a store
//! that offers no atomicity, so every operation on a given name runs under
//! that name's lock. Names never share a lock; unrelated sessions proceed
//! fully in parallel.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

use holdout_game::{
    ActionTag, SceneCatalog, SessionStore, StoreError, SurvivorState, TurnReport, classify,
    decode_state, encode_state, resolve, turn_rng,
};

/// Failure taxonomy for session operations.
///
/// Resolver and classifier are pure and infallible; only storage access and
/// lock acquisition can fail.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("player not found")]
    NotFound,
    #[error("session is already finished")]
    AlreadyFinished,
    /// Lock contention exceeded the configured bound; safe to retry.
    #[error("session is busy, retry shortly")]
    Busy,
    #[error("survivor name must not be empty")]
    InvalidName,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored record is corrupt: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Result of a create-or-resume request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Brand-new record persisted for this name.
    Created(SurvivorState),
    /// Mid-session record returned unchanged.
    Resumed(SurvivorState),
    /// Terminal record returned as an idempotent read, never re-resolved.
    Finished(SurvivorState),
}

impl StartOutcome {
    #[must_use]
    pub const fn state(&self) -> &SurvivorState {
        match self {
            Self::Created(state) | Self::Resumed(state) | Self::Finished(state) => state,
        }
    }
}

/// Result of one applied action.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// The persisted post-turn state, carrying `finished`/`final_status`
    /// when this turn ended the session.
    pub state: SurvivorState,
    /// Derived per-turn report used for logging and QA; not authoritative.
    pub report: TurnReport,
}

/// Orchestrator composing the resolver, classifier, and store.
///
/// Lock entries are retained for the life of the service: one lock per name
/// ever seen. Dropping an entry while a guard is outstanding could hand two
/// callers different locks for the same name, so entries are never removed.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    catalog: SceneCatalog,
    root_seed: u64,
    lock_timeout: Duration,
    locks: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionService {
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, catalog: SceneCatalog, root_seed: u64) -> Self {
        Self {
            store,
            catalog,
            root_seed,
            lock_timeout: Self::DEFAULT_LOCK_TIMEOUT,
            locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Override the per-name lock acquisition bound.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Create a record for `name`, or hand back the existing one untouched.
    ///
    /// Repeated starts are idempotent, including for finished survivors,
    /// whose terminal snapshot is returned without mutation.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `Busy`, or a storage failure.
    pub async fn start_or_resume(&self, name: &str) -> Result<StartOutcome, SessionError> {
        Self::validate_name(name)?;
        let _guard = self.serialize_on(name).await?;

        if let Some(state) = self.load(name)? {
            if state.finished {
                return Ok(StartOutcome::Finished(state));
            }
            log::debug!("resuming survivor {name} on day {}", state.day);
            return Ok(StartOutcome::Resumed(state));
        }

        let state = SurvivorState::new(name);
        self.persist(&state)?;
        log::info!("created survivor {name}");
        Ok(StartOutcome::Created(state))
    }

    /// Resolve one action for `name`, classify the result, and persist it.
    ///
    /// Nothing is persisted when the store read fails, and no success is
    /// reported when the write fails; the previous record stays intact.
    ///
    /// # Errors
    ///
    /// `NotFound` for a name with no record, `AlreadyFinished` for a frozen
    /// record, `InvalidName`, `Busy`, or a storage failure.
    pub async fn apply_action(
        &self,
        name: &str,
        action: ActionTag,
    ) -> Result<ActionOutcome, SessionError> {
        Self::validate_name(name)?;
        let _guard = self.serialize_on(name).await?;

        let mut state = self.load(name)?.ok_or(SessionError::NotFound)?;
        if state.finished {
            return Err(SessionError::AlreadyFinished);
        }

        let mut rng = turn_rng(self.root_seed, name, state.day);
        let report = resolve(&mut state, action, &mut rng);
        if let Some(ending) = classify(&state, self.catalog.last_day()) {
            state.finish(ending);
        }
        self.persist(&state)?;

        for tag in &report.tags {
            log::debug!("survivor {name}: {}", tag.key());
        }
        if let Some(ending) = state.final_status {
            log::info!("survivor {name} finished after day {}: {ending}", state.day);
        }
        Ok(ActionOutcome { state, report })
    }

    /// Delete the record for `name`, reporting whether one existed.
    ///
    /// Idempotent: deleting an absent name reports `false` and is no error.
    /// The name is free for a fresh start afterwards.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `Busy`, or a storage failure.
    pub async fn terminate(&self, name: &str) -> Result<bool, SessionError> {
        Self::validate_name(name)?;
        let _guard = self.serialize_on(name).await?;

        let existed = self.store.delete(name)?;
        if existed {
            log::info!("deleted survivor {name}");
        }
        Ok(existed)
    }

    fn validate_name(name: &str) -> Result<(), SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::InvalidName);
        }
        Ok(())
    }

    fn entry_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    async fn serialize_on(&self, name: &str) -> Result<OwnedMutexGuard<()>, SessionError> {
        let entry = self.entry_for(name);
        tokio::time::timeout(self.lock_timeout, entry.lock_owned())
            .await
            .map_err(|_| SessionError::Busy)
    }

    fn load(&self, name: &str) -> Result<Option<SurvivorState>, SessionError> {
        let Some(bytes) = self.store.get(name)? else {
            return Ok(None);
        };
        Ok(Some(decode_state(&bytes)?))
    }

    fn persist(&self, state: &SurvivorState) -> Result<(), SessionError> {
        let bytes = encode_state(state)?;
        self.store.set(&state.name, &bytes)?;
        Ok(())
    }
}
