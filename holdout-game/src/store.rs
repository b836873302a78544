//! Key-value persistence contract and the bundled store implementations.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::state::SurvivorState;

/// Failure talking to the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io failure: {0}")]
    Io(#[from] io::Error),
}

/// Opaque key-value persistence for serialized survivor records.
///
/// One record per survivor name; the store enforces no schema and never
/// inspects the bytes it holds.
pub trait SessionStore: Send + Sync {
    /// Fetch the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be durably written.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove the record under `key`, reporting whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be modified.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

/// Serialize a survivor record for storage.
///
/// # Errors
///
/// Returns an error if the state cannot be encoded.
pub fn encode_state(state: &SurvivorState) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(state)
}

/// Decode a stored survivor record.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid snapshot.
pub fn decode_state(bytes: &[u8]) -> Result<SurvivorState, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Process-local store used by tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        Ok(records.remove(key).is_some())
    }
}

/// One JSON file per survivor under a data directory.
///
/// File names pair a sanitized prefix with an FNV-1a hash of the full key,
/// so arbitrary survivor names stay collision-free and filesystem-safe.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        let prefix: String = key
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(24)
            .collect();
        self.root
            .join(format!("{prefix}-{:016x}.json", fnv1a64(key.as_bytes())))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.record_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.record_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}
