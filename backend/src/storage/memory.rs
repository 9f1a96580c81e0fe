//! In-memory dossier storage, used where no data directory should be touched.

use std::sync::{Arc, Mutex};

use crate::domain::models::Dossier;
use crate::storage::traits::{DossierStorage, StorageError};

const COLLECTION_KEY: &str = "memory";

#[derive(Debug, Default)]
struct MemoryState {
    saved: Option<Vec<Dossier>>,
    corrupt: bool,
    fail_saves: bool,
    save_count: usize,
}

/// Shared handle to an in-memory collection. Clones observe the same state,
/// so a caller can keep a handle after giving one to a store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `dossiers`
    pub fn with_dossiers(dossiers: Vec<Dossier>) -> Self {
        let storage = Self::new();
        storage.lock().saved = Some(dossiers);
        storage
    }

    /// Make every subsequent load report an unreadable payload
    pub fn set_corrupt(&self, corrupt: bool) {
        self.lock().corrupt = corrupt;
    }

    /// Make every subsequent save fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Last successfully saved collection, if any
    pub fn saved(&self) -> Option<Vec<Dossier>> {
        self.lock().saved.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-call;
        // the state itself is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DossierStorage for InMemoryStorage {
    fn collection_key(&self) -> &str {
        COLLECTION_KEY
    }

    fn load_collection(&self) -> Result<Vec<Dossier>, StorageError> {
        let state = self.lock();
        if state.corrupt {
            return Err(StorageError::Deserialization {
                collection: COLLECTION_KEY.to_string(),
                message: "payload marked corrupt".to_string(),
            });
        }
        Ok(state.saved.clone().unwrap_or_default())
    }

    fn save_collection(&self, dossiers: &[Dossier]) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(StorageError::Persistence {
                collection: COLLECTION_KEY.to_string(),
                message: "storage quota exceeded".to_string(),
            });
        }
        state.saved = Some(dossiers.to_vec());
        state.save_count += 1;
        Ok(())
    }
}
