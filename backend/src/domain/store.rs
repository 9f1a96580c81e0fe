//! In-memory dossier collection.
//!
//! The store keeps dossiers in insertion order, which is also the order every
//! listing and report uses. It owns the storage port and round-trips the whole
//! collection through it on `load` and `save`.

use chrono::Utc;
use log::{debug, error, info};
use std::collections::HashSet;

use crate::domain::error::DossierError;
use crate::domain::models::{Dossier, DossierDraft};
use crate::domain::validator::validate_dossier;
use crate::storage::{DossierStorage, StorageError};

pub struct DossierStore<S: DossierStorage> {
    dossiers: Vec<Dossier>,
    storage: S,
}

impl<S: DossierStorage> DossierStore<S> {
    /// Create an empty store; call `load` to read the persisted collection
    pub fn new(storage: S) -> Self {
        Self {
            dossiers: Vec::new(),
            storage,
        }
    }

    /// Number the next dossier would receive: one past the highest number in
    /// the current collection. Saturates at `u32::MAX`, where `add` refuses
    /// to number further dossiers.
    pub fn next_number(&self) -> u32 {
        self.checked_next_number().unwrap_or(u32::MAX)
    }

    fn checked_next_number(&self) -> Option<u32> {
        match self.dossiers.iter().map(|d| d.number).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Append a new dossier built from `draft`.
    ///
    /// The draft is re-checked so that an unvalidated draft can never break
    /// the collection's invariants.
    pub fn add(&mut self, draft: DossierDraft) -> Result<Dossier, DossierError> {
        validate_dossier(&draft)?;

        let number = self
            .checked_next_number()
            .ok_or(DossierError::NumberingExhausted)?;
        let id = self.generate_unique_id();
        let dossier = Dossier::from_draft(id, number, draft)?;

        debug!("Assigned id {} and number {} to dossier {}", dossier.id, number, dossier.name);
        self.dossiers.push(dossier.clone());
        Ok(dossier)
    }

    /// Replace every mutable field of the dossier `id` with the draft's values.
    pub fn update(&mut self, id: &str, draft: DossierDraft) -> Result<Dossier, DossierError> {
        validate_dossier(&draft)?;

        let dossier = self
            .dossiers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DossierError::NotFound(id.to_string()))?;

        dossier.apply_draft(draft)?;
        Ok(dossier.clone())
    }

    /// Remove the dossier `id`. Removing an unknown id does nothing.
    pub fn remove(&mut self, id: &str) -> Option<Dossier> {
        let index = self.dossiers.iter().position(|d| d.id == id)?;
        Some(self.dossiers.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Dossier> {
        self.dossiers.iter().find(|d| d.id == id)
    }

    pub fn dossiers(&self) -> &[Dossier] {
        &self.dossiers
    }

    pub fn len(&self) -> usize {
        self.dossiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dossiers.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// An unreadable payload, or one with duplicate ids or numbers, is logged
    /// and leaves the store empty. Returns the number of dossiers loaded.
    pub fn load(&mut self) -> usize {
        let loaded = self
            .storage
            .load_collection()
            .and_then(|dossiers| check_unique_identity(self.storage.collection_key(), dossiers));
        match loaded {
            Ok(dossiers) => {
                info!("Loaded {} dossiers", dossiers.len());
                self.dossiers = dossiers;
            }
            Err(e) => {
                error!("Erreur lors du chargement des dossiers: {}", e);
                self.dossiers.clear();
            }
        }
        self.dossiers.len()
    }

    /// Persist the whole collection. The in-memory state is kept on failure.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save_collection(&self.dossiers).map_err(|e| {
            error!("Erreur lors de l'enregistrement: {}", e);
            e
        })
    }

    fn generate_unique_id(&self) -> String {
        let mut millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        loop {
            let id = Dossier::generate_id(millis);
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

fn check_unique_identity(collection: &str, dossiers: Vec<Dossier>) -> Result<Vec<Dossier>, StorageError> {
    let mut ids = HashSet::new();
    let mut numbers = HashSet::new();
    for dossier in &dossiers {
        if !ids.insert(dossier.id.as_str()) || !numbers.insert(dossier.number) {
            return Err(StorageError::Deserialization {
                collection: collection.to_string(),
                message: format!("duplicate id or number on dossier {} (#{})", dossier.id, dossier.number),
            });
        }
    }
    Ok(dossiers)
}
