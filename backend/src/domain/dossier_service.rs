//! Dossier lifecycle orchestration.
//!
//! `DossierService` is the single owner of the dossier collection. Every
//! mutation follows the same sequence:
//!
//! 1. normalize the name
//! 2. validate the candidate (abort on the first broken rule, nothing changes)
//! 3. apply the change to the in-memory store
//! 4. save the whole collection
//!
//! A failed save is reported to the caller, but the in-memory change is kept:
//! the application carries on ahead of what is durably stored and the next
//! successful save catches up.

use log::{info, warn};

use crate::domain::commands::dossiers::{
    CreateDossierCommand, DeleteDossierCommand, DeleteDossierResult, DossierResult,
    UpdateDossierCommand,
};
use crate::domain::error::DossierError;
use crate::domain::models::{Dossier, DossierDraft};
use crate::domain::normalizer::normalize_name;
use crate::domain::query::{EntryTotals, QueryService, SearchCriteria};
use crate::domain::store::DossierStore;
use crate::domain::validator::validate_dossier;
use crate::storage::DossierStorage;

pub struct DossierService<S: DossierStorage> {
    store: DossierStore<S>,
    query_service: QueryService,
}

impl<S: DossierStorage> DossierService<S> {
    /// Create a service over an empty store; call `load` to read stored data
    pub fn new(storage: S) -> Self {
        Self {
            store: DossierStore::new(storage),
            query_service: QueryService::new(),
        }
    }

    /// Load the persisted collection, returning how many dossiers were read
    pub fn load(&mut self) -> usize {
        self.store.load()
    }

    /// Create a new dossier
    pub fn add_dossier(&mut self, command: CreateDossierCommand) -> Result<DossierResult, DossierError> {
        let draft = Self::prepare_draft(command.draft);
        info!("Adding dossier: {}", draft.name);

        validate_dossier(&draft).map_err(|e| {
            warn!("Rejected new dossier '{}': {}", draft.name, e);
            e
        })?;

        let dossier = self.store.add(draft)?;
        self.store.save()?;

        info!("Added dossier #{} {} with ID: {}", dossier.number, dossier.name, dossier.id);
        Ok(DossierResult {
            dossier,
            success_message: "Dossier ajouté avec succès".to_string(),
        })
    }

    /// Replace the content of an existing dossier; ID and number are kept
    pub fn update_dossier(&mut self, command: UpdateDossierCommand) -> Result<DossierResult, DossierError> {
        let draft = Self::prepare_draft(command.draft);
        info!("Updating dossier: {}", command.dossier_id);

        validate_dossier(&draft).map_err(|e| {
            warn!("Rejected update of dossier {}: {}", command.dossier_id, e);
            e
        })?;

        let dossier = self.store.update(&command.dossier_id, draft).map_err(|e| {
            if let DossierError::NotFound(id) = &e {
                warn!("Dossier not found: {}", id);
            }
            e
        })?;
        self.store.save()?;

        info!("Updated dossier #{} {}", dossier.number, dossier.name);
        Ok(DossierResult {
            dossier,
            success_message: "Dossier modifié avec succès".to_string(),
        })
    }

    /// Delete a dossier. Deleting an unknown ID succeeds without touching storage.
    pub fn delete_dossier(&mut self, command: DeleteDossierCommand) -> Result<DeleteDossierResult, DossierError> {
        info!("Deleting dossier: {}", command.dossier_id);

        let Some(deleted) = self.store.remove(&command.dossier_id) else {
            info!("No dossier with ID {}, nothing to delete", command.dossier_id);
            return Ok(DeleteDossierResult {
                deleted: None,
                success_message: "Aucun dossier à supprimer".to_string(),
            });
        };
        self.store.save()?;

        info!("Deleted dossier #{} {}", deleted.number, deleted.name);
        Ok(DeleteDossierResult {
            deleted: Some(deleted),
            success_message: "Dossier supprimé avec succès".to_string(),
        })
    }

    pub fn get_dossier(&self, dossier_id: &str) -> Option<&Dossier> {
        self.store.get(dossier_id)
    }

    /// All dossiers in insertion order
    pub fn list_dossiers(&self) -> &[Dossier] {
        self.store.dossiers()
    }

    pub fn next_number(&self) -> u32 {
        self.store.next_number()
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Dossier> {
        self.query_service.search(self.store.dossiers(), criteria)
    }

    pub fn completed(&self) -> Vec<Dossier> {
        self.query_service.completed(self.store.dossiers())
    }

    pub fn with_missing_documents(&self) -> Vec<Dossier> {
        self.query_service.with_missing_documents(self.store.dossiers())
    }

    pub fn entry_totals(&self) -> EntryTotals {
        self.query_service.entry_totals(self.store.dossiers())
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    fn prepare_draft(mut draft: DossierDraft) -> DossierDraft {
        draft.name = normalize_name(draft.name.trim());
        draft
    }
}
