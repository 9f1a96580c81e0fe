use crate::domain::models::DossierValidationError;
use crate::storage::StorageError;

/// Errors returned by dossier lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DossierError {
    #[error(transparent)]
    Validation(#[from] DossierValidationError),

    #[error("Dossier introuvable: {0}")]
    NotFound(String),

    #[error("Plus aucun numéro de dossier disponible")]
    NumberingExhausted,

    /// The change was applied in memory but could not be written to storage
    #[error(transparent)]
    Persistence(#[from] StorageError),
}
