//! # Storage Traits
//!
//! The storage port the domain layer persists dossiers through. The whole
//! collection is the unit of persistence: it is always loaded and saved as a
//! single ordered sequence.

use crate::domain::models::Dossier;

/// Failures of the persistence transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The stored payload exists but cannot be turned back into dossiers
    #[error("Stored collection '{collection}' is unreadable: {message}")]
    Deserialization { collection: String, message: String },

    /// The collection could not be written
    #[error("Erreur lors de l'enregistrement des données ({collection}): {message}")]
    Persistence { collection: String, message: String },
}

/// Trait defining the interface for dossier collection storage
///
/// Implementations behave like a key-value blob store holding one serialized
/// collection under a fixed key.
pub trait DossierStorage: Send + Sync {
    /// Key the collection is stored under, used to label errors
    fn collection_key(&self) -> &str;

    /// Load the full collection in stored order.
    /// A collection that was never saved loads as empty.
    fn load_collection(&self) -> Result<Vec<Dossier>, StorageError>;

    /// Replace the stored collection with `dossiers`
    fn save_collection(&self, dossiers: &[Dossier]) -> Result<(), StorageError>;
}
