//! # Storage Module
//!
//! Persistence of the dossier collection.
//!
//! The domain layer only sees the [`DossierStorage`] port; this module provides
//! the implementations behind it:
//!
//! - **json**: one JSON file per collection in the data directory
//! - **memory**: process-local storage for tests and dry runs

pub mod json;
pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use json::{JsonConnection, JsonDossierRepository};
pub use memory::InMemoryStorage;
pub use traits::{DossierStorage, StorageError};
