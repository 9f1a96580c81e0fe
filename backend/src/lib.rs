//! # Dossier Tracker Backend
//!
//! Keeps a collection of accounting case files ("dossiers") through intake,
//! processing and completion, persisted as a single JSON collection.
//!
//! - **domain**: records, validation, normalization, queries and lifecycle
//! - **storage**: the persistence port and its JSON and in-memory adapters
//! - **io**: request/response mapping for a presentation layer
//! - **config**: YAML configuration and data directory resolution

use anyhow::Result;
use log::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

pub use config::AppConfig;
pub use domain::DossierService;
pub use storage::{JsonConnection, JsonDossierRepository};

/// Open the configured collection and load it into a ready service
pub fn initialize_backend(config: &AppConfig) -> Result<DossierService<JsonDossierRepository>> {
    info!("Setting up storage");
    let connection = JsonConnection::new(config.data_directory())?;
    let repository = JsonDossierRepository::new(connection, config.collection_key.clone());

    info!("Setting up domain model");
    let mut service = DossierService::new(repository);
    let loaded = service.load();
    info!("Backend ready with {} dossiers", loaded);

    Ok(service)
}
