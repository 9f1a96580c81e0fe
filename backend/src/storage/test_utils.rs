//! Test utilities with automatic cleanup.
//!
//! The temporary data directory lives as long as the `TestEnvironment`, so test
//! data is removed even if a test panics.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

use super::json::{JsonConnection, JsonDossierRepository};
use crate::domain::models::{Dossier, DossierState};

pub struct TestEnvironment {
    /// Kept alive to prevent cleanup until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("dossier_tracker_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn dossier_repository(&self) -> JsonDossierRepository {
        JsonDossierRepository::new(self.connection.clone(), "dossiers")
    }
}

/// An in-progress dossier with no documents
pub fn sample_dossier(number: u32, name: &str, arrival_date: &str) -> Dossier {
    Dossier {
        id: Dossier::generate_id(1_700_000_000_000 + u64::from(number)),
        number,
        name: name.to_string(),
        arrival_date: NaiveDate::parse_from_str(arrival_date, "%Y-%m-%d")
            .expect("test dates are ISO formatted"),
        state: DossierState::InProgress,
        completion_date: None,
        entry_count: None,
        entered_documents: Vec::new(),
        missing_documents: Vec::new(),
        other_detail: None,
        remark: String::new(),
    }
}
