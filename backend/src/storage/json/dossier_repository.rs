//! # JSON Dossier Repository
//!
//! Stores the whole dossier collection as one JSON array in
//! `{data_directory}/{collection_key}.json`.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {
//!     "id": "dossier::1718000000000",
//!     "number": 1,
//!     "name": "Dupont",
//!     "arrivalDate": "2024-06-10",
//!     "state": "Terminé",
//!     "completionDate": "2024-06-30",
//!     "entryCount": 42,
//!     "enteredDocuments": ["Factures"],
//!     "missingDocuments": [],
//!     "otherDetail": null,
//!     "remark": ""
//!   }
//! ]
//! ```
//!
//! Payloads exported from the browser version of the application use French
//! keys (`nom`, `dateArrivee`, `etat`, ...), numeric IDs and string entry
//! counts; they are accepted as-is. A text entry count is read by its leading
//! integer ("12 ecritures" is 12).
//!
//! Every loaded record must satisfy the same rules as a newly entered one; a
//! completed dossier without a usable entry count makes the payload unreadable
//! instead of being loaded half-empty.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::connection::JsonConnection;
use crate::domain::models::{Dossier, DossierDraft, DossierState};
use crate::domain::validator::validate_dossier;
use crate::storage::traits::{DossierStorage, StorageError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value stored either as text or as a JSON number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Number(n) => n.to_string(),
            TextOrNumber::Text(s) => s,
        }
    }

    /// Non-negative integral value fitting a `u32`; integral floats such as
    /// `12.0` count, text is read up to its first non-digit.
    fn to_count(&self) -> Option<u32> {
        match self {
            TextOrNumber::Number(n) => match n.as_u64() {
                Some(value) => u32::try_from(value).ok(),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32),
            },
            TextOrNumber::Text(raw) => leading_integer(raw),
        }
    }
}

fn leading_integer(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().ok()
}

/// JSON record structure for dossiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DossierRecord {
    id: TextOrNumber,
    number: u32,
    #[serde(alias = "nom")]
    name: String,
    #[serde(alias = "dateArrivee")]
    arrival_date: String,
    #[serde(alias = "etat")]
    state: String,
    #[serde(default, alias = "dateFin")]
    completion_date: Option<String>,
    #[serde(default, alias = "nombreEcritures")]
    entry_count: Option<TextOrNumber>,
    #[serde(default, alias = "piecesSaisies")]
    entered_documents: Vec<String>,
    #[serde(default, alias = "piecesManquantes")]
    missing_documents: Vec<String>,
    #[serde(default, alias = "autresDetail")]
    other_detail: Option<String>,
    #[serde(default, alias = "remarque")]
    remark: Option<String>,
}

impl From<&Dossier> for DossierRecord {
    fn from(dossier: &Dossier) -> Self {
        DossierRecord {
            id: TextOrNumber::Text(dossier.id.clone()),
            number: dossier.number,
            name: dossier.name.clone(),
            arrival_date: dossier.arrival_date.format(DATE_FORMAT).to_string(),
            state: dossier.state.label().to_string(),
            completion_date: dossier
                .completion_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            entry_count: dossier.entry_count.map(|n| TextOrNumber::Number(n.into())),
            entered_documents: dossier.entered_documents.clone(),
            missing_documents: dossier.missing_documents.clone(),
            other_detail: dossier.other_detail.clone(),
            remark: Some(dossier.remark.clone()),
        }
    }
}

impl TryFrom<DossierRecord> for Dossier {
    type Error = String;

    fn try_from(record: DossierRecord) -> Result<Self, String> {
        let id = record.id.into_text();

        let arrival_date = NaiveDate::parse_from_str(&record.arrival_date, DATE_FORMAT)
            .map_err(|e| format!("dossier {}: invalid arrival date '{}': {}", id, record.arrival_date, e))?;

        let state = DossierState::from_label(&record.state)
            .ok_or_else(|| format!("dossier {}: missing state", id))?;

        let completion_date = match record.completion_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|e| format!("dossier {}: invalid completion date '{}': {}", id, raw, e))?,
            ),
        };

        let entry_count = match record.entry_count {
            None => None,
            Some(TextOrNumber::Text(raw)) if raw.trim().is_empty() => None,
            Some(value) => {
                let count = value.to_count();
                if count.is_none() {
                    warn!("Dossier {} has an unusable entry count '{}', ignoring it", id, value.into_text());
                }
                count
            }
        };

        let dossier = Dossier {
            id,
            number: record.number,
            name: record.name,
            arrival_date,
            state,
            completion_date,
            entry_count,
            entered_documents: record.entered_documents,
            missing_documents: record.missing_documents,
            other_detail: record.other_detail.filter(|d| !d.is_empty()),
            remark: record.remark.unwrap_or_default(),
        };

        validate_dossier(&DossierDraft::from(&dossier))
            .map_err(|e| format!("dossier {}: {}", dossier.id, e))?;
        Ok(dossier)
    }
}

/// File-backed dossier repository
#[derive(Debug, Clone)]
pub struct JsonDossierRepository {
    connection: JsonConnection,
    collection_key: String,
}

impl JsonDossierRepository {
    pub fn new(connection: JsonConnection, collection_key: impl Into<String>) -> Self {
        Self {
            connection,
            collection_key: collection_key.into(),
        }
    }

    fn collection_path(&self) -> PathBuf {
        self.connection.collection_path(&self.collection_key)
    }

    fn deserialization_error(&self, message: String) -> StorageError {
        StorageError::Deserialization {
            collection: self.collection_key.clone(),
            message,
        }
    }

    fn persistence_error(&self, message: String) -> StorageError {
        StorageError::Persistence {
            collection: self.collection_key.clone(),
            message,
        }
    }
}

impl DossierStorage for JsonDossierRepository {
    fn collection_key(&self) -> &str {
        &self.collection_key
    }

    fn load_collection(&self) -> Result<Vec<Dossier>, StorageError> {
        let path = self.collection_path();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored collection at {}, starting empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(self.deserialization_error(format!("failed to read {}: {}", path.display(), e)));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<DossierRecord> = serde_json::from_str(&content)
            .map_err(|e| self.deserialization_error(e.to_string()))?;

        let dossiers = records
            .into_iter()
            .map(Dossier::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| self.deserialization_error(message))?;

        info!("Loaded {} dossiers from {}", dossiers.len(), path.display());
        Ok(dossiers)
    }

    fn save_collection(&self, dossiers: &[Dossier]) -> Result<(), StorageError> {
        let path = self.collection_path();
        let records: Vec<DossierRecord> = dossiers.iter().map(DossierRecord::from).collect();

        let content = serde_json::to_string_pretty(&records)
            .map_err(|e| self.persistence_error(e.to_string()))?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .map_err(|e| self.persistence_error(format!("failed to write {}: {}", temp_path.display(), e)))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| self.persistence_error(format!("failed to replace {}: {}", path.display(), e)))?;

        debug!("Saved {} dossiers to {}", dossiers.len(), path.display());
        Ok(())
    }
}
