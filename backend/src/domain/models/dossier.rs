//! Domain model for a dossier (case file).

use chrono::NaiveDate;
use std::fmt;

/// Tag selected in the missing-documents checklist when the missing piece
/// needs a free-text description.
pub const OTHER_DOCUMENT_TAG: &str = "Autres";

/// Workflow state of a dossier.
///
/// The set of labels is open: anything that is not one of the known labels is
/// kept verbatim as `Other`. Only `Completed` carries extra requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DossierState {
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl DossierState {
    pub const PENDING_LABEL: &'static str = "En attente";
    pub const IN_PROGRESS_LABEL: &'static str = "En cours";
    pub const COMPLETED_LABEL: &'static str = "Terminé";

    /// Parse a state label; the empty label has no state.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label {
            "" => None,
            Self::PENDING_LABEL => Some(DossierState::Pending),
            Self::IN_PROGRESS_LABEL => Some(DossierState::InProgress),
            Self::COMPLETED_LABEL => Some(DossierState::Completed),
            other => Some(DossierState::Other(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DossierState::Pending => Self::PENDING_LABEL,
            DossierState::InProgress => Self::IN_PROGRESS_LABEL,
            DossierState::Completed => Self::COMPLETED_LABEL,
            DossierState::Other(label) => label,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DossierState::Completed)
    }
}

impl fmt::Display for DossierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dossier that passed validation and carries its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Dossier {
    pub id: String,
    pub number: u32,
    pub name: String,
    pub arrival_date: NaiveDate,
    pub state: DossierState,
    pub completion_date: Option<NaiveDate>,
    pub entry_count: Option<u32>,
    pub entered_documents: Vec<String>,
    pub missing_documents: Vec<String>,
    pub other_detail: Option<String>,
    pub remark: String,
}

impl Dossier {
    /// Generate a dossier ID from a creation timestamp
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("dossier::{}", timestamp_millis)
    }

    /// Build a dossier from a draft that already passed validation.
    ///
    /// Fails when one of the always-present fields is absent, so a draft that
    /// skipped validation can never become a dossier.
    pub fn from_draft(id: String, number: u32, draft: DossierDraft) -> Result<Self, DossierValidationError> {
        Ok(Dossier {
            id,
            number,
            name: draft.name,
            arrival_date: draft.arrival_date.ok_or(DossierValidationError::MissingArrivalDate)?,
            state: draft.state.ok_or(DossierValidationError::MissingState)?,
            completion_date: draft.completion_date,
            entry_count: draft.entry_count,
            entered_documents: draft.entered_documents,
            missing_documents: draft.missing_documents,
            other_detail: draft.other_detail,
            remark: draft.remark,
        })
    }

    /// Replace every mutable field, keeping `id` and `number`.
    pub(crate) fn apply_draft(&mut self, draft: DossierDraft) -> Result<(), DossierValidationError> {
        let arrival_date = draft.arrival_date.ok_or(DossierValidationError::MissingArrivalDate)?;
        let state = draft.state.ok_or(DossierValidationError::MissingState)?;
        self.name = draft.name;
        self.arrival_date = arrival_date;
        self.state = state;
        self.completion_date = draft.completion_date;
        self.entry_count = draft.entry_count;
        self.entered_documents = draft.entered_documents;
        self.missing_documents = draft.missing_documents;
        self.other_detail = draft.other_detail;
        self.remark = draft.remark;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn has_missing_documents(&self) -> bool {
        !self.missing_documents.is_empty()
    }
}

/// Candidate dossier content before validation.
///
/// Every field a user may leave blank is optional here; the validator decides
/// which absences are acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DossierDraft {
    pub name: String,
    pub arrival_date: Option<NaiveDate>,
    pub state: Option<DossierState>,
    pub completion_date: Option<NaiveDate>,
    pub entry_count: Option<u32>,
    pub entered_documents: Vec<String>,
    pub missing_documents: Vec<String>,
    pub other_detail: Option<String>,
    pub remark: String,
}

impl From<&Dossier> for DossierDraft {
    fn from(dossier: &Dossier) -> Self {
        DossierDraft {
            name: dossier.name.clone(),
            arrival_date: Some(dossier.arrival_date),
            state: Some(dossier.state.clone()),
            completion_date: dossier.completion_date,
            entry_count: dossier.entry_count,
            entered_documents: dossier.entered_documents.clone(),
            missing_documents: dossier.missing_documents.clone(),
            other_detail: dossier.other_detail.clone(),
            remark: dossier.remark.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DossierValidationError {
    #[error("Le nom du dossier est requis")]
    MissingName,
    #[error("La date d'arrivée est requise")]
    MissingArrivalDate,
    #[error("L'état du dossier est requis")]
    MissingState,
    #[error("La date de fin est requise pour un dossier terminé")]
    MissingCompletionDate,
    #[error("Le nombre d'écritures est requis pour un dossier terminé")]
    MissingEntryCount,
}
