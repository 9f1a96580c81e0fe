use serde::{Deserialize, Serialize};

/// Dossier as exchanged with a presentation layer.
///
/// Dates are ISO calendar dates ("YYYY-MM-DD"); the state is its French label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    /// Dossier ID in format: "dossier::epoch_millis"
    pub id: String,
    /// Sequential dossier number, never reassigned while the dossier exists
    pub number: u32,
    /// Display-normalized name ("Jean dupont")
    pub name: String,
    pub arrival_date: String,
    /// State label: "En attente", "En cours", "Terminé" or any custom label
    pub state: String,
    pub completion_date: Option<String>,
    /// Number of écritures, set once the dossier is completed
    pub entry_count: Option<u32>,
    pub entered_documents: Vec<String>,
    pub missing_documents: Vec<String>,
    /// Elaboration of the "Autres" missing-document tag
    pub other_detail: Option<String>,
    pub remark: String,
}

/// Raw form values as typed by the user.
///
/// Every field is free text; empty strings mean "not provided". Parsing and
/// validation happen in the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DossierFormRequest {
    pub name: String,
    pub arrival_date: String,
    pub state: String,
    pub completion_date: String,
    pub entry_count: String,
    pub entered_documents: Vec<String>,
    pub missing_documents: Vec<String>,
    pub other_detail: String,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDossierRequest {
    pub dossier_id: String,
    pub form: DossierFormRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDossierRequest {
    pub dossier_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierResponse {
    pub dossier: Dossier,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDossierResponse {
    /// False when no dossier carried the requested ID
    pub deleted: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierListResponse {
    pub dossiers: Vec<Dossier>,
}

/// Search parameters from the search form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDossiersRequest {
    /// Name fragment, matched case-insensitively
    pub name: Option<String>,
    /// Inclusive lower bound on the arrival date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound on the arrival date (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// One row of the "dossiers traités" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedDossierRow {
    pub arrival_date: String,
    pub name: String,
    pub entry_count: Option<u32>,
}

/// One row of the "pièces manquantes" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingDocumentsRow {
    pub arrival_date: String,
    pub name: String,
    /// Missing tags plus the "Autres" detail, diacritics stripped
    pub missing_documents: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryTotalRow {
    pub name: String,
    pub total: u64,
    /// Number of dossiers that contributed an entry count
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryTotalsResponse {
    pub groups: Vec<EntryTotalRow>,
    pub grand_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReportsResponse {
    pub files: Vec<String>,
    pub success_message: String,
}
