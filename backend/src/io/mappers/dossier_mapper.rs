use chrono::NaiveDate;
use log::debug;
use shared::{
    CompletedDossierRow, Dossier as DossierDto, DossierFormRequest, EntryTotalRow,
    EntryTotalsResponse, MissingDocumentsRow, SearchDossiersRequest,
};

use crate::domain::models::{Dossier, DossierDraft, DossierState, OTHER_DOCUMENT_TAG};
use crate::domain::normalizer::missing_documents_label;
use crate::domain::query::{EntryTotals, SearchCriteria};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form values that cannot be turned into typed fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Date invalide pour {field}: '{value}' (format attendu AAAA-MM-JJ)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Nombre d'écritures invalide: '{0}'")]
    InvalidEntryCount(String),
}

pub struct DossierMapper;

impl DossierMapper {
    /// Convert raw form values into a draft.
    ///
    /// Blank fields become `None`; only malformed dates and entry counts are
    /// rejected here. Required-field rules are left to the validator.
    pub fn form_to_draft(form: DossierFormRequest) -> Result<DossierDraft, FormError> {
        let missing_documents = Self::clean_tags(form.missing_documents);
        let other_detail = Self::non_blank(&form.other_detail);
        if other_detail.is_some() && !missing_documents.iter().any(|t| t == OTHER_DOCUMENT_TAG) {
            debug!("Keeping other-document detail without the '{}' tag", OTHER_DOCUMENT_TAG);
        }

        Ok(DossierDraft {
            name: form.name.trim().to_string(),
            arrival_date: Self::parse_optional_date("arrival_date", &form.arrival_date)?,
            state: DossierState::from_label(&form.state),
            completion_date: Self::parse_optional_date("completion_date", &form.completion_date)?,
            entry_count: Self::parse_entry_count(&form.entry_count)?,
            entered_documents: Self::clean_tags(form.entered_documents),
            missing_documents,
            other_detail,
            remark: form.remark.trim().to_string(),
        })
    }

    /// Pre-fill a form with a dossier's current values
    pub fn to_form(dossier: &Dossier) -> DossierFormRequest {
        DossierFormRequest {
            name: dossier.name.clone(),
            arrival_date: Self::format_date(dossier.arrival_date),
            state: dossier.state.label().to_string(),
            completion_date: dossier.completion_date.map(Self::format_date).unwrap_or_default(),
            entry_count: dossier.entry_count.map(|n| n.to_string()).unwrap_or_default(),
            entered_documents: dossier.entered_documents.clone(),
            missing_documents: dossier.missing_documents.clone(),
            other_detail: dossier.other_detail.clone().unwrap_or_default(),
            remark: dossier.remark.clone(),
        }
    }

    pub fn search_request_to_criteria(request: SearchDossiersRequest) -> Result<SearchCriteria, FormError> {
        Ok(SearchCriteria {
            name: request.name.filter(|n| !n.is_empty()),
            start_date: match request.start_date {
                Some(raw) => Self::parse_optional_date("start_date", &raw)?,
                None => None,
            },
            end_date: match request.end_date {
                Some(raw) => Self::parse_optional_date("end_date", &raw)?,
                None => None,
            },
        })
    }

    /// Convert domain Dossier to shared Dossier DTO
    pub fn to_dto(dossier: &Dossier) -> DossierDto {
        DossierDto {
            id: dossier.id.clone(),
            number: dossier.number,
            name: dossier.name.clone(),
            arrival_date: Self::format_date(dossier.arrival_date),
            state: dossier.state.label().to_string(),
            completion_date: dossier.completion_date.map(Self::format_date),
            entry_count: dossier.entry_count,
            entered_documents: dossier.entered_documents.clone(),
            missing_documents: dossier.missing_documents.clone(),
            other_detail: dossier.other_detail.clone(),
            remark: dossier.remark.clone(),
        }
    }

    pub fn to_dto_list(dossiers: &[Dossier]) -> Vec<DossierDto> {
        dossiers.iter().map(Self::to_dto).collect()
    }

    pub fn to_completed_row(dossier: &Dossier) -> CompletedDossierRow {
        CompletedDossierRow {
            arrival_date: Self::format_date(dossier.arrival_date),
            name: dossier.name.clone(),
            entry_count: dossier.entry_count,
        }
    }

    pub fn to_missing_documents_row(dossier: &Dossier) -> MissingDocumentsRow {
        MissingDocumentsRow {
            arrival_date: Self::format_date(dossier.arrival_date),
            name: dossier.name.clone(),
            missing_documents: missing_documents_label(dossier),
        }
    }

    pub fn to_entry_totals_response(totals: EntryTotals) -> EntryTotalsResponse {
        EntryTotalsResponse {
            groups: totals
                .groups
                .into_iter()
                .map(|g| EntryTotalRow {
                    name: g.name,
                    total: g.total,
                    count: g.count,
                })
                .collect(),
            grand_total: totals.grand_total,
        }
    }

    fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    fn parse_optional_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, FormError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| FormError::InvalidDate {
                field,
                value: raw.to_string(),
            })
    }

    fn parse_entry_count(raw: &str) -> Result<Option<u32>, FormError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<u32>()
            .map(Some)
            .map_err(|_| FormError::InvalidEntryCount(raw.to_string()))
    }

    /// Trim tags, drop blanks and repeated tags, keep selection order
    fn clean_tags(tags: Vec<String>) -> Vec<String> {
        let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() && !cleaned.iter().any(|t| t == tag) {
                cleaned.push(tag.to_string());
            }
        }
        cleaned
    }

    fn non_blank(raw: &str) -> Option<String> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| raw.to_string())
    }
}
