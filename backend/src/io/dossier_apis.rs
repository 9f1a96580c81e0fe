//! Dossier entry points for a presentation layer.
//!
//! Each function takes the public request DTO, maps it into a domain command,
//! runs it and maps the outcome back. Errors come back as `ApiError`, whose
//! `Display` text is the message to show the user.

use log::{error, info};
use shared::{
    CompletedDossierRow, DeleteDossierRequest, DeleteDossierResponse, DossierFormRequest,
    DossierListResponse, DossierResponse, EntryTotalsResponse, ExportReportsResponse,
    MissingDocumentsRow, SearchDossiersRequest, UpdateDossierRequest,
};
use std::path::Path;

use super::mappers::dossier_mapper::{DossierMapper, FormError};
use crate::domain::commands::dossiers::{
    CreateDossierCommand, DeleteDossierCommand, UpdateDossierCommand,
};
use crate::domain::{DossierError, DossierService, ExportService};
use crate::storage::DossierStorage;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Dossier(#[from] DossierError),

    #[error("Export impossible: {0}")]
    Export(String),
}

pub fn create_dossier<S: DossierStorage>(
    service: &mut DossierService<S>,
    request: DossierFormRequest,
) -> Result<DossierResponse, ApiError> {
    let draft = DossierMapper::form_to_draft(request)?;
    let result = service.add_dossier(CreateDossierCommand { draft })?;

    Ok(DossierResponse {
        dossier: DossierMapper::to_dto(&result.dossier),
        success_message: result.success_message,
    })
}

pub fn update_dossier<S: DossierStorage>(
    service: &mut DossierService<S>,
    request: UpdateDossierRequest,
) -> Result<DossierResponse, ApiError> {
    let draft = DossierMapper::form_to_draft(request.form)?;
    let result = service.update_dossier(UpdateDossierCommand {
        dossier_id: request.dossier_id,
        draft,
    })?;

    Ok(DossierResponse {
        dossier: DossierMapper::to_dto(&result.dossier),
        success_message: result.success_message,
    })
}

pub fn delete_dossier<S: DossierStorage>(
    service: &mut DossierService<S>,
    request: DeleteDossierRequest,
) -> Result<DeleteDossierResponse, ApiError> {
    let result = service.delete_dossier(DeleteDossierCommand {
        dossier_id: request.dossier_id,
    })?;

    Ok(DeleteDossierResponse {
        deleted: result.deleted.is_some(),
        success_message: result.success_message,
    })
}

/// Current values of a dossier, ready to pre-fill the modify form
pub fn get_dossier_form<S: DossierStorage>(
    service: &DossierService<S>,
    dossier_id: &str,
) -> Result<DossierFormRequest, ApiError> {
    service
        .get_dossier(dossier_id)
        .map(DossierMapper::to_form)
        .ok_or_else(|| DossierError::NotFound(dossier_id.to_string()).into())
}

pub fn list_dossiers<S: DossierStorage>(service: &DossierService<S>) -> DossierListResponse {
    DossierListResponse {
        dossiers: DossierMapper::to_dto_list(service.list_dossiers()),
    }
}

pub fn search_dossiers<S: DossierStorage>(
    service: &DossierService<S>,
    request: SearchDossiersRequest,
) -> Result<DossierListResponse, ApiError> {
    let criteria = DossierMapper::search_request_to_criteria(request)?;
    let results = service.search(&criteria);
    info!("🔍 Search returned {} dossiers", results.len());

    Ok(DossierListResponse {
        dossiers: DossierMapper::to_dto_list(&results),
    })
}

pub fn completed_report<S: DossierStorage>(service: &DossierService<S>) -> Vec<CompletedDossierRow> {
    service
        .completed()
        .iter()
        .map(DossierMapper::to_completed_row)
        .collect()
}

pub fn missing_documents_report<S: DossierStorage>(service: &DossierService<S>) -> Vec<MissingDocumentsRow> {
    service
        .with_missing_documents()
        .iter()
        .map(DossierMapper::to_missing_documents_row)
        .collect()
}

pub fn entry_totals_report<S: DossierStorage>(service: &DossierService<S>) -> EntryTotalsResponse {
    DossierMapper::to_entry_totals_response(service.entry_totals())
}

pub fn export_reports<S: DossierStorage>(
    service: &DossierService<S>,
    directory: &Path,
) -> Result<ExportReportsResponse, ApiError> {
    let files = ExportService::new()
        .export_reports_to_dir(directory, service.list_dossiers())
        .map_err(|e| {
            error!("❌ EXPORT failed: {:#}", e);
            ApiError::Export(format!("{:#}", e))
        })?;

    Ok(ExportReportsResponse {
        files: files.iter().map(|p| p.display().to_string()).collect(),
        success_message: format!("{} rapports exportés", files.len()),
    })
}
