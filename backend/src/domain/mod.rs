//! # Domain Module
//!
//! Business logic of the dossier tracker, independent of any storage medium
//! or user interface.
//!
//! ## Module Organization
//!
//! - **models**: the `Dossier` record, its draft form and workflow states
//! - **validator**: required-field rules checked before any change
//! - **normalizer**: canonical name form and diacritic stripping
//! - **store**: the ordered in-memory collection and dossier numbering
//! - **query**: search and report views derived from the collection
//! - **dossier_service**: add/update/delete orchestration with persistence
//! - **export_service**: CSV rendering of the reports
//!
//! ## Business Rules
//!
//! - A dossier needs a name, an arrival date and a state
//! - A completed ("Terminé") dossier also needs a completion date and an
//!   entry count
//! - Numbers are assigned as one past the current highest number
//! - Listings and reports follow insertion order

pub mod commands;
pub mod dossier_service;
pub mod error;
pub mod export_service;
pub mod models;
pub mod normalizer;
pub mod query;
pub mod store;
pub mod validator;

pub use dossier_service::DossierService;
pub use error::DossierError;
pub use export_service::ExportService;
pub use normalizer::{normalize_name, strip_diacritics};
pub use query::{EntryTotalGroup, EntryTotals, QueryService, SearchCriteria};
pub use store::DossierStore;
pub use validator::validate_dossier;
