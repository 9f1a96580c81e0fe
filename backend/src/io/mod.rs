//! # IO Module
//!
//! Interface layer between a user interface and the domain logic.
//!
//! Translates the request DTOs of the `shared` crate into domain commands and
//! formats domain results back into response DTOs. No business rule lives
//! here: raw form values are only parsed into typed fields, and every
//! required-field check is left to the domain validator.

pub mod dossier_apis;
pub mod mappers;

pub use dossier_apis::*;
