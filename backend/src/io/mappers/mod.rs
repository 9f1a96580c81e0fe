pub mod dossier_mapper;

pub use dossier_mapper::{DossierMapper, FormError};
