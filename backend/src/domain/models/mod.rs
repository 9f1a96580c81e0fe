pub mod dossier;

pub use dossier::*;
