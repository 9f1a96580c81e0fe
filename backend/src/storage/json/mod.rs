pub mod connection;
pub mod dossier_repository;

pub use connection::JsonConnection;
pub use dossier_repository::JsonDossierRepository;
