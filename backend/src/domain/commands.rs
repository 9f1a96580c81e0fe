//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed to a presentation layer. The mappers in `io` translate the public
//! DTOs defined in the `shared` crate to these internal types.

pub mod dossiers {
    use crate::domain::models::{Dossier, DossierDraft};

    /// Input for creating a new dossier.
    #[derive(Debug, Clone)]
    pub struct CreateDossierCommand {
        pub draft: DossierDraft,
    }

    /// Input for replacing the content of an existing dossier.
    #[derive(Debug, Clone)]
    pub struct UpdateDossierCommand {
        pub dossier_id: String,
        pub draft: DossierDraft,
    }

    /// Input for deleting a dossier.
    #[derive(Debug, Clone)]
    pub struct DeleteDossierCommand {
        pub dossier_id: String,
    }

    /// Result of a create or update.
    #[derive(Debug, Clone)]
    pub struct DossierResult {
        pub dossier: Dossier,
        pub success_message: String,
    }

    /// Result of a delete. `deleted` is `None` when the ID was unknown.
    #[derive(Debug, Clone)]
    pub struct DeleteDossierResult {
        pub deleted: Option<Dossier>,
        pub success_message: String,
    }
}
