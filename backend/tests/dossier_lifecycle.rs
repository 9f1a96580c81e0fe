use dossier_tracker::domain::commands::dossiers::{
    CreateDossierCommand, DeleteDossierCommand, UpdateDossierCommand,
};
use dossier_tracker::domain::models::{DossierDraft, DossierState, DossierValidationError};
use dossier_tracker::domain::{DossierError, DossierService, SearchCriteria};
use dossier_tracker::io::{self, ApiError};
use dossier_tracker::storage::{DossierStorage, JsonConnection, JsonDossierRepository};
use dossier_tracker::{initialize_backend, AppConfig};
use shared::{DossierFormRequest, SearchDossiersRequest};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open_service(dir: &Path) -> DossierService<JsonDossierRepository> {
    let connection = JsonConnection::new(dir).expect("Failed to open data directory");
    let mut service = DossierService::new(JsonDossierRepository::new(connection, "dossiers"));
    service.load();
    service
}

fn draft(name: &str, arrival: &str, state: DossierState) -> DossierDraft {
    DossierDraft {
        name: name.to_string(),
        arrival_date: Some(arrival.parse().expect("valid date")),
        state: Some(state),
        ..Default::default()
    }
}

fn completed(name: &str, arrival: &str, entries: Option<u32>) -> DossierDraft {
    DossierDraft {
        completion_date: Some(arrival.parse().expect("valid date")),
        entry_count: entries,
        ..draft(name, arrival, DossierState::Completed)
    }
}

fn add(service: &mut DossierService<JsonDossierRepository>, draft: DossierDraft) -> String {
    service
        .add_dossier(CreateDossierCommand { draft })
        .expect("Failed to add dossier")
        .dossier
        .id
}

#[test]
fn test_collection_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let mut service = open_service(temp_dir.path());
    add(&mut service, draft("jean dupont", "2024-03-01", DossierState::InProgress));
    add(
        &mut service,
        DossierDraft {
            missing_documents: vec!["Relevés bancaires".to_string(), "Autres".to_string()],
            other_detail: Some("Contrat de prêt".to_string()),
            remark: "Rappel le 15".to_string(),
            ..completed("marie curie", "2024-03-05", Some(42))
        },
    );
    let before = service.list_dossiers().to_vec();

    let reopened = open_service(temp_dir.path());

    assert_eq!(reopened.list_dossiers(), before.as_slice());
    assert_eq!(reopened.next_number(), 3);
}

#[test]
fn test_numbering_follows_highest_number() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());

    let first = add(&mut service, draft("A", "2024-01-01", DossierState::Pending));
    add(&mut service, draft("B", "2024-01-02", DossierState::Pending));
    let third = add(&mut service, draft("C", "2024-01-03", DossierState::Pending));
    assert_eq!(service.next_number(), 4);

    service
        .delete_dossier(DeleteDossierCommand { dossier_id: first })
        .unwrap();
    assert_eq!(service.next_number(), 4);

    service
        .delete_dossier(DeleteDossierCommand { dossier_id: third })
        .unwrap();
    assert_eq!(service.next_number(), 3);

    let reopened = open_service(temp_dir.path());
    assert_eq!(reopened.next_number(), 3);
}

#[test]
fn test_search_matches_normalized_names() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());
    add(&mut service, draft("jean dupont", "2024-02-01", DossierState::Pending));
    add(&mut service, draft("éJean", "2024-02-10", DossierState::Pending));
    add(&mut service, draft("Paul", "2024-02-10", DossierState::Pending));

    let criteria = SearchCriteria {
        name: Some("jean".to_string()),
        ..Default::default()
    };
    let names: Vec<String> = service.search(&criteria).into_iter().map(|d| d.name).collect();

    assert_eq!(names, vec!["Jean dupont".to_string(), "Ejean".to_string()]);
}

#[test]
fn test_search_date_bounds_are_inclusive() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());
    add(&mut service, draft("Avant", "2024-01-31", DossierState::Pending));
    add(&mut service, draft("Debut", "2024-02-01", DossierState::Pending));
    add(&mut service, draft("Fin", "2024-02-29", DossierState::Pending));
    add(&mut service, draft("Apres", "2024-03-01", DossierState::Pending));

    let response = io::search_dossiers(
        &service,
        SearchDossiersRequest {
            name: None,
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-02-29".to_string()),
        },
    )
    .unwrap();

    let names: Vec<&str> = response.dossiers.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Debut", "Fin"]);
}

#[test]
fn test_entry_totals_group_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());
    add(&mut service, completed("A", "2024-01-01", Some(3)));
    add(&mut service, completed("A", "2024-01-02", Some(5)));
    add(&mut service, draft("B", "2024-01-03", DossierState::InProgress));

    let totals = service.entry_totals();

    let a = totals.group("A").expect("group A");
    assert_eq!((a.total, a.count), (8, 2));
    let b = totals.group("B").expect("group B");
    assert_eq!((b.total, b.count), (0, 0));
    assert_eq!(totals.grand_total, 8);
}

#[test]
fn test_rejected_changes_leave_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());
    let id = add(&mut service, draft("Dupont", "2024-04-01", DossierState::Pending));
    let path = temp_dir.path().join("dossiers.json");
    let stored = fs::read_to_string(&path).unwrap();

    let err = service
        .add_dossier(CreateDossierCommand {
            draft: completed("Martin", "2024-04-02", None),
        })
        .unwrap_err();
    assert_eq!(
        err,
        DossierError::Validation(DossierValidationError::MissingEntryCount)
    );

    let err = service
        .update_dossier(UpdateDossierCommand {
            dossier_id: "dossier::0".to_string(),
            draft: draft("Dupont", "2024-04-01", DossierState::InProgress),
        })
        .unwrap_err();
    assert_eq!(err, DossierError::NotFound("dossier::0".to_string()));

    assert_eq!(service.list_dossiers().len(), 1);
    assert_eq!(service.list_dossiers()[0].id, id);
    assert_eq!(fs::read_to_string(&path).unwrap(), stored);
}

#[test]
fn test_corrupt_file_loads_as_empty_collection() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dossiers.json"), "{ pas du json").unwrap();

    let mut service = open_service(temp_dir.path());
    assert!(service.list_dossiers().is_empty());
    assert_eq!(service.next_number(), 1);

    add(&mut service, draft("Nouveau", "2024-05-01", DossierState::Pending));
    let reopened = open_service(temp_dir.path());
    assert_eq!(reopened.list_dossiers().len(), 1);
}

#[test]
fn test_legacy_browser_payload_loads() {
    let temp_dir = TempDir::new().unwrap();
    let legacy = r#"[
        {
            "id": 1717000000000,
            "number": 1,
            "nom": "Jean dupont",
            "dateArrivee": "2024-05-29",
            "etat": "Terminé",
            "dateFin": "2024-06-03",
            "nombreEcritures": "17",
            "piecesSaisies": ["Factures d'achat"],
            "piecesManquantes": ["Autres"],
            "autresDetail": "Bail commercial",
            "remarque": ""
        },
        {
            "id": 1717000000001,
            "number": 2,
            "nom": "Martin",
            "dateArrivee": "2024-05-30",
            "etat": "En attente",
            "piecesSaisies": [],
            "piecesManquantes": [],
            "remarque": "Appeler le client"
        }
    ]"#;
    fs::write(temp_dir.path().join("dossiers.json"), legacy).unwrap();

    let service = open_service(temp_dir.path());

    let dossiers = service.list_dossiers();
    assert_eq!(dossiers.len(), 2);
    assert_eq!(dossiers[0].id, "1717000000000");
    assert_eq!(dossiers[0].state, DossierState::Completed);
    assert_eq!(dossiers[0].entry_count, Some(17));
    assert_eq!(dossiers[0].other_detail.as_deref(), Some("Bail commercial"));
    assert_eq!(dossiers[1].remark, "Appeler le client");
    assert_eq!(service.next_number(), 3);

    let missing = io::missing_documents_report(&service);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].missing_documents, "Autres, Bail commercial");
}

#[test]
fn test_form_workflow_through_api() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());

    let created = io::create_dossier(
        &mut service,
        DossierFormRequest {
            name: "  éLODIE  ".to_string(),
            arrival_date: "2024-07-01".to_string(),
            state: "En cours".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(created.dossier.name, "Elodie");

    let err = io::create_dossier(
        &mut service,
        DossierFormRequest {
            name: "Bad".to_string(),
            arrival_date: "01/07/2024".to_string(),
            state: "En cours".to_string(),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Form(_)));

    let response = io::delete_dossier(
        &mut service,
        shared::DeleteDossierRequest {
            dossier_id: created.dossier.id.clone(),
        },
    )
    .unwrap();
    assert!(response.deleted);
    assert!(open_service(temp_dir.path()).list_dossiers().is_empty());
}

#[test]
fn test_export_writes_three_reports() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let mut service = open_service(temp_dir.path());
    add(&mut service, completed("Dupont", "2024-06-10", Some(12)));

    let response = io::export_reports(&service, out_dir.path()).unwrap();

    assert_eq!(response.files.len(), 3);
    let completed_csv = fs::read_to_string(out_dir.path().join("dossiers_termines.csv")).unwrap();
    assert!(completed_csv.contains("10/06/2024,Dupont,12"));
    assert!(out_dir.path().join("pieces_manquantes.csv").exists());
    assert!(out_dir.path().join("total_ecritures.csv").exists());
}

#[test]
fn test_initialize_backend_uses_configured_collection() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        data_directory: Some(temp_dir.path().join("gestiona")),
        collection_key: "archives".to_string(),
        ..Default::default()
    };

    let mut service = initialize_backend(&config).expect("Failed to initialize backend");
    add_via_api(&mut service);

    assert_eq!(service.storage().collection_key(), "archives");
    assert!(temp_dir.path().join("gestiona").join("archives.json").is_file());
    assert_eq!(service.storage().load_collection().unwrap().len(), 1);
}

fn add_via_api(service: &mut DossierService<JsonDossierRepository>) {
    io::create_dossier(
        service,
        DossierFormRequest {
            name: "Dupont".to_string(),
            arrival_date: "2024-08-01".to_string(),
            state: "En attente".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
}
