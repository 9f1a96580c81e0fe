//! dossier-tracker: command-line front end for the dossier collection.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dossier_tracker::domain::DossierError;
use dossier_tracker::io::mappers::DossierMapper;
use dossier_tracker::io::{self, ApiError};
use dossier_tracker::storage::DossierStorage;
use dossier_tracker::{initialize_backend, AppConfig, DossierService};
use serde::Serialize;
use shared::{
    DeleteDossierRequest, Dossier, DossierFormRequest, SearchDossiersRequest,
    UpdateDossierRequest,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dossier-tracker")]
#[command(author, version, about = "Suivi des dossiers comptables")]
#[command(propagate_version = true)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every dossier in insertion order
    List,

    /// Show one dossier
    Show {
        /// Dossier ID (dossier::...)
        id: String,
    },

    /// Add a new dossier
    Add {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Modify a dossier; omitted fields keep their current value
    Update {
        /// Dossier ID (dossier::...)
        id: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete a dossier
    Delete {
        /// Dossier ID (dossier::...)
        id: String,
    },

    /// Search by name fragment and arrival date range
    Search {
        #[arg(short, long)]
        name: Option<String>,

        /// Earliest arrival date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest arrival date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Completed dossiers with their entry counts
    Completed,

    /// Dossiers with missing documents
    Missing,

    /// Entry count totals per name
    Totals,

    /// Write the three reports as CSV files
    Export {
        /// Output directory
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
}

#[derive(Args, Default)]
struct FormArgs {
    #[arg(short, long)]
    name: Option<String>,

    /// Arrival date (YYYY-MM-DD)
    #[arg(short, long)]
    arrival: Option<String>,

    /// "En attente", "En cours", "Terminé" or a custom label
    #[arg(short, long)]
    state: Option<String>,

    /// Completion date (YYYY-MM-DD)
    #[arg(short, long)]
    completed: Option<String>,

    /// Number of entries (écritures)
    #[arg(short, long)]
    entries: Option<String>,

    /// Entered document tag (repeatable)
    #[arg(long = "entered")]
    entered_documents: Vec<String>,

    /// Missing document tag (repeatable)
    #[arg(long = "missing")]
    missing_documents: Vec<String>,

    /// Detail for the "Autres" missing-document tag
    #[arg(long)]
    other: Option<String>,

    #[arg(short, long)]
    remark: Option<String>,
}

impl FormArgs {
    /// Overlay the given flags onto `form`
    fn apply_to(self, mut form: DossierFormRequest) -> DossierFormRequest {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(arrival) = self.arrival {
            form.arrival_date = arrival;
        }
        if let Some(state) = self.state {
            form.state = state;
        }
        if let Some(completed) = self.completed {
            form.completion_date = completed;
        }
        if let Some(entries) = self.entries {
            form.entry_count = entries;
        }
        if !self.entered_documents.is_empty() {
            form.entered_documents = self.entered_documents;
        }
        if !self.missing_documents.is_empty() {
            form.missing_documents = self.missing_documents;
        }
        if let Some(other) = self.other {
            form.other_detail = other;
        }
        if let Some(remark) = self.remark {
            form.remark = remark;
        }
        form
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Erreur: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erreur: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG takes precedence over the configured level
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    match &config.source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults"),
    }
    info!("Using data directory {}", config.data_directory().display());
    let mut service = initialize_backend(config).context("Failed to open the dossier collection")?;
    let json = cli.json;

    match cli.command {
        Commands::List => {
            let response = io::list_dossiers(&service);
            print_dossiers(&response.dossiers, json)?;
        }
        Commands::Show { id } => {
            let dossier = find_dossier(&service, &id)?;
            if json {
                print_json(&dossier)?;
            } else {
                print_dossier_details(&dossier);
            }
        }
        Commands::Add { form } => {
            let request = form.apply_to(DossierFormRequest::default());
            let response = io::create_dossier(&mut service, request)?;
            debug!("Created {}", response.dossier.id);
            println!("{} (n° {}, {})", response.success_message, response.dossier.number, response.dossier.id);
        }
        Commands::Update { id, form } => {
            let current = io::get_dossier_form(&service, &id)?;
            let request = UpdateDossierRequest {
                dossier_id: id,
                form: form.apply_to(current),
            };
            let response = io::update_dossier(&mut service, request)?;
            println!("{}", response.success_message);
        }
        Commands::Delete { id } => {
            let response = io::delete_dossier(&mut service, DeleteDossierRequest { dossier_id: id })?;
            println!("{}", response.success_message);
        }
        Commands::Search { name, from, to } => {
            let request = SearchDossiersRequest {
                name,
                start_date: from,
                end_date: to,
            };
            let response = io::search_dossiers(&service, request)?;
            print_dossiers(&response.dossiers, json)?;
        }
        Commands::Completed => {
            let rows = io::completed_report(&service);
            if json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    let entries = row.entry_count.map(|n| n.to_string()).unwrap_or_default();
                    println!("{}\t{}\t{}", row.arrival_date, row.name, entries);
                }
            }
        }
        Commands::Missing => {
            let rows = io::missing_documents_report(&service);
            if json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    println!("{}\t{}\t{}", row.arrival_date, row.name, row.missing_documents);
                }
            }
        }
        Commands::Totals => {
            let totals = io::entry_totals_report(&service);
            if json {
                print_json(&totals)?;
            } else {
                for group in &totals.groups {
                    println!("{}\t{}\t({} dossiers)", group.name, group.total, group.count);
                }
                println!("Total général\t{}", totals.grand_total);
            }
        }
        Commands::Export { directory } => {
            let response = export(&service, &directory)?;
            println!("{}", response);
        }
    }

    Ok(())
}

fn find_dossier<S: DossierStorage>(service: &DossierService<S>, id: &str) -> Result<Dossier, ApiError> {
    service
        .get_dossier(id)
        .map(DossierMapper::to_dto)
        .ok_or_else(|| DossierError::NotFound(id.to_string()).into())
}

fn export<S: DossierStorage>(service: &DossierService<S>, directory: &Path) -> Result<String> {
    let response = io::export_reports(service, directory)?;
    let mut lines = vec![response.success_message];
    lines.extend(response.files.into_iter().map(|f| format!("  {}", f)));
    Ok(lines.join("\n"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_dossiers(dossiers: &[Dossier], json: bool) -> Result<()> {
    if json {
        return print_json(&dossiers);
    }
    if dossiers.is_empty() {
        println!("Aucun dossier");
        return Ok(());
    }
    for d in dossiers {
        println!("{:>4}  {}  {:<30}  {:<12}  {}", d.number, d.arrival_date, d.name, d.state, d.id);
    }
    Ok(())
}

fn print_dossier_details(d: &Dossier) {
    println!("N°             {}", d.number);
    println!("ID             {}", d.id);
    println!("Nom            {}", d.name);
    println!("Arrivée        {}", d.arrival_date);
    println!("État           {}", d.state);
    if let Some(date) = &d.completion_date {
        println!("Fin            {}", date);
    }
    if let Some(count) = d.entry_count {
        println!("Écritures      {}", count);
    }
    if !d.entered_documents.is_empty() {
        println!("Pièces saisies {}", d.entered_documents.join(", "));
    }
    if !d.missing_documents.is_empty() {
        println!("Manquantes     {}", d.missing_documents.join(", "));
    }
    if let Some(other) = &d.other_detail {
        println!("Autres         {}", other);
    }
    if !d.remark.is_empty() {
        println!("Remarque       {}", d.remark);
    }
}
