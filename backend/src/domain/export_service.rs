//! Export service for the dossier reports.
//!
//! Produces the three "état" reports as CSV: completed dossiers, dossiers
//! with missing documents, and écritures totals per name. Dates use the
//! French day/month/year format the reports were always printed with.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::Writer;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::Dossier;
use crate::domain::normalizer::missing_documents_label;
use crate::domain::query::{EntryTotals, QueryService};

pub const COMPLETED_REPORT_FILE: &str = "dossiers_termines.csv";
pub const MISSING_DOCUMENTS_REPORT_FILE: &str = "pieces_manquantes.csv";
pub const ENTRY_TOTALS_REPORT_FILE: &str = "total_ecritures.csv";

/// Format a date the way the reports display it (`DD/MM/YYYY`)
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ExportService {
    query_service: QueryService,
}

impl ExportService {
    pub fn new() -> Self {
        Self {
            query_service: QueryService::new(),
        }
    }

    /// "Dossiers traités": date, name and écritures of completed dossiers
    pub fn completed_csv(&self, dossiers: &[Dossier]) -> Result<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["Date", "Nom", "Écritures"])?;

        for dossier in self.query_service.completed(dossiers) {
            let entry_count = dossier.entry_count.map(|n| n.to_string()).unwrap_or_default();
            writer.write_record([
                format_report_date(dossier.arrival_date),
                dossier.name,
                entry_count,
            ])?;
        }

        finish(writer)
    }

    /// "Pièces manquantes": date, name and the missing documents
    pub fn missing_documents_csv(&self, dossiers: &[Dossier]) -> Result<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["Date", "Nom", "Pièces manquantes"])?;

        for dossier in self.query_service.with_missing_documents(dossiers) {
            let label = missing_documents_label(&dossier);
            writer.write_record([format_report_date(dossier.arrival_date), dossier.name, label])?;
        }

        finish(writer)
    }

    /// "Total écritures": one row per name plus the grand total
    pub fn entry_totals_csv(&self, totals: &EntryTotals) -> Result<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["Nom", "Total écritures"])?;

        for group in &totals.groups {
            writer.write_record([group.name.clone(), group.total.to_string()])?;
        }
        writer.write_record(["Total général".to_string(), totals.grand_total.to_string()])?;

        finish(writer)
    }

    /// Write all three reports into `directory`, returning the written paths
    pub fn export_reports_to_dir(&self, directory: &Path, dossiers: &[Dossier]) -> Result<Vec<PathBuf>> {
        info!("📄 EXPORT: Writing reports for {} dossiers to {}", dossiers.len(), directory.display());

        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create export directory {}", directory.display()))?;

        let totals = self.query_service.entry_totals(dossiers);
        let reports = [
            (COMPLETED_REPORT_FILE, self.completed_csv(dossiers)?),
            (MISSING_DOCUMENTS_REPORT_FILE, self.missing_documents_csv(dossiers)?),
            (ENTRY_TOTALS_REPORT_FILE, self.entry_totals_csv(&totals)?),
        ];

        let mut written = Vec::with_capacity(reports.len());
        for (file_name, content) in reports {
            let path = directory.join(file_name);
            fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }

        info!("✅ EXPORT: Wrote {} report files", written.len());
        Ok(written)
    }
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
