//! Derived views over the dossier collection.
//!
//! Everything here reads a borrowed slice and returns new values; the
//! collection itself is never modified. Results keep the collection's
//! insertion order.

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::domain::models::Dossier;

/// Filters of the search form. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    /// Inclusive lower bound on the arrival date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the arrival date
    pub end_date: Option<NaiveDate>,
}

impl SearchCriteria {
    fn matches(&self, dossier: &Dossier, needle: Option<&str>) -> bool {
        let matches_name = needle.map_or(true, |n| dossier.name.to_lowercase().contains(n));
        let after_start = self.start_date.map_or(true, |start| dossier.arrival_date >= start);
        let before_end = self.end_date.map_or(true, |end| dossier.arrival_date <= end);
        matches_name && after_start && before_end
    }
}

/// Écritures summed over all dossiers sharing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTotalGroup {
    pub name: String,
    pub total: u64,
    /// Dossiers of the group that carry an entry count
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryTotals {
    /// One group per distinct name, in order of first appearance
    pub groups: Vec<EntryTotalGroup>,
    pub grand_total: u64,
}

impl EntryTotals {
    pub fn group(&self, name: &str) -> Option<&EntryTotalGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Read-only queries over a dossier collection
#[derive(Debug, Clone, Default)]
pub struct QueryService;

impl QueryService {
    pub fn new() -> Self {
        Self
    }

    /// Dossiers whose name contains `criteria.name` (ignoring case) and whose
    /// arrival date falls within the optional bounds.
    pub fn search(&self, dossiers: &[Dossier], criteria: &SearchCriteria) -> Vec<Dossier> {
        let needle = criteria
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);

        let results: Vec<Dossier> = dossiers
            .iter()
            .filter(|d| criteria.matches(d, needle.as_deref()))
            .cloned()
            .collect();

        debug!("Search {:?} matched {} of {} dossiers", criteria, results.len(), dossiers.len());
        results
    }

    /// Dossiers in the completed state
    pub fn completed(&self, dossiers: &[Dossier]) -> Vec<Dossier> {
        dossiers.iter().filter(|d| d.is_completed()).cloned().collect()
    }

    /// Dossiers with at least one missing document
    pub fn with_missing_documents(&self, dossiers: &[Dossier]) -> Vec<Dossier> {
        dossiers
            .iter()
            .filter(|d| d.has_missing_documents())
            .cloned()
            .collect()
    }

    /// Group dossiers by name and sum their écritures.
    ///
    /// A dossier without an entry count still opens its group but adds
    /// nothing to its total or count.
    pub fn entry_totals(&self, dossiers: &[Dossier]) -> EntryTotals {
        let mut groups: Vec<EntryTotalGroup> = Vec::new();
        let mut index_by_name: HashMap<&str, usize> = HashMap::new();

        for dossier in dossiers {
            let index = *index_by_name.entry(dossier.name.as_str()).or_insert_with(|| {
                groups.push(EntryTotalGroup {
                    name: dossier.name.clone(),
                    total: 0,
                    count: 0,
                });
                groups.len() - 1
            });

            if let Some(entry_count) = dossier.entry_count {
                let group = &mut groups[index];
                group.total += u64::from(entry_count);
                group.count += 1;
            }
        }

        let grand_total = groups.iter().map(|g| g.total).sum();
        EntryTotals { groups, grand_total }
    }
}
