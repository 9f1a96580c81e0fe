//! Dossier validation rules.
//!
//! Rules are checked in a fixed order and the first failure is reported:
//!
//! 1. name
//! 2. arrival date
//! 3. state
//! 4. for a completed dossier: completion date, then entry count
//!
//! The "Autres" detail of the missing-documents checklist is deliberately not
//! checked here; the form layer owns it.

use crate::domain::models::{DossierDraft, DossierValidationError};

/// Check a candidate dossier, returning the first rule it breaks.
pub fn validate_dossier(draft: &DossierDraft) -> Result<(), DossierValidationError> {
    if draft.name.trim().is_empty() {
        return Err(DossierValidationError::MissingName);
    }
    if draft.arrival_date.is_none() {
        return Err(DossierValidationError::MissingArrivalDate);
    }
    let Some(state) = &draft.state else {
        return Err(DossierValidationError::MissingState);
    };

    if state.is_completed() {
        if draft.completion_date.is_none() {
            return Err(DossierValidationError::MissingCompletionDate);
        }
        if draft.entry_count.is_none() {
            return Err(DossierValidationError::MissingEntryCount);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DossierState;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn valid_draft() -> DossierDraft {
        DossierDraft {
            name: "Dupont".to_string(),
            arrival_date: Some(date("2024-03-01")),
            state: Some(DossierState::InProgress),
            ..Default::default()
        }
    }

    fn completed_draft() -> DossierDraft {
        DossierDraft {
            state: Some(DossierState::Completed),
            completion_date: Some(date("2024-03-20")),
            entry_count: Some(42),
            ..valid_draft()
        }
    }

    #[test]
    fn test_valid_drafts_pass() {
        assert_eq!(validate_dossier(&valid_draft()), Ok(()));
        assert_eq!(validate_dossier(&completed_draft()), Ok(()));
    }

    #[test]
    fn test_missing_name() {
        let draft = DossierDraft { name: String::new(), ..valid_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingName));

        let draft = DossierDraft { name: "   ".to_string(), ..valid_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingName));
    }

    #[test]
    fn test_missing_arrival_date() {
        let draft = DossierDraft { arrival_date: None, ..valid_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingArrivalDate));
    }

    #[test]
    fn test_missing_state() {
        let draft = DossierDraft { state: None, ..valid_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingState));
    }

    #[test]
    fn test_completed_requires_completion_date() {
        let draft = DossierDraft { completion_date: None, ..completed_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingCompletionDate));
    }

    #[test]
    fn test_completed_requires_entry_count() {
        let draft = DossierDraft { entry_count: None, ..completed_draft() };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingEntryCount));
    }

    #[test]
    fn test_completion_date_checked_before_entry_count() {
        let draft = DossierDraft {
            completion_date: None,
            entry_count: None,
            ..completed_draft()
        };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingCompletionDate));
    }

    #[test]
    fn test_name_checked_before_arrival_date() {
        let draft = DossierDraft {
            name: String::new(),
            arrival_date: None,
            ..valid_draft()
        };
        assert_eq!(validate_dossier(&draft), Err(DossierValidationError::MissingName));
    }

    #[test]
    fn test_zero_entry_count_is_present() {
        let draft = DossierDraft { entry_count: Some(0), ..completed_draft() };
        assert_eq!(validate_dossier(&draft), Ok(()));
    }

    #[test]
    fn test_non_completed_states_ignore_completion_fields() {
        let draft = DossierDraft {
            state: Some(DossierState::Other("Archivé".to_string())),
            ..valid_draft()
        };
        assert_eq!(validate_dossier(&draft), Ok(()));
    }
}
