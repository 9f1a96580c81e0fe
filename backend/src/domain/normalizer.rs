//! Name and label normalization.
//!
//! Names are stored in a single canonical display form so that grouping by
//! name and substring search behave the same no matter how the name was typed:
//! accents removed, lowercase, first letter capitalized ("ÉLÉONORE" -> "Eleonore").

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::models::Dossier;

/// Remove diacritics by decomposing (NFD) and dropping combining marks.
pub fn strip_diacritics(raw: &str) -> String {
    raw.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical display form of a dossier name.
///
/// The first character is capitalized only when its uppercase form is a
/// single character ("ß" stays "ß" rather than becoming "SS").
pub fn normalize_name(raw: &str) -> String {
    let lowered = strip_diacritics(raw).to_lowercase();
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let capital = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    std::iter::once(capital).chain(chars).collect()
}

/// Text of the "pièces manquantes" column: the missing tags followed by the
/// "Autres" detail, comma separated, without diacritics.
pub fn missing_documents_label(dossier: &Dossier) -> String {
    let mut pieces: Vec<&str> = dossier.missing_documents.iter().map(String::as_str).collect();
    if let Some(detail) = dossier.other_detail.as_deref().filter(|d| !d.is_empty()) {
        pieces.push(detail);
    }
    strip_diacritics(&pieces.join(", "))
}
