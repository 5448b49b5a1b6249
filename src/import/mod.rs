//! Spreadsheet import pipeline: status normalization, date parsing, rows.
//!
//! Bad cells never fail a row here — they degrade to a safe default and the
//! substitution is reported as a warning for the caller to surface.

#[cfg(test)]
mod tests;

use crate::types::{NewApplication, Status};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Folded synonym table; keys are lowercase, accent-stripped, separator-free.
/// Multilingual on purpose: the sheets this imports from mix French and
/// English freely.
const STATUS_SYNONYMS: &[(&str, Status)] = &[
    ("pending", Status::Pending),
    ("waiting", Status::Pending),
    ("en attente", Status::Pending),
    ("attente", Status::Pending),
    ("en cours", Status::Pending),
    ("envoyee", Status::Pending),
    ("envoye", Status::Pending),
    ("postule", Status::Pending),
    ("postulee", Status::Pending),
    ("applied", Status::Pending),
    ("sent", Status::Pending),
    ("interview", Status::Interview),
    ("entretien", Status::Interview),
    ("entrevue", Status::Interview),
    ("entretien prevu", Status::Interview),
    ("rdv", Status::Interview),
    ("rejected", Status::Rejected),
    ("refuse", Status::Rejected),
    ("refusee", Status::Rejected),
    ("refus", Status::Rejected),
    ("rejete", Status::Rejected),
    ("rejetee", Status::Rejected),
    ("declined", Status::Rejected),
    ("sans suite", Status::Rejected),
    ("ko", Status::Rejected),
];

/// Map an arbitrary spreadsheet cell to a canonical status.
/// Synonym lookup is case- and accent-insensitive; failing that, the exact
/// canonical labels are accepted. `None` means unrecognized — the caller
/// substitutes Pending and flags the row, never throws.
pub fn normalize_status(raw: &str) -> Option<Status> {
    let folded = fold(raw);
    if folded.is_empty() {
        return None;
    }
    if let Some((_, status)) = STATUS_SYNONYMS.iter().find(|(k, _)| *k == folded) {
        return Some(*status);
    }
    raw.trim().parse().ok()
}

/// Lowercase, strip the accents the synonym table cares about, and collapse
/// `_`/`-`/whitespace runs into single spaces.
fn fold(s: &str) -> String {
    let mapped: String = s
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '_' | '-' => ' ',
            c => c,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accepted text formats, tried in order. Numeric serials are handled first,
/// RFC 3339 timestamps last.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parse a spreadsheet date cell: an Excel serial number, ISO, `DD/MM/YYYY`,
/// or a short list of free-form fallbacks. `None` means unparseable — the
/// caller substitutes today and flags the row.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(serial) = raw.parse::<f64>() {
        return serial_to_date(serial);
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// Classic spreadsheet serial: days since 1899-12-30 (the epoch that bakes in
/// the 1900 leap-year bug). Results outside (1900, 2100) are implausible and
/// rejected.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::days(serial.trunc() as i64))?;
    let year = date.year();
    if year <= 1900 || year >= 2100 {
        return None;
    }
    Some(date)
}

/// One imported row. Aliases cover the column headers seen in the wild
/// (French sheets, LinkedIn exports).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowInput {
    #[serde(alias = "entreprise")]
    pub company: Option<String>,
    #[serde(alias = "poste")]
    pub title: Option<String>,
    #[serde(alias = "date", alias = "date_candidature")]
    pub applied_on: Option<String>,
    #[serde(alias = "statut")]
    pub status: Option<String>,
    #[serde(alias = "contrat", alias = "type_contrat")]
    pub contract: Option<String>,
    pub contact: Option<String>,
    #[serde(alias = "mail")]
    pub email: Option<String>,
    #[serde(alias = "lien")]
    pub link: Option<String>,
    #[serde(alias = "commentaires")]
    pub notes: Option<String>,
}

/// A cell that had to be substituted during import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowWarning {
    pub row: usize,
    pub field: String,
    pub raw: String,
    pub substituted: String,
}

/// A row that could not be imported at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: Vec<String>,
    pub warnings: Vec<RowWarning>,
    pub failures: Vec<RowFailure>,
}

/// Convert a row into creation input, degrading bad status/date cells to
/// defaults and recording the substitutions. Missing cells default silently;
/// only present-but-unusable values warn.
pub fn row_to_new(index: usize, row: &RowInput, today: NaiveDate) -> (NewApplication, Vec<RowWarning>) {
    let mut warnings = Vec::new();

    let status = match row.status.as_deref().map(str::trim) {
        None | Some("") => Status::Pending,
        Some(raw) => match normalize_status(raw) {
            Some(s) => s,
            None => {
                warnings.push(RowWarning {
                    row: index,
                    field: "status".into(),
                    raw: raw.to_string(),
                    substituted: Status::Pending.to_string(),
                });
                Status::Pending
            }
        },
    };

    let applied_on = match row.applied_on.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(raw) => match parse_sheet_date(raw) {
            Some(d) => d,
            None => {
                warnings.push(RowWarning {
                    row: index,
                    field: "applied_on".into(),
                    raw: raw.to_string(),
                    substituted: today.to_string(),
                });
                today
            }
        },
    };

    let new = NewApplication {
        company: row.company.clone().unwrap_or_default(),
        title: row.title.clone().unwrap_or_default(),
        applied_on,
        status,
        contract: row.contract.clone(),
        contact: row.contact.clone(),
        email: row.email.clone(),
        link: row.link.clone(),
        notes: row.notes.clone(),
    };
    (new, warnings)
}
