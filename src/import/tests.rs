use crate::import::{normalize_status, parse_sheet_date, row_to_new, RowInput};
use crate::types::Status;
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/* ------------ status normalization ------------ */

#[test]
fn test_normalize_status_is_case_insensitive() {
    assert_eq!(normalize_status("EN ATTENTE"), Some(Status::Pending));
    assert_eq!(normalize_status("Pending"), Some(Status::Pending));
    assert_eq!(normalize_status("pending"), Some(Status::Pending));
}

#[test]
fn test_normalize_status_folds_separators_and_accents() {
    assert_eq!(normalize_status("en_attente"), Some(Status::Pending));
    assert_eq!(normalize_status("  en-attente "), Some(Status::Pending));
    assert_eq!(normalize_status("REFUSÉ"), Some(Status::Rejected));
    assert_eq!(normalize_status("refusée"), Some(Status::Rejected));
    assert_eq!(normalize_status("Entretien"), Some(Status::Interview));
}

#[test]
fn test_normalize_status_accepts_canonical_labels() {
    assert_eq!(normalize_status("Interview"), Some(Status::Interview));
    assert_eq!(normalize_status("Rejected"), Some(Status::Rejected));
}

#[test]
fn test_normalize_status_unrecognized_is_none() {
    assert_eq!(normalize_status("???"), None);
    assert_eq!(normalize_status("maybe later"), None);
    assert_eq!(normalize_status(""), None);
    assert_eq!(normalize_status("   "), None);
}

/* ------------ date parsing ------------ */

#[test]
fn test_parse_sheet_date_iso_and_french_round_trip() {
    // Same calendar date regardless of format.
    assert_eq!(parse_sheet_date("2025-11-15"), Some(d("2025-11-15")));
    assert_eq!(parse_sheet_date("15/11/2025"), Some(d("2025-11-15")));
    assert_eq!(parse_sheet_date("15-11-2025"), Some(d("2025-11-15")));
    assert_eq!(parse_sheet_date("15.11.2025"), Some(d("2025-11-15")));
}

#[test]
fn test_parse_sheet_date_rfc3339_timestamp() {
    assert_eq!(
        parse_sheet_date("2025-11-15T09:30:00Z"),
        Some(d("2025-11-15"))
    );
}

#[test]
fn test_parse_sheet_date_excel_serial_epoch() {
    // 45000 days after 1899-12-30.
    assert_eq!(parse_sheet_date("45000"), Some(d("2023-03-15")));
    // Fractional serials carry a time component; the day part wins.
    assert_eq!(parse_sheet_date("45000.75"), Some(d("2023-03-15")));
}

#[test]
fn test_parse_sheet_date_serial_plausibility_gate() {
    // Serial 60 lands in 1900 — outside the accepted (1900, 2100) range.
    assert_eq!(parse_sheet_date("60"), None);
    // Far future is rejected too.
    assert_eq!(parse_sheet_date("80000"), None);
    assert_eq!(parse_sheet_date("-5"), None);
}

#[test]
fn test_parse_sheet_date_garbage_is_none() {
    assert_eq!(parse_sheet_date("soon"), None);
    assert_eq!(parse_sheet_date(""), None);
    assert_eq!(parse_sheet_date("32/13/2025"), None);
}

/* ------------ rows ------------ */

#[test]
fn test_row_to_new_passes_clean_cells_through() {
    let row = RowInput {
        company: Some("Acme".into()),
        title: Some("Rust Engineer".into()),
        applied_on: Some("15/11/2025".into()),
        status: Some("entretien".into()),
        ..Default::default()
    };
    let (new, warnings) = row_to_new(0, &row, d("2026-01-01"));
    assert!(warnings.is_empty());
    assert_eq!(new.applied_on, d("2025-11-15"));
    assert_eq!(new.status, Status::Interview);
}

#[test]
fn test_row_to_new_substitutes_unknown_status_with_warning() {
    let row = RowInput {
        company: Some("Acme".into()),
        status: Some("???".into()),
        ..Default::default()
    };
    let (new, warnings) = row_to_new(3, &row, d("2026-01-01"));
    assert_eq!(new.status, Status::Pending);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].row, 3);
    assert_eq!(warnings[0].field, "status");
    assert_eq!(warnings[0].substituted, "Pending");
}

#[test]
fn test_row_to_new_substitutes_bad_date_with_today() {
    let today = d("2026-01-01");
    let row = RowInput {
        company: Some("Acme".into()),
        applied_on: Some("whenever".into()),
        ..Default::default()
    };
    let (new, warnings) = row_to_new(1, &row, today);
    assert_eq!(new.applied_on, today);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "applied_on");
}

#[test]
fn test_row_to_new_missing_cells_default_without_warning() {
    let row = RowInput {
        company: Some("Acme".into()),
        ..Default::default()
    };
    let (new, warnings) = row_to_new(0, &row, d("2026-01-01"));
    assert!(warnings.is_empty());
    assert_eq!(new.status, Status::Pending);
    assert_eq!(new.applied_on, d("2026-01-01"));
}
