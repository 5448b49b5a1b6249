use crate::extract;
use crate::import::{self, ImportReport, RowFailure, RowInput};
use crate::patterns;
use crate::schedule;
use crate::services::fetch::{PageFetcher, ProxyFetcher};
use crate::services::log::ActivityLogger;
use crate::services::store::RecordStore;
use crate::{error::*, types::*};
use chrono::Utc;
use std::time::Instant;

// Logger failures are swallowed so they never break the operation itself.
fn log_info(owner: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.info(owner, event, details);
    }
}

fn log_error(owner: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.error(owner, event, details);
    }
}

/* ------------ public facade components ------------ */

pub struct Components {
    pub fetcher: Box<dyn PageFetcher>,
}
impl Default for Components {
    fn default() -> Self {
        Self {
            fetcher: Box::new(ProxyFetcher::new()),
        }
    }
}

/* ------------ quick import ------------ */

/// Text quick-import. Total: whatever the text, a draft comes back.
pub fn quick_import_text(text: &str) -> ApplicationDraft {
    let draft = extract::from_text(text);
    log_info(
        None,
        "import_text",
        Some(if draft.is_empty() { "empty draft" } else { "draft" }),
    );
    draft
}

/// URL quick-import. Rejects only a malformed URL; a failed page fetch
/// degrades to the URL-shape draft. The hint, when given, overrides fetched
/// values.
pub fn quick_import_url(
    fetcher: &dyn PageFetcher,
    url: &str,
    hint: Option<&str>,
    enrich: bool,
) -> Result<ApplicationDraft> {
    let start = Instant::now();
    let parsed = extract::parse_url(url)?;
    let mut draft = extract::from_url_shape(&parsed);

    if enrich {
        match fetcher.fetch_blocking(url) {
            Ok(html) => draft.override_with(extract::from_page_html(&html)),
            Err(e) => log_error(None, "import_url_fetch", Some(&e.to_string())),
        }
    }
    if let Some(h) = hint {
        extract::apply_title_hint(&mut draft, h);
    }

    let details = format!("succeeded in {}ms", start.elapsed().as_millis());
    log_info(None, "import_url", Some(&details));
    Ok(draft)
}

/// Async twin of [`quick_import_url`].
pub async fn quick_import_url_async(
    fetcher: &dyn PageFetcher,
    url: &str,
    hint: Option<&str>,
    enrich: bool,
) -> Result<ApplicationDraft> {
    let start = Instant::now();
    let parsed = extract::parse_url(url)?;
    let mut draft = extract::from_url_shape(&parsed);

    if enrich {
        match fetcher.fetch_async(url).await {
            Ok(html) => draft.override_with(extract::from_page_html(&html)),
            Err(e) => log_error(None, "import_url_fetch", Some(&e.to_string())),
        }
    }
    if let Some(h) = hint {
        extract::apply_title_hint(&mut draft, h);
    }

    let details = format!("succeeded in {}ms", start.elapsed().as_millis());
    log_info(None, "import_url_async", Some(&details));
    Ok(draft)
}

/* ------------ record lifecycle ------------ */

/// Create a record: validate, derive the follow-up date, seed the history.
pub fn record_create<S: RecordStore>(
    store: &S,
    owner: &str,
    new: NewApplication,
) -> Result<ApplicationRecord> {
    let start = Instant::now();
    if let Some(email) = &new.email {
        if !patterns::EMAIL_EXACT.is_match(email) {
            return Err(TrackerError::InvalidEmail(email.clone()));
        }
    }
    let today = Utc::now().date_naive();
    if new.applied_on > today {
        return Err(TrackerError::FutureDate(new.applied_on));
    }

    let now = Utc::now();
    let record = ApplicationRecord {
        id: String::new(),
        owner: owner.to_string(),
        company: new.company,
        title: new.title,
        applied_on: new.applied_on,
        status: new.status,
        contract: new.contract,
        contact: new.contact,
        email: new.email,
        link: new.link,
        notes: new.notes,
        next_follow_up: schedule::follow_up(new.applied_on, new.status),
        relances: Vec::new(),
        status_history: vec![StatusChange {
            status: new.status,
            note: None,
            at: now,
        }],
        created_at: now,
        updated_at: now,
    };

    let result = store.create(record);
    let details = format!(
        "{} in {}ms",
        if result.is_ok() { "succeeded" } else { "failed" },
        start.elapsed().as_millis()
    );
    match &result {
        Ok(_) => log_info(Some(owner), "record_create", Some(&details)),
        Err(_) => log_error(Some(owner), "record_create", Some(&details)),
    }
    result
}

pub fn record_read<S: RecordStore>(
    store: &S,
    owner: &str,
    id: &str,
) -> Result<ApplicationRecord> {
    store
        .get(owner, id)?
        .ok_or_else(|| TrackerError::NotFound(id.to_string()))
}

/// Records for one owner, most recent application first.
pub fn record_list<S: RecordStore>(
    store: &S,
    owner: &str,
    status: Option<Status>,
) -> Result<Vec<ApplicationRecord>> {
    let mut records = store.list(owner)?;
    if let Some(wanted) = status {
        records.retain(|r| r.status == wanted);
    }
    records.sort_by(|a, b| b.applied_on.cmp(&a.applied_on).then(a.id.cmp(&b.id)));
    Ok(records)
}

/// Append a status change and recompute the follow-up date.
pub fn record_set_status<S: RecordStore>(
    store: &S,
    owner: &str,
    id: &str,
    status: Status,
    note: Option<String>,
) -> Result<ApplicationRecord> {
    let mut record = record_read(store, owner, id)?;
    record.status_history.push(StatusChange {
        status,
        note,
        at: Utc::now(),
    });
    record.status = status;
    record.next_follow_up = schedule::follow_up(record.applied_on, status);
    let updated = store.update(&record)?;
    log_info(Some(owner), "record_set_status", Some(status.label()));
    Ok(updated)
}

/// Edit the application date and/or notes. A date edit revalidates and
/// recomputes the follow-up.
pub fn record_edit<S: RecordStore>(
    store: &S,
    owner: &str,
    id: &str,
    applied_on: Option<chrono::NaiveDate>,
    notes: Option<String>,
) -> Result<ApplicationRecord> {
    let mut record = record_read(store, owner, id)?;
    if let Some(date) = applied_on {
        let today = Utc::now().date_naive();
        if date > today {
            return Err(TrackerError::FutureDate(date));
        }
        record.applied_on = date;
        record.next_follow_up = schedule::follow_up(date, record.status);
    }
    if let Some(notes) = notes {
        record.notes = Some(notes);
    }
    let updated = store.update(&record)?;
    log_info(Some(owner), "record_edit", None);
    Ok(updated)
}

/// Log a relance against a record. History only; the follow-up date stays
/// derived from the application date.
pub fn record_add_relance<S: RecordStore>(
    store: &S,
    owner: &str,
    id: &str,
    relance: Relance,
) -> Result<ApplicationRecord> {
    let mut record = record_read(store, owner, id)?;
    record.relances.push(relance);
    let updated = store.update(&record)?;
    log_info(Some(owner), "record_add_relance", None);
    Ok(updated)
}

pub fn record_delete<S: RecordStore>(store: &S, owner: &str, id: &str) -> Result<()> {
    // Missing records are a delete error here, unlike the store primitive.
    record_read(store, owner, id)?;
    let result = store.delete(owner, id);
    match &result {
        Ok(_) => log_info(Some(owner), "record_delete", Some(id)),
        Err(_) => log_error(Some(owner), "record_delete", Some(id)),
    }
    result
}

/// Delete everything an owner has: one store call per record, failures
/// counted, nothing rolled back.
pub fn record_delete_all<S: RecordStore>(store: &S, owner: &str) -> Result<BulkOutcome> {
    let records = store.list(owner)?;
    let mut outcome = BulkOutcome {
        attempted: records.len(),
        deleted: 0,
        failed: 0,
    };
    for record in &records {
        match store.delete(owner, &record.id) {
            Ok(_) => outcome.deleted += 1,
            Err(_) => outcome.failed += 1,
        }
    }
    let details = format!("{}/{} deleted", outcome.deleted, outcome.attempted);
    log_info(Some(owner), "record_delete_all", Some(&details));
    Ok(outcome)
}

/* ------------ bulk import ------------ */

/// Import spreadsheet rows: a sequential per-row loop. Bad cells degrade to
/// defaults with warnings; rows that cannot be created at all are counted as
/// failures and the batch carries on.
pub fn import_rows<S: RecordStore>(store: &S, owner: &str, rows: Vec<RowInput>) -> ImportReport {
    let start = Instant::now();
    let today = Utc::now().date_naive();
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        if blank(&row.company) && blank(&row.title) {
            report.failures.push(RowFailure {
                row: index,
                reason: "row has neither company nor title".into(),
            });
            continue;
        }
        let (new, mut warnings) = import::row_to_new(index, row, today);
        report.warnings.append(&mut warnings);
        match record_create(store, owner, new) {
            Ok(record) => report.created.push(record.id),
            Err(e) => report.failures.push(RowFailure {
                row: index,
                reason: e.to_string(),
            }),
        }
    }

    let details = format!(
        "{} created, {} warnings, {} failures in {}ms",
        report.created.len(),
        report.warnings.len(),
        report.failures.len(),
        start.elapsed().as_millis()
    );
    log_info(Some(owner), "import_rows", Some(&details));
    report
}

/* ------------ agenda ------------ */

/// Records whose follow-up falls due within the horizon (overdue included),
/// soonest first.
pub fn agenda<S: RecordStore>(
    store: &S,
    owner: &str,
    within_days: i64,
) -> Result<Vec<ApplicationRecord>> {
    let today = Utc::now().date_naive();
    let mut due: Vec<ApplicationRecord> = store
        .list(owner)?
        .into_iter()
        .filter(|r| {
            r.next_follow_up
                .map_or(false, |d| schedule::due_within(d, today, within_days))
        })
        .collect();
    due.sort_by_key(|r| r.next_follow_up);
    Ok(due)
}
