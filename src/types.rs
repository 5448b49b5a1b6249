use crate::error::TrackerError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical application status — the only statuses the rest of the system
/// reasons about. Import paths normalize foreign spellings into this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Pending,
    Interview,
    Rejected,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Interview => "Interview",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact canonical labels only; use `import::normalize_status` for anything
/// coming from a spreadsheet or a user.
impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Status::Pending),
            "Interview" => Ok(Status::Interview),
            "Rejected" => Ok(Status::Rejected),
            other => Err(TrackerError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelanceChannel {
    Email,
    Call,
    LinkedIn,
    Other,
}

impl fmt::Display for RelanceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelanceChannel::Email => "email",
            RelanceChannel::Call => "call",
            RelanceChannel::LinkedIn => "linkedin",
            RelanceChannel::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for RelanceChannel {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" | "mail" => Ok(RelanceChannel::Email),
            "call" | "phone" | "tel" => Ok(RelanceChannel::Call),
            "linkedin" => Ok(RelanceChannel::LinkedIn),
            "other" => Ok(RelanceChannel::Other),
            other => Err(TrackerError::UnknownChannel(other.to_string())),
        }
    }
}

/// A follow-up contact event logged against a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relance {
    pub on: NaiveDate,
    pub channel: RelanceChannel,
    pub note: Option<String>,
}

/// One entry of a record's status history. Appended, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: Status,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// Best-effort partial record produced by the extractors. Every field may be
/// empty; an all-empty draft is a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub company: Option<String>,
    pub title: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl ApplicationDraft {
    /// Fill fields this draft is missing from `other` (first source wins).
    pub fn fill_missing_from(&mut self, other: ApplicationDraft) {
        if self.company.is_none() {
            self.company = other.company;
        }
        if self.title.is_none() {
            self.title = other.title;
        }
        if self.contact.is_none() {
            self.contact = other.contact;
        }
        if self.email.is_none() {
            self.email = other.email;
        }
        if self.link.is_none() {
            self.link = other.link;
        }
    }

    /// Take every field `other` has; keep ours only where `other` is silent.
    pub fn override_with(&mut self, other: ApplicationDraft) {
        if other.company.is_some() {
            self.company = other.company;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.contact.is_some() {
            self.contact = other.contact;
        }
        if other.email.is_some() {
            self.email = other.email;
        }
        if other.link.is_some() {
            self.link = other.link;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.title.is_none()
            && self.contact.is_none()
            && self.email.is_none()
            && self.link.is_none()
    }

    /// Promote the draft to creation input, dating it `applied_on`.
    pub fn into_new(self, applied_on: NaiveDate) -> NewApplication {
        NewApplication {
            company: self.company.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            applied_on,
            status: self.status,
            contract: None,
            contact: self.contact,
            email: self.email,
            link: self.link,
            notes: None,
        }
    }
}

/// Input for creating a record. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub title: String,
    pub applied_on: NaiveDate,
    pub status: Status,
    pub contract: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

/// A tracked job application ("candidature"), owned by a single user key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub owner: String,
    pub company: String,
    pub title: String,
    pub applied_on: NaiveDate,
    pub status: Status,
    pub contract: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
    /// Derived: applied_on + 7 days, absent once rejected.
    pub next_follow_up: Option<NaiveDate>,
    #[serde(default)]
    pub relances: Vec<Relance>,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a bulk operation run as a sequential per-item loop.
/// Partial completion is an accepted outcome; nothing is rolled back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
