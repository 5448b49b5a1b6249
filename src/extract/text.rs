//! Free-text extraction: a pasted email body in, a best-effort draft out.

use crate::patterns;
use crate::types::{ApplicationDraft, Status};
use regex::Regex;

/// Parse an arbitrary block of text into a draft. Total: any input,
/// including the empty string, yields a draft (possibly all-empty).
pub fn from_text(text: &str) -> ApplicationDraft {
    ApplicationDraft {
        company: first_capture(&patterns::COMPANY, text),
        title: first_capture(&patterns::TITLE, text),
        contact: first_capture(&patterns::CONTACT, text),
        email: patterns::EMAIL.find(text).map(|m| m.as_str().to_string()),
        link: patterns::LINK
            .find(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ')']).to_string()),
        status: detect_status(text),
    }
}

/// Keyword-based status detection. Rejection keywords are checked first;
/// see the ordering note on [`patterns::REJECTION_KEYWORDS`].
pub fn detect_status(text: &str) -> Status {
    let lower = text.to_lowercase();
    if patterns::REJECTION_KEYWORDS
        .iter()
        .any(|k| lower.contains(k))
    {
        return Status::Rejected;
    }
    if patterns::INTERVIEW_KEYWORDS
        .iter()
        .any(|k| lower.contains(k))
    {
        return Status::Interview;
    }
    Status::Pending
}

/// Walk an ordered pattern list and return the first non-empty capture.
fn first_capture(list: &[Regex], text: &str) -> Option<String> {
    for re in list {
        if let Some(cap) = re.captures(text) {
            if let Some(m) = cap.get(1) {
                let cleaned = m
                    .as_str()
                    .trim()
                    .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '.'))
                    .trim();
                if !cleaned.is_empty() {
                    return Some(cleaned.to_string());
                }
            }
        }
    }
    None
}
