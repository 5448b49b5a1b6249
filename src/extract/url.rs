//! URL-shape extraction for known job boards.
//!
//! Each site embeds company and/or title in its URL layout; slugs are turned
//! into labels by swapping separators for spaces and title-casing the words.
//! No network here — page enrichment lives in [`super::page`].

use crate::error::{Result, TrackerError};
use crate::types::ApplicationDraft;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSite {
    LinkedIn,
    Indeed,
    WelcomeToTheJungle,
}

impl JobSite {
    pub fn detect(url: &Url) -> Option<Self> {
        let host = canonical_host(url)?;
        if host == "linkedin.com" || host.ends_with(".linkedin.com") {
            Some(JobSite::LinkedIn)
        } else if host.contains("indeed.") {
            Some(JobSite::Indeed)
        } else if host.contains("welcometothejungle") {
            Some(JobSite::WelcomeToTheJungle)
        } else {
            None
        }
    }
}

/// Canonicalize host to a stable key: lowercase + IDNA/Punycode, `www.` stripped.
fn canonical_host(url: &Url) -> Option<String> {
    let raw = url.domain()?.to_ascii_lowercase();
    let host = idna::domain_to_ascii(&raw).unwrap_or(raw);
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Parse a raw URL string; a malformed URL is the only synchronous failure
/// of the URL import path.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|_| TrackerError::InvalidUrl(raw.to_string()))
}

/// Derive a draft from the URL alone. Always sets `link`; company/title only
/// when the site layout is recognized.
pub fn from_url_shape(url: &Url) -> ApplicationDraft {
    let mut draft = match JobSite::detect(url) {
        Some(JobSite::LinkedIn) => linkedin_draft(url),
        Some(JobSite::Indeed) => indeed_draft(url),
        Some(JobSite::WelcomeToTheJungle) => wttj_draft(url),
        None => ApplicationDraft::default(),
    };
    draft.link = Some(url.to_string());
    draft
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default()
}

/// `/company/<slug>` and `/jobs/view/<title-slug>[-<numeric id>]`.
/// View slugs sometimes carry the employer as an `-at-` infix.
fn linkedin_draft(url: &Url) -> ApplicationDraft {
    let segs = path_segments(url);
    let mut draft = ApplicationDraft::default();
    if let Some(i) = segs.iter().position(|s| *s == "company") {
        if let Some(slug) = segs.get(i + 1) {
            draft.company = non_empty(slug_to_label(slug));
        }
    }
    if let Some(i) = segs.iter().position(|s| *s == "view") {
        if let Some(slug) = segs.get(i + 1) {
            let slug = strip_trailing_id(slug);
            match slug.split_once("-at-") {
                Some((title, company)) => {
                    draft.title = non_empty(slug_to_label(title));
                    if draft.company.is_none() {
                        draft.company = non_empty(slug_to_label(company));
                    }
                }
                None => draft.title = non_empty(slug_to_label(slug)),
            }
        }
    }
    draft
}

/// Indeed puts everything in query parameters.
fn indeed_draft(url: &Url) -> ApplicationDraft {
    let mut draft = ApplicationDraft::default();
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "title" => draft.title = non_empty(v.trim().to_string()),
            "company" => draft.company = non_empty(v.trim().to_string()),
            _ => {}
        }
    }
    draft
}

/// `/companies/<slug>` and `/companies/<slug>/jobs/<title-slug>`.
fn wttj_draft(url: &Url) -> ApplicationDraft {
    let segs = path_segments(url);
    let mut draft = ApplicationDraft::default();
    if let Some(i) = segs.iter().position(|s| *s == "companies") {
        if let Some(slug) = segs.get(i + 1) {
            draft.company = non_empty(slug_to_label(slug));
        }
        if segs.get(i + 2) == Some(&"jobs") {
            if let Some(slug) = segs.get(i + 3) {
                draft.title = non_empty(slug_to_label(slug));
            }
        }
    }
    draft
}

/// "senior-rust-engineer" -> "Senior Rust Engineer".
fn slug_to_label(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Drop a trailing all-digit segment (the posting id) from a slug.
fn strip_trailing_id(slug: &str) -> &str {
    match slug.rsplit_once('-') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => slug,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
