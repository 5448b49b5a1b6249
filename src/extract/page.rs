//! Page-metadata mining for the URL import path.
//!
//! Priority order per field: `og:title`, then the `<title>` tag (site-name
//! tokens filtered out), then `og:site_name` for the company, then JSON-LD
//! `JobPosting` blocks. The first source to produce a value wins.

use crate::types::ApplicationDraft;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name], meta[property]").expect("valid metadata selector"));

static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid jsonld selector")
});

/// Segments equal to one of these (case-insensitive) are dropped before the
/// `Title | Company` split.
const SITE_TOKENS: &[&str] = &[
    "linkedin",
    "indeed",
    "indeed.com",
    "welcome to the jungle",
    "jobs",
    "emploi",
    "recrutement",
];

pub fn from_page_html(html: &str) -> ApplicationDraft {
    let doc = Html::parse_document(html);
    let meta = metadata_pairs(&doc);
    let mut draft = ApplicationDraft::default();

    if let Some(og_title) = find_metadata_value(&meta, &["og:title"]) {
        apply_split(&mut draft, &og_title);
    }
    if draft.title.is_none() {
        if let Some(title) = doc
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| t.text().collect::<String>())
        {
            apply_split(&mut draft, &title);
        }
    }
    if draft.company.is_none() {
        draft.company = find_metadata_value(&meta, &["og:site_name"]);
    }
    let (jl_title, jl_company) = job_posting_fields(&jsonld_blocks(&doc));
    draft.fill_missing_from(ApplicationDraft {
        title: jl_title,
        company: jl_company,
        ..Default::default()
    });
    draft
}

/// A caller-supplied page title takes precedence over anything fetched.
pub fn apply_title_hint(draft: &mut ApplicationDraft, hint: &str) {
    let (title, company) = split_title_company(hint);
    if title.is_some() {
        draft.title = title;
    }
    if company.is_some() {
        draft.company = company;
    }
}

fn apply_split(draft: &mut ApplicationDraft, raw: &str) {
    let (title, company) = split_title_company(raw);
    draft.fill_missing_from(ApplicationDraft {
        title,
        company,
        ..Default::default()
    });
}

/// `"Title | Company"` split, with `"Title chez Company"` as the one-segment
/// fallback.
fn split_title_company(raw: &str) -> (Option<String>, Option<String>) {
    let segments: Vec<&str> = raw
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !is_site_token(s))
        .collect();
    match segments.as_slice() {
        [] => (None, None),
        [one] => match one.split_once(" chez ") {
            Some((title, company)) => (clean(title), clean(company)),
            None => (clean(one), None),
        },
        [title, company, ..] => (clean(title), clean(company)),
    }
}

fn is_site_token(s: &str) -> bool {
    let lower = s.to_lowercase();
    SITE_TOKENS.iter().any(|t| lower == *t)
}

fn clean(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn metadata_pairs(doc: &Html) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for m in doc.select(&META_SELECTOR) {
        let key = m.value().attr("property").or_else(|| m.value().attr("name"));
        let content = m.value().attr("content");
        if let (Some(k), Some(v)) = (key, content) {
            pairs.push((k.to_string(), v.to_string()));
        }
    }
    pairs
}

/// Find the first non-empty value for any of the given keys in metadata pairs.
fn find_metadata_value(pairs: &[(String, String)], keys: &[&str]) -> Option<String> {
    for key in keys {
        for (k, v) in pairs {
            if k.eq_ignore_ascii_case(key) {
                let cleaned = v.trim().to_string();
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
    }
    None
}

fn jsonld_blocks(doc: &Html) -> Vec<Value> {
    let mut out = Vec::new();
    for s in doc.select(&JSONLD_SELECTOR) {
        let txt = s.text().collect::<String>();
        let txt = txt.trim();
        if txt.is_empty() {
            continue;
        }
        if let Ok(v) = serde_json::from_str::<Value>(txt) {
            out.extend(flatten_jsonld(v));
        }
    }
    out
}

fn flatten_jsonld(v: Value) -> Vec<Value> {
    let mut out = Vec::new();
    match v {
        Value::Array(arr) => {
            for it in arr {
                out.extend(flatten_jsonld(it));
            }
        }
        Value::Object(mut obj) => {
            if let Some(graph) = obj.remove("@graph") {
                out.extend(flatten_jsonld(graph));
                if !obj.is_empty() {
                    out.push(Value::Object(obj));
                }
            } else {
                out.push(Value::Object(obj));
            }
        }
        other => out.push(other),
    }
    out
}

/// First `JobPosting` block wins. `hiringOrganization` may be an object or a
/// bare string.
fn job_posting_fields(blocks: &[Value]) -> (Option<String>, Option<String>) {
    for b in blocks {
        if !has_type(b, "JobPosting") {
            continue;
        }
        let title = b.get("title").and_then(Value::as_str).map(str::to_string);
        let company = b
            .get("hiringOrganization")
            .and_then(|h| h.get("name").and_then(Value::as_str).or_else(|| h.as_str()))
            .map(str::to_string);
        if title.is_some() || company.is_some() {
            return (title, company);
        }
    }
    (None, None)
}

fn has_type(v: &Value, name: &str) -> bool {
    match v.get("@type") {
        Some(Value::String(s)) => s == name,
        Some(Value::Array(items)) => items.iter().any(|t| t.as_str() == Some(name)),
        _ => false,
    }
}
