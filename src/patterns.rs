//! Ordered extraction patterns for the quick-import text parser.
//!
//! Each list is evaluated top to bottom and the first match wins, so the
//! order is part of the contract. Patterns are intentionally loose
//! (capitalized-word runs, prepositions like "chez"/"at"); the caller is
//! expected to let the user review the draft before saving.

use once_cell::sync::Lazy;
use regex::Regex;

/// Basic `local@domain.tld` shape.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

/// Same shape, anchored, for validating a whole field.
pub static EMAIL_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

pub static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>)"']+"#).expect("valid regex"));

/// Company name candidates, most specific phrasing first.
pub static COMPANY: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "chez Google France", "au sein de Capgemini"
        r"(?:chez|au sein de|pour la société|pour l['’]entreprise)[ \t]+([A-ZÀ-Ý][\w&'’-]*(?:[ \t]+[A-ZÀ-Ý][\w&'’-]*){0,3})",
        // "at Acme Corp", "joining Datadog"
        r"\b(?:at|with|joining)[ \t]+([A-Z][\w&'-]*(?:[ \t]+[A-Z][\w&'-]*){0,3})",
        // "Entreprise : Thales"
        r"(?im)^[ \t]*(?:entreprise|société|company)[ \t]*[:\-][ \t]*([^\n,;]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Job title candidates.
pub static TITLE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "pour le poste de Développeur Full Stack chez ..."
        r"(?:pour le poste|au poste|le poste)(?: de[ \t]+| d['’][ \t]*)([^,.;\n]+?)(?:[ \t]+(?:chez|à|au sein de)\b|[,.;\n]|$)",
        // "for the position of Staff Engineer at ..."
        r"(?:for the (?:position|role) of|position of|role of)[ \t]+([^,.;\n]+?)(?:[ \t]+(?:at|with)\b|[,.;\n]|$)",
        // "Poste : Développeur Full Stack"
        r"(?im)^[ \t]*(?:poste|position|rôle|role|intitulé)[ \t]*[:\-][ \t]*([^\n,;]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Contact name candidates; sign-off lines first, honorifics second.
pub static CONTACT: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:Cordialement|Bien cordialement|Bien à vous|Sincèrement|Salutations|Best regards|Kind regards|Regards|Sincerely)[,.!]?\s+([A-ZÀ-Ý][\wà-ÿ'’-]+(?:[ \t]+[A-ZÀ-Ý][\wà-ÿ'’-]+){0,2})",
        r"\b(?:Mme\.?|Mr\.?|Ms\.?|Mrs\.?|Dr\.?|M\.)[ \t]+([A-ZÀ-Ý][\wà-ÿ'’-]+(?:[ \t]+[A-ZÀ-Ý][\wà-ÿ'’-]+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Keywords forcing status = Rejected. Checked before the interview list:
/// a rejection mail routinely mentions the interview it follows.
pub const REJECTION_KEYWORDS: &[&str] = &[
    "malheureusement",
    "regret",
    "pas été retenu",
    "pas ete retenu",
    "refus",
    "décliné",
    "unfortunately",
    "not been selected",
    "not to move forward",
    "declined",
];

/// Keywords forcing status = Interview.
pub const INTERVIEW_KEYWORDS: &[&str] = &[
    "entretien",
    "interview",
    "entrevue",
    "convocation",
    "rendez-vous",
    "échange téléphonique",
];
