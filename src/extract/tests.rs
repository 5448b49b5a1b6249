use crate::extract::{apply_title_hint, from_page_html, from_text, from_url_shape, parse_url};
use crate::extract::text::detect_status;
use crate::types::Status;

/* ------------ text ------------ */

#[test]
fn test_from_text_french_acknowledgement() {
    let text = "Bonjour,\n\
        Nous avons bien reçu votre candidature pour le poste de Développeur Full Stack \
        chez Google France et nous reviendrons vers vous rapidement.\n\
        Cordialement, Marie Dupont";

    let draft = from_text(text);
    assert_eq!(draft.title.as_deref(), Some("Développeur Full Stack"));
    assert_eq!(draft.company.as_deref(), Some("Google France"));
    assert_eq!(draft.contact.as_deref(), Some("Marie Dupont"));
    assert_eq!(draft.status, Status::Pending);
}

#[test]
fn test_from_text_empty_string_gives_empty_draft() {
    let draft = from_text("");
    assert!(draft.is_empty());
    assert_eq!(draft.status, Status::Pending);
}

#[test]
fn test_from_text_never_panics_on_arbitrary_input() {
    for text in ["🦀🦀🦀", "a", "|||", "chez", "poste de", "\n\n\n", "Mme "] {
        let _ = from_text(text);
    }
}

#[test]
fn test_from_text_picks_up_email_and_link() {
    let text = "Contact: recrutement@acme.fr, annonce: https://acme.fr/jobs/42.";
    let draft = from_text(text);
    assert_eq!(draft.email.as_deref(), Some("recrutement@acme.fr"));
    assert_eq!(draft.link.as_deref(), Some("https://acme.fr/jobs/42"));
}

#[test]
fn test_detect_status_interview_keyword() {
    assert_eq!(
        detect_status("Nous vous proposons un entretien la semaine prochaine."),
        Status::Interview
    );
    assert_eq!(
        detect_status("We would like to schedule an interview."),
        Status::Interview
    );
}

#[test]
fn test_detect_status_rejection_keyword() {
    assert_eq!(
        detect_status("Malheureusement, votre profil n'a pas été retenu."),
        Status::Rejected
    );
}

#[test]
fn test_detect_status_rejection_wins_over_interview() {
    // A rejection mail that mentions the interview it follows.
    let text = "Suite à votre entretien, nous avons le regret de ne pas donner suite.";
    assert_eq!(detect_status(text), Status::Rejected);
}

#[test]
fn test_detect_status_defaults_to_pending() {
    assert_eq!(detect_status("Votre candidature a bien été reçue."), Status::Pending);
}

/* ------------ url shape ------------ */

#[test]
fn test_parse_url_rejects_malformed_input() {
    assert!(parse_url("not a url").is_err());
}

#[test]
fn test_linkedin_company_segment() {
    let url = parse_url("https://www.linkedin.com/company/google-france/about/").unwrap();
    let draft = from_url_shape(&url);
    assert_eq!(draft.company.as_deref(), Some("Google France"));
}

#[test]
fn test_linkedin_job_view_slug_with_id_and_employer_infix() {
    let url =
        parse_url("https://www.linkedin.com/jobs/view/senior-rust-engineer-at-acme-corp-3791487")
            .unwrap();
    let draft = from_url_shape(&url);
    assert_eq!(draft.title.as_deref(), Some("Senior Rust Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Acme Corp"));
}

#[test]
fn test_indeed_query_params() {
    let url = parse_url("https://fr.indeed.com/viewjob?jk=abc123&title=Data+Engineer&company=Airbus")
        .unwrap();
    let draft = from_url_shape(&url);
    assert_eq!(draft.title.as_deref(), Some("Data Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Airbus"));
}

#[test]
fn test_wttj_company_and_job_segments() {
    let url = parse_url(
        "https://www.welcometothejungle.com/fr/companies/back-market/jobs/developpeur-full-stack",
    )
    .unwrap();
    let draft = from_url_shape(&url);
    assert_eq!(draft.company.as_deref(), Some("Back Market"));
    assert_eq!(draft.title.as_deref(), Some("Developpeur Full Stack"));
}

#[test]
fn test_unknown_site_keeps_only_the_link() {
    let url = parse_url("https://example.com/x").unwrap();
    let draft = from_url_shape(&url);
    assert!(draft.company.is_none());
    assert!(draft.title.is_none());
    assert_eq!(draft.link.as_deref(), Some("https://example.com/x"));
}

/* ------------ page html ------------ */

#[test]
fn test_page_og_title_splits_on_pipe() {
    let html = r#"<html><head>
        <meta property="og:title" content="Rust Engineer | Acme Corp">
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("Rust Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Acme Corp"));
}

#[test]
fn test_page_title_tag_fallback_filters_site_tokens() {
    let html = r#"<html><head>
        <title>Data Engineer chez Airbus | LinkedIn</title>
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("Data Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Airbus"));
}

#[test]
fn test_page_site_name_company_fallback() {
    let html = r#"<html><head>
        <meta property="og:title" content="Backend Developer">
        <meta property="og:site_name" content="Back Market">
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("Backend Developer"));
    assert_eq!(draft.company.as_deref(), Some("Back Market"));
}

#[test]
fn test_page_json_ld_job_posting_object() {
    let html = r#"<html><head>
        <script type="application/ld+json">
        {"@type": "JobPosting", "title": "Staff Engineer",
         "hiringOrganization": {"@type": "Organization", "name": "Datadog"}}
        </script>
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("Staff Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Datadog"));
}

#[test]
fn test_page_json_ld_job_posting_in_array() {
    let html = r#"<html><head>
        <script type="application/ld+json">
        [{"@type": "WebSite", "name": "jobs"},
         {"@type": ["JobPosting"], "title": "SRE", "hiringOrganization": "OVHcloud"}]
        </script>
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("SRE"));
    assert_eq!(draft.company.as_deref(), Some("OVHcloud"));
}

#[test]
fn test_page_og_title_beats_json_ld() {
    let html = r#"<html><head>
        <meta property="og:title" content="Platform Engineer | Scaleway">
        <script type="application/ld+json">
        {"@type": "JobPosting", "title": "Other Title", "hiringOrganization": "Other Co"}
        </script>
        </head><body></body></html>"#;
    let draft = from_page_html(html);
    assert_eq!(draft.title.as_deref(), Some("Platform Engineer"));
    assert_eq!(draft.company.as_deref(), Some("Scaleway"));
}

#[test]
fn test_title_hint_overrides_everything() {
    let url = parse_url("https://www.linkedin.com/company/acme").unwrap();
    let mut draft = from_url_shape(&url);
    apply_title_hint(&mut draft, "Lead Developer chez Mirakl");
    assert_eq!(draft.title.as_deref(), Some("Lead Developer"));
    assert_eq!(draft.company.as_deref(), Some("Mirakl"));
}
