//! Fixed seed used whenever the stored collection is missing or unusable.

use ixmon_types::{CaseStatus, GovernanceCase, KbArticle, KbStatus};
use time::OffsetDateTime;

use crate::article::{article_id, build_article};

pub const REFERENCE_CASE_ID: &str = "REF-CERT-ROTATION";

/// Published articles for every resolved case, followed by the static
/// certificate-rotation reference article. A case id listed more than once
/// is seeded from its first resolved entry.
pub fn seed_articles(cases: &[GovernanceCase], now: OffsetDateTime) -> Vec<KbArticle> {
    let mut articles: Vec<KbArticle> = Vec::new();
    for case in cases.iter().filter(|c| c.status == CaseStatus::Resolved) {
        if articles.iter().any(|a| a.case_id == case.id) {
            continue;
        }
        articles.push(build_article(article_id(case), case, None, KbStatus::Published, now));
    }

    if !articles.iter().any(|a| a.case_id == REFERENCE_CASE_ID) {
        articles.push(reference_article(now));
    }
    articles
}

fn reference_article(now: OffsetDateTime) -> KbArticle {
    KbArticle {
        id: format!("KB-{REFERENCE_CASE_ID}"),
        case_id: REFERENCE_CASE_ID.to_string(),
        title: "Partner certificate rotation".to_string(),
        organization: "Exchange Operations".to_string(),
        decision: "Rotate partner certificates at least 30 days before expiry.".to_string(),
        resolution_summary: "Expired certificates fail the TLS handshake before a PD \
                             request is sent. Confirm the new thumbprint with the partner \
                             and re-run a test query after rotation."
            .to_string(),
        updated_at: now,
        status: KbStatus::Published,
        tags: vec!["certificate".to_string(), "runbook".to_string()],
    }
}
