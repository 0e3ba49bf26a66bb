//! Building an article from a governance case.

use ixmon_types::{GovernanceCase, KbArticle, KbStatus};
use time::OffsetDateTime;

pub const PENDING_DECISION: &str = "Pending decision";
pub const PENDING_RESOLUTION: &str = "Resolution pending governance review.";

pub fn article_id(case: &GovernanceCase) -> String {
    format!("KB-{}", case.id)
}

/// Decision text: call site first, then the case's stored selection.
pub fn resolve_decision(decision: Option<&str>, case: &GovernanceCase) -> String {
    decision
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .or_else(|| {
            case.selected_decision
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
        })
        .unwrap_or(PENDING_DECISION)
        .to_string()
}

pub fn build_article(
    id: String,
    case: &GovernanceCase,
    decision: Option<&str>,
    status: KbStatus,
    now: OffsetDateTime,
) -> KbArticle {
    KbArticle {
        id,
        case_id: case.id.clone(),
        title: format!("{} at {}", case.issue_type, case.organization),
        organization: case.organization.clone(),
        decision: resolve_decision(decision, case),
        resolution_summary: case
            .resolution_summary
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| PENDING_RESOLUTION.to_string()),
        updated_at: now,
        status,
        tags: vec![case.issue_type.clone(), case.severity.as_str().to_string()],
    }
}
