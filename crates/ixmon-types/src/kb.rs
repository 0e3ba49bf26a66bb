//! Governance cases and knowledge-base articles.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Severity;

/// Publication state of a knowledge-base article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KbStatus {
    #[default]
    Queued,
    Draft,
    Published,
}

impl KbStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            KbStatus::Queued => "queued",
            KbStatus::Draft => "draft",
            KbStatus::Published => "published",
        }
    }
}

impl std::str::FromStr for KbStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queued" => Ok(KbStatus::Queued),
            "draft" => Ok(KbStatus::Draft),
            "published" => Ok(KbStatus::Published),
            other => Err(format!("unknown article status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    #[default]
    Open,
    InReview,
    Resolved,
}

/// A governance case raised against a finding or partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceCase {
    pub id: String,
    pub issue_type: String,
    pub organization: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub status: CaseStatus,
    /// Decision previously selected for this case, if any.
    #[serde(default)]
    pub selected_decision: Option<String>,
    #[serde(default)]
    pub resolution_summary: Option<String>,
}

/// A persisted knowledge-base article. `case_id` is unique per collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KbArticle {
    pub id: String,
    pub case_id: String,
    pub title: String,
    pub organization: String,
    pub decision: String,
    pub resolution_summary: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub status: KbStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kb_status_parses_any_case() {
        assert_eq!("Published".parse::<KbStatus>(), Ok(KbStatus::Published));
        assert_eq!("DRAFT".parse::<KbStatus>(), Ok(KbStatus::Draft));
        assert!("archived".parse::<KbStatus>().is_err());
    }

    #[test]
    fn kb_status_defaults_to_queued() {
        assert_eq!(KbStatus::default(), KbStatus::Queued);
    }

    #[test]
    fn article_round_trips_updated_at_as_rfc3339() {
        let json = r#"{"id":"KB-C1","caseId":"C1","title":"t","organization":"o",
            "decision":"d","resolutionSummary":"r","updatedAt":"2024-05-01T12:00:00Z",
            "status":"draft","tags":["tls","critical"]}"#;
        let article: KbArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.updated_at.year(), 2024);
        assert_eq!(article.status, KbStatus::Draft);

        let back = serde_json::to_string(&article).unwrap();
        assert!(back.contains("\"updatedAt\":\"2024-05-01T12:00:00Z\""));
    }

    #[test]
    fn case_defaults_are_open_and_undecided() {
        let case: GovernanceCase = serde_json::from_str(
            r#"{"id":"C1","issueType":"Certificate Expiry","organization":"Acme"}"#,
        )
        .unwrap();
        assert_eq!(case.status, CaseStatus::Open);
        assert_eq!(case.severity, Severity::Ok);
        assert!(case.selected_decision.is_none());
    }
}
