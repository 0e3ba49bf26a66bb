//! Fixed badge and description tables.

use ixmon_types::CertStatus;
use serde::Serialize;

/// Qualitative severity class of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

/// Badge for a classified status; `None` is the unknown badge.
pub fn badge(status: Option<CertStatus>) -> Badge {
    match status {
        Some(CertStatus::Valid) => Badge {
            label: "VALID",
            tone: BadgeTone::Success,
        },
        Some(CertStatus::ExpiringSoon) => Badge {
            label: "EXPIRING SOON",
            tone: BadgeTone::Warning,
        },
        Some(CertStatus::Expired) => Badge {
            label: "EXPIRED",
            tone: BadgeTone::Danger,
        },
        None => Badge {
            label: "UNKNOWN",
            tone: BadgeTone::Neutral,
        },
    }
}

/// One-sentence description for a classified status.
pub fn description(status: Option<CertStatus>) -> &'static str {
    match status {
        Some(CertStatus::Valid) => "Certificate was valid when this transaction ran.",
        Some(CertStatus::ExpiringSoon) => {
            "Certificate was close to expiry when this transaction ran; renew it soon."
        }
        Some(CertStatus::Expired) => {
            "Certificate had expired and caused TLS failure for this transaction."
        }
        None => "Certificate status was not reported for this transaction.",
    }
}
