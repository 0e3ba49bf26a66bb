//! Certificate status normalization.

use ixmon_types::{CertStatus, CertificateSignal, PdExecution};
use serde::{Deserialize, Serialize};

/// Classified certificate health for one execution.
///
/// Derived on demand, never persisted. The diagnostic fields pass through
/// from the signal unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateHealth {
    pub status: Option<CertStatus>,
    pub thumbprint: Option<String>,
    pub failure_stage: Option<String>,
    pub root_cause: Option<String>,
    pub http_status: Option<u16>,
}

/// Parse a raw feed status. Matching is ASCII case-insensitive on the exact
/// tokens; anything else is `None`.
pub fn parse_status(raw: &str) -> Option<CertStatus> {
    [
        CertStatus::Valid,
        CertStatus::ExpiringSoon,
        CertStatus::Expired,
    ]
    .into_iter()
    .find(|status| raw.eq_ignore_ascii_case(status.as_str()))
}

/// Classify a normalized certificate signal.
pub fn classify(signal: &CertificateSignal) -> CertificateHealth {
    CertificateHealth {
        status: signal.status.as_deref().and_then(parse_status),
        thumbprint: signal.thumbprint.clone(),
        failure_stage: signal.failure_stage.clone(),
        root_cause: signal.root_cause.clone(),
        http_status: signal.http_status,
    }
}

pub fn classify_execution(execution: &PdExecution) -> CertificateHealth {
    classify(&execution.certificate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_ascii_casing() {
        assert_eq!(parse_status("VALID"), Some(CertStatus::Valid));
        assert_eq!(parse_status("valid"), Some(CertStatus::Valid));
        assert_eq!(parse_status("Expiring_Soon"), Some(CertStatus::ExpiringSoon));
        assert_eq!(parse_status("eXpIrEd"), Some(CertStatus::Expired));
    }

    #[test]
    fn parse_rejects_near_misses() {
        assert_eq!(parse_status(""), None);
        assert_eq!(parse_status(" VALID"), None);
        assert_eq!(parse_status("expiring-soon"), None);
        assert_eq!(parse_status("EXPIRINGSOON"), None);
        assert_eq!(parse_status("REVOKED"), None);
    }

    #[test]
    fn classify_passes_diagnostics_through() {
        let signal = CertificateSignal {
            status: Some("garbage".into()),
            thumbprint: Some("AA:BB".into()),
            failure_stage: Some("TLS_HANDSHAKE".into()),
            root_cause: Some("CERT_UNTRUSTED".into()),
            http_status: Some(526),
        };
        let health = classify(&signal);
        assert_eq!(health.status, None);
        assert_eq!(health.thumbprint.as_deref(), Some("AA:BB"));
        assert_eq!(health.failure_stage.as_deref(), Some("TLS_HANDSHAKE"));
        assert_eq!(health.root_cause.as_deref(), Some("CERT_UNTRUSTED"));
        assert_eq!(health.http_status, Some(526));
    }
}
