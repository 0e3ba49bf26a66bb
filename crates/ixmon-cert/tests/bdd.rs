//! BDD-style scenario tests for ixmon-cert.

use ixmon_cert::{BadgeTone, CopyKind, badge, certificate_copy, classify_execution, description};
use ixmon_types::{
    CertStatus, CertificateSignal, ComplianceStatus, Finding, PdExecution, RawExecution, Severity,
};

// ============================================================================
// Helpers
// ============================================================================

fn raw(json: &str) -> PdExecution {
    serde_json::from_str::<RawExecution>(json).unwrap().normalize()
}

fn finding(summary: &str, category: &str) -> Finding {
    Finding {
        id: "F-100".into(),
        organization: "Riverbend Health".into(),
        severity: Severity::Critical,
        compliance_status: ComplianceStatus::NonCompliant,
        category: category.into(),
        finding_type: String::new(),
        execution_id: Some("REQ-1".into()),
        summary: summary.into(),
        technical_detail: None,
        description: String::new(),
        detected_at: String::new(),
    }
}

// ============================================================================
// Scenario: classification of feed records
// ============================================================================

#[test]
fn given_lowercase_expired_when_classified_then_expired_badge_and_tls_description() {
    // Given an execution reporting certStatus "expired"
    let exec = raw(r#"{"requestId":"REQ-1","outcome":"failure","certStatus":"expired"}"#);
    // When it is classified
    let health = classify_execution(&exec);
    // Then the canonical state is EXPIRED with its fixed badge and copy
    assert_eq!(health.status, Some(CertStatus::Expired));
    assert_eq!(badge(health.status).label, "EXPIRED");
    assert_eq!(badge(health.status).tone, BadgeTone::Danger);
    assert!(description(health.status).contains("caused TLS failure"));
}

#[test]
fn given_only_legacy_fields_when_classified_then_legacy_values_are_used() {
    let exec = raw(
        r#"{"requestId":"REQ-2","outcome":"failure",
            "certificateStatus":"EXPIRING_SOON","certificateThumbprint":"11:22"}"#,
    );
    let health = classify_execution(&exec);
    assert_eq!(health.status, Some(CertStatus::ExpiringSoon));
    assert_eq!(health.thumbprint.as_deref(), Some("11:22"));
}

#[test]
fn given_malformed_status_when_classified_then_unknown_not_error() {
    let exec = raw(r#"{"requestId":"REQ-3","outcome":"success","certStatus":"kinda-ok"}"#);
    let health = classify_execution(&exec);
    assert_eq!(health.status, None);
    assert_eq!(badge(health.status).label, "UNKNOWN");
}

// ============================================================================
// Scenario: finding copy selection
// ============================================================================

#[test]
fn given_expiring_execution_when_copy_selected_then_expiring_copy_wins_over_text() {
    let exec = PdExecution {
        certificate: CertificateSignal {
            status: Some("expiring_soon".into()),
            thumbprint: Some("FE:ED".into()),
            ..Default::default()
        },
        ..raw(r#"{"requestId":"REQ-1","outcome":"success"}"#)
    };
    let copy = certificate_copy(&finding("Certificate error observed", "Security"), Some(&exec))
        .unwrap();
    assert_eq!(copy.kind, CopyKind::ExpiringSoon);
    assert_eq!(copy.thumbprint.as_deref(), Some("FE:ED"));
}

#[test]
fn given_plain_finding_and_no_execution_when_copy_selected_then_absent() {
    let copy = certificate_copy(&finding("Demographics mismatch", "Matching"), None);
    assert!(copy.is_none());
}

#[test]
fn given_summary_says_uncertain_when_copy_selected_then_none() {
    let copy = certificate_copy(&finding("Uncertain demographic match", "Matching"), None);
    assert!(copy.is_none());
}

#[test]
fn given_category_mentions_tls_when_copy_selected_then_generic() {
    let copy = certificate_copy(&finding("Handshake aborted", "TLS"), None).unwrap();
    assert_eq!(copy.kind, CopyKind::Generic);
    assert!(!copy.action.is_empty());
}
