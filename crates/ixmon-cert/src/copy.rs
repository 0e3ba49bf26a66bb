//! Finding-to-certificate correlation and the copy it selects.

use ixmon_types::{CertStatus, Finding, PdExecution};
use serde::Serialize;

use crate::classify::{CertificateHealth, classify_execution};

/// Tokens in an execution's root cause or failure stage that point at
/// certificate trust. Compared against the uppercased field.
const EXECUTION_TOKENS: &[&str] = &["CERT", "TLS", "X509", "SSL"];

/// Word prefixes in a finding's free text that point at certificate trust.
/// Compared against the lowercased text; a token only matches at the start
/// of a word, so "certificate" counts and "uncertain" does not.
const FINDING_TOKENS: &[&str] = &[
    "cert",
    "tls",
    "mtls",
    "x509",
    "x.509",
    "ssl",
    "thumbprint",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyKind {
    Expired,
    ExpiringSoon,
    Valid,
    Generic,
}

/// Summary, rationale and recommended action for a certificate-related finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateCopy {
    pub kind: CopyKind,
    pub summary: &'static str,
    pub rationale: &'static str,
    pub action: &'static str,
    pub thumbprint: Option<String>,
}

fn execution_mentions_certificate(health: &CertificateHealth) -> bool {
    [health.root_cause.as_deref(), health.failure_stage.as_deref()]
        .into_iter()
        .flatten()
        .map(str::to_ascii_uppercase)
        .any(|field| EXECUTION_TOKENS.iter().any(|t| field.contains(t)))
}

fn starts_word(text: &str, token: &str) -> bool {
    text.match_indices(token).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

fn finding_mentions_certificate(finding: &Finding) -> bool {
    [
        Some(finding.summary.as_str()),
        finding.technical_detail.as_deref(),
        Some(finding.category.as_str()),
        Some(finding.finding_type.as_str()),
    ]
    .into_iter()
    .flatten()
    .map(str::to_lowercase)
    .any(|text| FINDING_TOKENS.iter().any(|t| starts_word(&text, t)))
}

fn related(finding: &Finding, health: Option<&CertificateHealth>) -> bool {
    let by_execution = health
        .map(|h| h.status.is_some() || execution_mentions_certificate(h))
        .unwrap_or(false);
    by_execution || finding_mentions_certificate(finding)
}

/// Best-effort union of execution and finding signals.
pub fn is_certificate_related(finding: &Finding, execution: Option<&PdExecution>) -> bool {
    let health = execution.map(classify_execution);
    related(finding, health.as_ref())
}

/// Copy for a finding, or `None` when nothing ties it to certificate trust.
///
/// Priority: expired, then expiring soon, then explicitly valid, then the
/// generic certificate-issue copy.
pub fn certificate_copy(
    finding: &Finding,
    execution: Option<&PdExecution>,
) -> Option<CertificateCopy> {
    let health = execution.map(classify_execution);
    if !related(finding, health.as_ref()) {
        return None;
    }

    let status = health.as_ref().and_then(|h| h.status);
    let thumbprint = health.and_then(|h| h.thumbprint);

    let copy = match status {
        Some(CertStatus::Expired) => CertificateCopy {
            kind: CopyKind::Expired,
            summary: "The exchange certificate had expired when this transaction ran.",
            rationale: "An expired certificate fails the TLS handshake before any \
                        Patient Discovery payload is exchanged.",
            action: "Renew the certificate, share the new thumbprint with the partner \
                     and retry the failed transactions.",
            thumbprint,
        },
        Some(CertStatus::ExpiringSoon) => CertificateCopy {
            kind: CopyKind::ExpiringSoon,
            summary: "The exchange certificate is close to its expiry date.",
            rationale: "Transactions still succeed today but will fail TLS validation \
                        as soon as the certificate lapses.",
            action: "Schedule a renewal before expiry and coordinate the thumbprint \
                     change with the partner.",
            thumbprint,
        },
        Some(CertStatus::Valid) => CertificateCopy {
            kind: CopyKind::Valid,
            summary: "The exchange certificate was valid when this transaction ran.",
            rationale: "The finding mentions certificates, but the execution presented a \
                        valid certificate, so trust is unlikely to be the root cause.",
            action: "Investigate transport or payload causes before rotating certificates.",
            thumbprint,
        },
        None => CertificateCopy {
            kind: CopyKind::Generic,
            summary: "This finding points to a certificate trust issue.",
            rationale: "Certificate problems interrupt TLS negotiation between exchange \
                        partners.",
            action: "Verify the certificate chain and expiry for the affected endpoint.",
            thumbprint,
        },
    };
    Some(copy)
}
