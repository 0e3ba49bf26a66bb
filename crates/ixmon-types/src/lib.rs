//! # ixmon-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures shared by every `ixmon` crate:
//! the three upstream event streams (findings, PD executions, telemetry),
//! the integration-health summary, governance cases and knowledge-base
//! articles, and the derived metrics snapshot.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the wire names (camelCase, feed enum spellings)
//! are the contract. New fields are optional or defaulted so older feeds
//! still parse.
//!
//! ## What belongs here
//! * Pure data structs with Serde derive
//! * The ingestion adapters that collapse legacy field names into one
//!   canonical shape (`RawExecution`, `RawTelemetryEvent`)
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Correlation or metrics logic

pub mod kb;
pub mod metrics;
pub mod oid;

use serde::{Deserialize, Serialize};

pub use kb::{CaseStatus, GovernanceCase, KbArticle, KbStatus};
pub use metrics::{
    CertificateExposure, ComplianceReport, ExecutionReport, FailureBreakdown, FailureCategory,
    MetricsSnapshot, SeverityCounts, TelemetryReport,
};
pub use oid::{OidEntry, OidStatus};

/// The current schema version for JSON documents emitted by `ixmon`.
pub const SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Findings
// =============================================================================

/// Finding severity, ordered `Ok < Warning < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

/// A detected issue, read-only once it leaves the findings feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub organization: String,
    pub severity: Severity,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "type")]
    pub finding_type: String,
    /// Correlation key into the PD executions feed.
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub technical_detail: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detected_at: String,
}

// =============================================================================
// PD executions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Partial,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Partial => "partial",
        }
    }
}

/// Canonical trust state of the certificate used by one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

impl CertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CertStatus::Valid => "VALID",
            CertStatus::ExpiringSoon => "EXPIRING_SOON",
            CertStatus::Expired => "EXPIRED",
        }
    }
}

/// Per-execution certificate signal after field-name normalization.
///
/// `status` is still the raw feed string; classification happens in
/// `ixmon-cert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSignal {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbprint: Option<String>,
    #[serde(default)]
    pub failure_stage: Option<String>,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(default)]
    pub http_status: Option<u16>,
}

/// One Patient Discovery transaction in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdExecution {
    pub request_id: String,
    pub transaction_type: String,
    pub direction: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub duration_ms: u64,
    pub outcome: Outcome,
    pub retry_count: u32,
    pub environment: String,
    pub partner: String,
    #[serde(default)]
    pub certificate: CertificateSignal,
}

/// A PD execution as the feed delivers it.
///
/// Certificate attributes arrive under two naming generations: the current
/// `cert*` names and the legacy `certificate*`/bare names. Only
/// [`RawExecution::normalize`] looks at both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExecution {
    pub request_id: String,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    pub outcome: Outcome,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub environment: String,
    #[serde(default, alias = "qhinName", alias = "qhin")]
    pub partner: String,

    pub cert_status: Option<String>,
    pub cert_thumbprint: Option<String>,
    pub cert_failure_stage: Option<String>,
    pub cert_root_cause: Option<String>,
    pub cert_http_status: Option<u16>,

    pub certificate_status: Option<String>,
    pub certificate_thumbprint: Option<String>,
    pub failure_stage: Option<String>,
    pub root_cause: Option<String>,
    pub http_status: Option<u16>,
}

impl RawExecution {
    /// Collapse both naming generations into the canonical shape, preferring
    /// the current name when both are present.
    pub fn normalize(self) -> PdExecution {
        let certificate = CertificateSignal {
            status: self.cert_status.or(self.certificate_status),
            thumbprint: self.cert_thumbprint.or(self.certificate_thumbprint),
            failure_stage: self.cert_failure_stage.or(self.failure_stage),
            root_cause: self.cert_root_cause.or(self.root_cause),
            http_status: self.cert_http_status.or(self.http_status),
        };

        PdExecution {
            request_id: self.request_id,
            transaction_type: self.transaction_type,
            direction: self.direction,
            started_at: self.started_at,
            completed_at: self.completed_at,
            duration_ms: self.duration_ms,
            outcome: self.outcome,
            retry_count: self.retry_count,
            environment: self.environment,
            partner: self.partner,
            certificate,
        }
    }
}

impl From<RawExecution> for PdExecution {
    fn from(raw: RawExecution) -> Self {
        raw.normalize()
    }
}

// =============================================================================
// Telemetry
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TelemetryStatus {
    Success,
    NoMatch,
    Error,
    Partial,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryCorrelation {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySource {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub partner: String,
    #[serde(default)]
    pub environment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryTiming {
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryOutcome {
    pub status: TelemetryStatus,
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryProtocol {
    #[serde(default)]
    pub standard: String,
    #[serde(default)]
    pub interaction_id: Option<String>,
}

/// A fine-grained execution trace record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub event_id: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub correlation: TelemetryCorrelation,
    #[serde(default)]
    pub source: TelemetrySource,
    #[serde(default)]
    pub execution: TelemetryTiming,
    pub outcome: TelemetryOutcome,
    #[serde(default)]
    pub protocol: TelemetryProtocol,
}

impl TelemetryEvent {
    /// Correlation key joining this event to a PD execution.
    pub fn request_id(&self) -> Option<&str> {
        self.correlation.request_id.as_deref()
    }
}

/// A telemetry event as the feed delivers it, with the legacy top-level
/// `requestId` still attached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTelemetryEvent {
    #[serde(flatten)]
    pub event: TelemetryEvent,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl RawTelemetryEvent {
    /// Fill `correlation.requestId` from the legacy field when the
    /// correlation block does not carry one.
    pub fn normalize(self) -> TelemetryEvent {
        let mut event = self.event;
        if event.correlation.request_id.is_none() {
            event.correlation.request_id = self.request_id;
        }
        event
    }
}

// =============================================================================
// Integration health
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateCounts {
    #[serde(default)]
    pub valid: usize,
    #[serde(default)]
    pub expiring_soon: usize,
    #[serde(default)]
    pub expired: usize,
}

/// Pre-aggregated summary served by the integration-health feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationHealth {
    #[serde(default)]
    pub total_executions: usize,
    #[serde(default)]
    pub success_count: usize,
    #[serde(default)]
    pub success_rate: u32,
    #[serde(default)]
    pub certificates: CertificateCounts,
    #[serde(default)]
    pub affected_partners: usize,
}
