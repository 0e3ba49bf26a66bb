//! Derived metrics snapshot types.
//!
//! A snapshot has no identity of its own: it is recomputed from one set of
//! findings, executions and telemetry whenever those inputs change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub warning: usize,
    pub critical: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub compliant: usize,
    pub total: usize,
    pub rate_pct: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    pub partial: usize,
    pub success_rate_pct: u32,
    pub avg_latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureCategory {
    pub label: String,
    pub count: usize,
    pub percentage: u32,
}

/// Root-cause breakdown of failed executions. Empty when there are no
/// failures to categorize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBreakdown {
    pub total_failures: usize,
    pub categories: Vec<FailureCategory>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReport {
    pub total_events: usize,
    pub success: usize,
    pub errors: usize,
    pub success_rate_pct: u32,
    pub avg_duration_ms: u64,
}

/// Executions per classified certificate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateExposure {
    pub valid: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub unknown: usize,
    /// Distinct partners that transacted on an expired or expiring
    /// certificate, sorted.
    pub exposed_partners: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub severity: SeverityCounts,
    pub compliance: ComplianceReport,
    pub executions: ExecutionReport,
    pub failures: FailureBreakdown,
    pub telemetry: TelemetryReport,
    pub certificates: CertificateExposure,
    /// Distinct partners with at least one failed execution, sorted.
    pub failing_partners: Vec<String>,
}
