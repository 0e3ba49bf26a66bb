//! Health status and input type definitions.

use ixmon_types::{IntegrationHealth, MetricsSnapshot};
use serde::{Deserialize, Serialize};

/// Qualitative health of the exchange, in resolution precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    /// Data is still loading.
    Loading,
    /// The most recent fetch failed.
    Unavailable,
    /// No executions observed.
    NoData,
    /// Success rate at or above the stable threshold.
    Stable,
    /// Success rate at or above the degraded threshold.
    Degraded,
    /// Everything else.
    AtRisk,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 6] = [
        HealthStatus::Loading,
        HealthStatus::Unavailable,
        HealthStatus::NoData,
        HealthStatus::Stable,
        HealthStatus::Degraded,
        HealthStatus::AtRisk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Loading => "Loading",
            HealthStatus::Unavailable => "Unavailable",
            HealthStatus::NoData => "No Data",
            HealthStatus::Stable => "Stable",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::AtRisk => "At Risk",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the resolver looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInput {
    pub loading: bool,
    /// Message of the most recent failed fetch.
    #[serde(default)]
    pub error: Option<String>,
    pub total_executions: usize,
    pub success_rate_pct: u32,
    pub affected_partners: usize,
}

impl HealthInput {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Input taken as-is from the pre-aggregated integration-health feed.
    pub fn from_integration_health(health: &IntegrationHealth) -> Self {
        Self {
            loading: false,
            error: None,
            total_executions: health.total_executions,
            success_rate_pct: health.success_rate,
            affected_partners: health.affected_partners,
        }
    }

    /// Input derived locally from a metrics snapshot.
    pub fn from_metrics(snapshot: &MetricsSnapshot) -> Self {
        Self {
            loading: false,
            error: None,
            total_executions: snapshot.executions.total,
            success_rate_pct: snapshot.executions.success_rate_pct,
            affected_partners: snapshot.failing_partners.len(),
        }
    }
}

/// Resolved status plus its narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub label: String,
    pub narrative: String,
    pub input: HealthInput,
}
