//! Feed snapshots and the views derived from them.

use std::sync::Arc;

use ixmon_cert::{
    Badge, CertificateCopy, CertificateHealth, badge, certificate_copy, classify_execution,
    description,
};
use ixmon_correlate::CorrelationIndex;
use ixmon_derived::derive_snapshot;
use ixmon_health::{HealthInput, HealthReport, evaluate_health};
use ixmon_settings::HealthSettings;
use ixmon_types::{Finding, IntegrationHealth, MetricsSnapshot, PdExecution, TelemetryEvent};
use serde::Serialize;
use tracing::{debug, warn};

use crate::feed::{FeedError, FeedKind, FeedSource};

/// Load state of one feed in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FeedStatus {
    Ready,
    Failed(String),
}

impl FeedStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, FeedStatus::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FeedStatus::Ready => None,
            FeedStatus::Failed(message) => Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatuses {
    pub findings: FeedStatus,
    pub executions: FeedStatus,
    pub telemetry: FeedStatus,
    pub integration_health: FeedStatus,
}

impl FeedStatuses {
    /// Failed feeds with their messages, in feed order.
    pub fn failures(&self) -> Vec<(FeedKind, &str)> {
        [
            (FeedKind::Findings, &self.findings),
            (FeedKind::Executions, &self.executions),
            (FeedKind::Telemetry, &self.telemetry),
            (FeedKind::IntegrationHealth, &self.integration_health),
        ]
        .into_iter()
        .filter_map(|(kind, status)| status.error().map(|e| (kind, e)))
        .collect()
    }
}

fn settle<T: Default>(result: Result<T, FeedError>) -> (T, FeedStatus) {
    match result {
        Ok(data) => (data, FeedStatus::Ready),
        Err(e) => {
            warn!(feed = %e.feed(), error = %e, "feed failed to load");
            (T::default(), FeedStatus::Failed(e.to_string()))
        }
    }
}

/// One consistent, immutable set of feed data.
///
/// A failed feed contributes an empty collection; its error is kept in
/// [`FeedSnapshot::statuses`].
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub findings: Vec<Finding>,
    pub executions: Vec<PdExecution>,
    pub telemetry: Vec<TelemetryEvent>,
    pub integration_health: Option<IntegrationHealth>,
    pub statuses: FeedStatuses,
}

impl FeedSnapshot {
    /// Fetch every feed independently. Never fails as a whole.
    pub fn load<S: FeedSource + ?Sized>(source: &S) -> Self {
        let (findings, findings_status) = settle(source.findings());
        let (executions, executions_status) = settle(source.executions());
        let (telemetry, telemetry_status) = settle(source.telemetry());
        let (integration_health, health_status) = settle(source.integration_health().map(Some));

        debug!(
            findings = findings.len(),
            executions = executions.len(),
            telemetry = telemetry.len(),
            "feed snapshot loaded"
        );

        Self {
            findings,
            executions,
            telemetry,
            integration_health,
            statuses: FeedStatuses {
                findings: findings_status,
                executions: executions_status,
                telemetry: telemetry_status,
                integration_health: health_status,
            },
        }
    }

    pub fn index(&self) -> CorrelationIndex<'_> {
        CorrelationIndex::build(&self.findings, &self.executions, &self.telemetry)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        derive_snapshot(&self.findings, &self.executions, &self.telemetry)
    }

    /// Health input: the integration-health feed when it loaded, otherwise
    /// the locally derived execution metrics, otherwise the feed error.
    pub fn health_input(&self, metrics: &MetricsSnapshot) -> HealthInput {
        if let Some(health) = &self.integration_health {
            return HealthInput::from_integration_health(health);
        }
        if self.statuses.executions.is_ready() {
            return HealthInput::from_metrics(metrics);
        }
        let message = self
            .statuses
            .integration_health
            .error()
            .or(self.statuses.executions.error())
            .unwrap_or("integration health feed is unavailable");
        HealthInput::failed(message)
    }
}

/// An execution annotated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRow {
    pub execution: PdExecution,
    pub certificate: CertificateHealth,
    pub badge: Badge,
    pub description: &'static str,
    pub finding_count: usize,
}

impl ExecutionRow {
    fn new(execution: &PdExecution, finding_count: usize) -> Self {
        let certificate = classify_execution(execution);
        Self {
            badge: badge(certificate.status),
            description: description(certificate.status),
            certificate,
            execution: execution.clone(),
            finding_count,
        }
    }
}

/// Top-level dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub health: HealthReport,
    pub metrics: MetricsSnapshot,
    pub executions: Vec<ExecutionRow>,
    /// `None` until the first refresh.
    pub feeds: Option<FeedStatuses>,
    pub uncorrelated_findings: usize,
    pub uncorrelated_telemetry: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetail {
    pub finding: Finding,
    /// Present when the finding is tied to certificate trust.
    pub certificate: Option<CertificateCopy>,
}

/// Everything known about one request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDown {
    pub request_id: String,
    pub execution: Option<ExecutionRow>,
    pub findings: Vec<FindingDetail>,
    pub telemetry: Vec<TelemetryEvent>,
}

impl DrillDown {
    pub fn is_empty(&self) -> bool {
        self.execution.is_none() && self.findings.is_empty() && self.telemetry.is_empty()
    }
}

/// Owns a feed source and the most recent snapshot taken from it.
///
/// Every view is computed from a single snapshot; `refresh` replaces the
/// snapshot as a unit.
#[derive(Debug)]
pub struct Session<S: FeedSource> {
    source: S,
    thresholds: HealthSettings,
    snapshot: Option<Arc<FeedSnapshot>>,
}

impl<S: FeedSource> Session<S> {
    pub fn new(source: S, thresholds: HealthSettings) -> Self {
        Self {
            source,
            thresholds,
            snapshot: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Latest snapshot, if any refresh has completed.
    pub fn snapshot(&self) -> Option<Arc<FeedSnapshot>> {
        self.snapshot.clone()
    }

    /// Reload all feeds and swap in the new snapshot.
    pub fn refresh(&mut self) -> Arc<FeedSnapshot> {
        let snapshot = Arc::new(FeedSnapshot::load(&self.source));
        self.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn summary(&self) -> Summary {
        let Some(snapshot) = self.snapshot.as_deref() else {
            return Summary {
                health: evaluate_health(&HealthInput::loading(), &self.thresholds),
                metrics: MetricsSnapshot::default(),
                executions: Vec::new(),
                feeds: None,
                uncorrelated_findings: 0,
                uncorrelated_telemetry: 0,
            };
        };

        let metrics = snapshot.metrics();
        let health = evaluate_health(&snapshot.health_input(&metrics), &self.thresholds);
        let index = snapshot.index();
        let executions = snapshot
            .executions
            .iter()
            .map(|e| ExecutionRow::new(e, index.finding_count(&e.request_id)))
            .collect();

        Summary {
            health,
            metrics,
            executions,
            feeds: Some(snapshot.statuses.clone()),
            uncorrelated_findings: index.uncorrelated_findings(),
            uncorrelated_telemetry: index.uncorrelated_telemetry(),
        }
    }

    pub fn drill_down(&self, request_id: &str) -> DrillDown {
        let mut view = DrillDown {
            request_id: request_id.to_string(),
            execution: None,
            findings: Vec::new(),
            telemetry: Vec::new(),
        };
        let Some(snapshot) = self.snapshot.as_deref() else {
            return view;
        };

        let index = snapshot.index();
        let joined = index.drill_down(request_id);
        view.execution = joined
            .execution
            .map(|e| ExecutionRow::new(e, joined.findings.len()));
        view.findings = joined
            .findings
            .iter()
            .map(|f| FindingDetail {
                finding: (*f).clone(),
                certificate: certificate_copy(f, joined.execution),
            })
            .collect();
        view.telemetry = joined.telemetry.iter().map(|t| (*t).clone()).collect();
        view
    }
}
