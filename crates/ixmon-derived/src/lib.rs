use std::collections::{BTreeMap, BTreeSet};

use ixmon_cert::classify_execution;
use ixmon_math::{floored_avg, floored_pct, share_pct};
use ixmon_types::{
    CertStatus, CertificateExposure, ComplianceReport, ComplianceStatus, ExecutionReport,
    FailureBreakdown, FailureCategory, Finding, MetricsSnapshot, Outcome, PdExecution, Severity,
    SeverityCounts, TelemetryEvent, TelemetryReport, TelemetryStatus,
};

/// Derive the full metrics snapshot from one consistent set of inputs.
///
/// Pure: the same three slices always produce the same snapshot.
pub fn derive_snapshot(
    findings: &[Finding],
    executions: &[PdExecution],
    telemetry: &[TelemetryEvent],
) -> MetricsSnapshot {
    let executions_report = build_execution_report(executions);
    let failures = failure_breakdown(executions_report.failure, &root_cause_counts(executions));

    MetricsSnapshot {
        severity: build_severity_counts(findings),
        compliance: build_compliance_report(findings),
        executions: executions_report,
        failures,
        telemetry: build_telemetry_report(telemetry),
        certificates: build_certificate_exposure(executions),
        failing_partners: failing_partners(executions),
    }
}

pub fn build_severity_counts(findings: &[Finding]) -> SeverityCounts {
    let mut counts = SeverityCounts {
        total: findings.len(),
        ..Default::default()
    };
    for finding in findings {
        match finding.severity {
            Severity::Warning => counts.warning += 1,
            Severity::Critical => counts.critical += 1,
            Severity::Ok => {}
        }
    }
    counts
}

pub fn build_compliance_report(findings: &[Finding]) -> ComplianceReport {
    let compliant = findings
        .iter()
        .filter(|f| f.compliance_status == ComplianceStatus::Compliant)
        .count();
    ComplianceReport {
        compliant,
        total: findings.len(),
        rate_pct: floored_pct(compliant, findings.len()),
    }
}

pub fn build_execution_report(executions: &[PdExecution]) -> ExecutionReport {
    let mut report = ExecutionReport {
        total: executions.len(),
        ..Default::default()
    };
    let mut latency_sum: u64 = 0;

    for execution in executions {
        match execution.outcome {
            Outcome::Success => report.success += 1,
            Outcome::Failure => report.failure += 1,
            Outcome::Partial => report.partial += 1,
        }
        latency_sum = latency_sum.saturating_add(execution.duration_ms);
    }

    report.success_rate_pct = floored_pct(report.success, report.total);
    report.avg_latency_ms = floored_avg(latency_sum, report.total);
    report
}

/// Occurrences of each root-cause label among failed executions.
///
/// Failures without a root cause are left out; they still count toward the
/// failure total.
pub fn root_cause_counts(executions: &[PdExecution]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for execution in executions {
        if execution.outcome != Outcome::Failure {
            continue;
        }
        if let Some(cause) = execution
            .certificate
            .root_cause
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            *counts.entry(cause.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Categorize `total_failures` by root cause.
///
/// Categories are ordered by count (descending) then label. Each category is
/// capped at the failures not yet attributed, so the category counts never
/// sum past `total_failures`. With no failures the breakdown is empty.
pub fn failure_breakdown(
    total_failures: usize,
    root_causes: &BTreeMap<String, usize>,
) -> FailureBreakdown {
    let mut ranked: Vec<(&String, usize)> = root_causes
        .iter()
        .map(|(label, count)| (label, *count))
        .filter(|(_, count)| *count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut remaining = total_failures;
    let mut categories = Vec::with_capacity(ranked.len());
    for (label, count) in ranked {
        let count = count.min(remaining);
        if count == 0 {
            break;
        }
        let Some(percentage) = share_pct(count, total_failures) else {
            break;
        };
        remaining -= count;
        categories.push(FailureCategory {
            label: label.clone(),
            count,
            percentage,
        });
    }

    FailureBreakdown {
        total_failures,
        categories,
    }
}

pub fn build_telemetry_report(events: &[TelemetryEvent]) -> TelemetryReport {
    let mut report = TelemetryReport {
        total_events: events.len(),
        ..Default::default()
    };
    let mut duration_sum: u64 = 0;

    for event in events {
        match event.outcome.status {
            TelemetryStatus::Success => report.success += 1,
            TelemetryStatus::Error => report.errors += 1,
            TelemetryStatus::NoMatch | TelemetryStatus::Partial => {}
        }
        duration_sum = duration_sum.saturating_add(event.execution.duration_ms);
    }

    report.success_rate_pct = floored_pct(report.success, report.total_events);
    report.avg_duration_ms = floored_avg(duration_sum, report.total_events);
    report
}

pub fn build_certificate_exposure(executions: &[PdExecution]) -> CertificateExposure {
    let mut exposure = CertificateExposure::default();
    let mut exposed: BTreeSet<&str> = BTreeSet::new();

    for execution in executions {
        match classify_execution(execution).status {
            Some(CertStatus::Valid) => exposure.valid += 1,
            Some(status @ (CertStatus::ExpiringSoon | CertStatus::Expired)) => {
                if status == CertStatus::Expired {
                    exposure.expired += 1;
                } else {
                    exposure.expiring_soon += 1;
                }
                if !execution.partner.is_empty() {
                    exposed.insert(execution.partner.as_str());
                }
            }
            None => exposure.unknown += 1,
        }
    }

    exposure.exposed_partners = exposed.into_iter().map(str::to_string).collect();
    exposure
}

/// Distinct, sorted partners with at least one failed execution.
pub fn failing_partners(executions: &[PdExecution]) -> Vec<String> {
    executions
        .iter()
        .filter(|e| e.outcome == Outcome::Failure && !e.partner.is_empty())
        .map(|e| e.partner.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixmon_types::CertificateSignal;

    fn execution(id: &str, outcome: Outcome, duration_ms: u64, cause: Option<&str>) -> PdExecution {
        PdExecution {
            request_id: id.into(),
            transaction_type: "PD".into(),
            direction: "outbound".into(),
            started_at: String::new(),
            completed_at: None,
            duration_ms,
            outcome,
            retry_count: 0,
            environment: "prod".into(),
            partner: format!("P-{id}"),
            certificate: CertificateSignal {
                root_cause: cause.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn execution_report_for_empty_input_is_zero() {
        let r = build_execution_report(&[]);
        assert_eq!(r.total, 0);
        assert_eq!(r.success_rate_pct, 0);
        assert_eq!(r.avg_latency_ms, 0);
    }

    #[test]
    fn average_latency_rounds_half_up() {
        let execs = vec![
            execution("A", Outcome::Success, 100, None),
            execution("B", Outcome::Success, 101, None),
        ];
        assert_eq!(build_execution_report(&execs).avg_latency_ms, 101);
    }

    #[test]
    fn breakdown_empty_when_no_failures() {
        let mut causes = BTreeMap::new();
        causes.insert("CERT_EXPIRED".to_string(), 3);
        let b = failure_breakdown(0, &causes);
        assert_eq!(b.total_failures, 0);
        assert!(b.categories.is_empty());
    }

    #[test]
    fn breakdown_orders_by_count_then_label() {
        let mut causes = BTreeMap::new();
        causes.insert("TIMEOUT".to_string(), 1);
        causes.insert("CERT_EXPIRED".to_string(), 2);
        causes.insert("AUTH".to_string(), 1);
        let b = failure_breakdown(4, &causes);
        let labels: Vec<&str> = b.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["CERT_EXPIRED", "AUTH", "TIMEOUT"]);
        assert_eq!(b.categories[0].percentage, 50);
        assert_eq!(b.categories[1].percentage, 25);
    }

    #[test]
    fn breakdown_caps_overcounted_causes() {
        let mut causes = BTreeMap::new();
        causes.insert("A".to_string(), 5);
        causes.insert("B".to_string(), 5);
        let b = failure_breakdown(6, &causes);
        let sum: usize = b.categories.iter().map(|c| c.count).sum();
        assert_eq!(sum, 6);
        assert_eq!(b.categories[1].count, 1);
    }

    #[test]
    fn root_causes_ignore_successes_and_blank_labels() {
        let execs = vec![
            execution("A", Outcome::Failure, 1, Some("CERT_EXPIRED")),
            execution("B", Outcome::Success, 1, Some("CERT_EXPIRED")),
            execution("C", Outcome::Failure, 1, Some("  ")),
            execution("D", Outcome::Failure, 1, None),
        ];
        let counts = root_cause_counts(&execs);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["CERT_EXPIRED"], 1);
    }

    #[test]
    fn exposure_counts_each_state_and_exposed_partners() {
        let mut a = execution("A", Outcome::Failure, 1, None);
        a.certificate.status = Some("EXPIRED".into());
        let mut b = execution("B", Outcome::Success, 1, None);
        b.certificate.status = Some("expiring_soon".into());
        let mut c = execution("C", Outcome::Success, 1, None);
        c.certificate.status = Some("VALID".into());
        let d = execution("D", Outcome::Success, 1, None);

        let exposure = build_certificate_exposure(&[a, b, c, d]);
        assert_eq!(exposure.expired, 1);
        assert_eq!(exposure.expiring_soon, 1);
        assert_eq!(exposure.valid, 1);
        assert_eq!(exposure.unknown, 1);
        assert_eq!(exposure.exposed_partners, vec!["P-A", "P-B"]);
    }
}
