//! Plain-text rendering. JSON output goes straight through serde.

use anyhow::Result;
use ixmon_core::{DrillDown, OidCounts, OidDirectory, Summary};
use ixmon_types::{KbArticle, OidEntry};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::cli::OutputFormat;

pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn summary_text(summary: &Summary) -> String {
    let m = &summary.metrics;
    let mut lines = vec![
        format!("Health: {}", summary.health.label),
        summary.health.narrative.clone(),
        String::new(),
        format!(
            "Executions: {} total, {} success, {} failure, {} partial ({}% success, avg {} ms)",
            m.executions.total,
            m.executions.success,
            m.executions.failure,
            m.executions.partial,
            m.executions.success_rate_pct,
            m.executions.avg_latency_ms
        ),
        format!(
            "Findings: {} total, {} warning, {} critical; {}% compliant",
            m.severity.total, m.severity.warning, m.severity.critical, m.compliance.rate_pct
        ),
        format!(
            "Telemetry: {} events, {} success, {} errors ({}% success, avg {} ms)",
            m.telemetry.total_events,
            m.telemetry.success,
            m.telemetry.errors,
            m.telemetry.success_rate_pct,
            m.telemetry.avg_duration_ms
        ),
        format!(
            "Certificates: {} valid, {} expiring soon, {} expired, {} unknown",
            m.certificates.valid,
            m.certificates.expiring_soon,
            m.certificates.expired,
            m.certificates.unknown
        ),
    ];
    if !m.certificates.exposed_partners.is_empty() {
        lines.push(format!(
            "Exposed partners: {}",
            m.certificates.exposed_partners.join(", ")
        ));
    }

    if !m.failures.categories.is_empty() {
        lines.push(String::new());
        lines.push(format!("Failure breakdown ({} failures):", m.failures.total_failures));
        for c in &m.failures.categories {
            lines.push(format!("  {:<24} {:>5} ({}%)", c.label, c.count, c.percentage));
        }
    }

    if !summary.executions.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "  {:<20} {:<16} {:<8} {:<14} {:>8}",
            "REQUEST", "PARTNER", "OUTCOME", "CERTIFICATE", "FINDINGS"
        ));
        for row in &summary.executions {
            lines.push(format!(
                "  {:<20} {:<16} {:<8} {:<14} {:>8}",
                row.execution.request_id,
                row.execution.partner,
                row.execution.outcome.as_str(),
                row.badge.label,
                row.finding_count
            ));
        }
    }

    if let Some(feeds) = &summary.feeds {
        let failures = feeds.failures();
        if !failures.is_empty() {
            lines.push(String::new());
            lines.push("Feed warnings:".to_string());
            for (feed, message) in failures {
                lines.push(format!("  {feed}: {message}"));
            }
        }
    }

    finish(lines)
}

pub(crate) fn drill_text(view: &DrillDown) -> String {
    let mut lines = vec![format!("Request {}", view.request_id)];

    match &view.execution {
        Some(row) => {
            let e = &row.execution;
            lines.push(format!(
                "  {} {} via {} ({}), {} ms, {} retries",
                e.transaction_type,
                e.outcome.as_str(),
                e.partner,
                e.environment,
                e.duration_ms,
                e.retry_count
            ));
            lines.push(format!("  Certificate: {}", row.badge.label));
            lines.push(format!("  {}", row.description));
            if let Some(thumbprint) = &row.certificate.thumbprint {
                lines.push(format!("  Thumbprint: {thumbprint}"));
            }
            if let Some(cause) = &row.certificate.root_cause {
                lines.push(format!("  Root cause: {cause}"));
            }
        }
        None => lines.push("  No execution recorded for this request.".to_string()),
    }

    lines.push(String::new());
    lines.push(format!("Findings ({}):", view.findings.len()));
    for detail in &view.findings {
        let f = &detail.finding;
        lines.push(format!("  [{}] {} {}", f.severity.as_str(), f.id, f.summary));
        if let Some(copy) = &detail.certificate {
            lines.push(format!("    {}", copy.summary));
            lines.push(format!("    Action: {}", copy.action));
        }
    }

    lines.push(String::new());
    lines.push(format!("Telemetry ({}):", view.telemetry.len()));
    for event in &view.telemetry {
        lines.push(format!(
            "  {} {} {:?} {} ms",
            event.event_id, event.event_type, event.outcome.status, event.execution.duration_ms
        ));
    }

    finish(lines)
}

fn timestamp(article: &KbArticle) -> String {
    article
        .updated_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| article.updated_at.to_string())
}

pub(crate) fn article_text(article: &KbArticle) -> String {
    finish(vec![
        format!("{} [{}] {}", article.id, article.status.as_str(), article.title),
        format!("  Case: {} ({})", article.case_id, article.organization),
        format!("  Decision: {}", article.decision),
        format!("  Resolution: {}", article.resolution_summary),
        format!("  Updated: {}", timestamp(article)),
        format!("  Tags: {}", article.tags.join(", ")),
    ])
}

pub(crate) fn articles_text(articles: &[KbArticle]) -> String {
    let mut lines = vec![format!("{} article(s)", articles.len())];
    for a in articles {
        lines.push(format!(
            "  {:<24} {:<10} {:<22} {}",
            a.id,
            a.status.as_str(),
            timestamp(a),
            a.title
        ));
    }
    finish(lines)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OidListing<'a> {
    pub counts: OidCounts,
    pub entries: Vec<OidRow<'a>>,
}

#[derive(Serialize)]
pub(crate) struct OidRow<'a> {
    pub oid: &'a str,
    pub name: &'a str,
    pub status: &'static str,
}

impl<'a> OidRow<'a> {
    pub(crate) fn new(entry: &'a OidEntry) -> Self {
        Self {
            oid: &entry.oid,
            name: &entry.name,
            status: entry.status().as_str(),
        }
    }
}

pub(crate) fn oid_listing(directory: &OidDirectory) -> OidListing<'_> {
    OidListing {
        counts: directory.counts(),
        entries: directory.entries().iter().map(OidRow::new).collect(),
    }
}

pub(crate) fn oid_text(listing: &OidListing<'_>) -> String {
    let c = &listing.counts;
    let mut lines = vec![format!(
        "{} organizations: {} active, {} inactive, {} pending, {} unknown",
        c.total, c.active, c.inactive, c.pending, c.unknown
    )];
    for row in &listing.entries {
        lines.push(format!("  {:<32} {:<9} {}", row.oid, row.status, row.name));
    }
    finish(lines)
}
