//! # ixmon-correlate
//!
//! **Tier 1 (Correlation)**
//!
//! Joins the three upstream streams on their shared correlation key (the PD
//! request id). Each input collection is walked exactly once when the index
//! is built; lookups afterwards are map reads.
//!
//! Records without a key (or with an empty one) stay out of the index. They
//! are still counted as uncorrelated so callers can report them.

use std::collections::{BTreeMap, BTreeSet};

use ixmon_types::{Finding, PdExecution, TelemetryEvent};

/// Everything the three streams know about one request id.
#[derive(Debug, Clone, Copy)]
pub struct Correlated<'a> {
    pub request_id: &'a str,
    pub execution: Option<&'a PdExecution>,
    pub findings: &'a [&'a Finding],
    pub telemetry: &'a [&'a TelemetryEvent],
}

#[derive(Debug, Clone, Default)]
pub struct CorrelationIndex<'a> {
    executions: BTreeMap<&'a str, &'a PdExecution>,
    findings: BTreeMap<&'a str, Vec<&'a Finding>>,
    telemetry: BTreeMap<&'a str, Vec<&'a TelemetryEvent>>,
    uncorrelated_findings: usize,
    uncorrelated_telemetry: usize,
    duplicate_executions: usize,
}

fn key(raw: Option<&str>) -> Option<&str> {
    raw.filter(|k| !k.is_empty())
}

impl<'a> CorrelationIndex<'a> {
    /// Build the index in one pass per stream.
    ///
    /// When two executions share a request id the first one is kept.
    pub fn build(
        findings: &'a [Finding],
        executions: &'a [PdExecution],
        telemetry: &'a [TelemetryEvent],
    ) -> Self {
        let mut index = Self::default();

        for execution in executions {
            let Some(id) = key(Some(execution.request_id.as_str())) else {
                continue;
            };
            if index.executions.contains_key(id) {
                index.duplicate_executions += 1;
            } else {
                index.executions.insert(id, execution);
            }
        }

        for finding in findings {
            match key(finding.execution_id.as_deref()) {
                Some(id) => index.findings.entry(id).or_default().push(finding),
                None => index.uncorrelated_findings += 1,
            }
        }

        for event in telemetry {
            match key(event.request_id()) {
                Some(id) => index.telemetry.entry(id).or_default().push(event),
                None => index.uncorrelated_telemetry += 1,
            }
        }

        index
    }

    pub fn execution(&self, request_id: &str) -> Option<&'a PdExecution> {
        self.executions.get(request_id).copied()
    }

    /// All findings whose `executionId` equals `request_id`, in feed order.
    pub fn findings_for(&self, request_id: &str) -> &[&'a Finding] {
        self.findings
            .get(request_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All telemetry events whose correlation request id equals `request_id`.
    pub fn telemetry_for(&self, request_id: &str) -> &[&'a TelemetryEvent] {
        self.telemetry
            .get(request_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn finding_count(&self, request_id: &str) -> usize {
        self.findings_for(request_id).len()
    }

    /// Finding count per execution id. Keys with no findings are absent.
    pub fn finding_counts(&self) -> BTreeMap<String, usize> {
        self.findings
            .iter()
            .map(|(id, rows)| ((*id).to_string(), rows.len()))
            .collect()
    }

    pub fn drill_down<'s>(&'s self, request_id: &'s str) -> Correlated<'s>
    where
        'a: 's,
    {
        Correlated {
            request_id,
            execution: self.execution(request_id),
            findings: self.findings_for(request_id),
            telemetry: self.telemetry_for(request_id),
        }
    }

    /// Every key seen in any stream.
    pub fn keys(&self) -> BTreeSet<&'a str> {
        self.executions
            .keys()
            .chain(self.findings.keys())
            .chain(self.telemetry.keys())
            .copied()
            .collect()
    }

    /// Finding keys that match no known execution.
    pub fn orphan_finding_keys(&self) -> Vec<&'a str> {
        self.findings
            .keys()
            .filter(|id| !self.executions.contains_key(*id))
            .copied()
            .collect()
    }

    pub fn uncorrelated_findings(&self) -> usize {
        self.uncorrelated_findings
    }

    pub fn uncorrelated_telemetry(&self) -> usize {
        self.uncorrelated_telemetry
    }

    pub fn duplicate_executions(&self) -> usize {
        self.duplicate_executions
    }
}

/// Count findings per execution id in one pass, without building a full index.
pub fn count_findings_by_execution(findings: &[Finding]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for finding in findings {
        if let Some(id) = key(finding.execution_id.as_deref()) {
            *counts.entry(id.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
