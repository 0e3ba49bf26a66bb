//! Feed parsing and feed sources.
//!
//! Parsing is the ingestion boundary: legacy execution field names and the
//! legacy telemetry `requestId` are normalized here and nowhere else.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ixmon_settings::FeedSettings;
use ixmon_types::{
    Finding, GovernanceCase, IntegrationHealth, OidEntry, PdExecution, RawExecution,
    RawTelemetryEvent, TelemetryEvent,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// The upstream feeds, plus the two auxiliary files read from the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeedKind {
    Findings,
    Executions,
    Telemetry,
    IntegrationHealth,
    Oids,
    Cases,
}

impl FeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::Findings => "findings",
            FeedKind::Executions => "executions",
            FeedKind::Telemetry => "telemetry",
            FeedKind::IntegrationHealth => "integration-health",
            FeedKind::Oids => "oids",
            FeedKind::Cases => "cases",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {feed} feed at {path}: {source}")]
    Io {
        feed: FeedKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid {feed} feed: {source}")]
    Parse {
        feed: FeedKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected {feed} feed shape: expected {expected}")]
    UnexpectedShape {
        feed: FeedKind,
        expected: &'static str,
    },

    #[error("{feed} feed is unavailable")]
    Unavailable { feed: FeedKind },
}

impl FeedError {
    pub fn feed(&self) -> FeedKind {
        match self {
            FeedError::Io { feed, .. }
            | FeedError::Parse { feed, .. }
            | FeedError::UnexpectedShape { feed, .. }
            | FeedError::Unavailable { feed } => *feed,
        }
    }
}

fn parse<T: DeserializeOwned>(feed: FeedKind, text: &str) -> Result<T, FeedError> {
    serde_json::from_str(text).map_err(|source| FeedError::Parse { feed, source })
}

pub fn parse_findings(text: &str) -> Result<Vec<Finding>, FeedError> {
    parse(FeedKind::Findings, text)
}

/// Parse executions, collapsing both certificate field-name generations.
pub fn parse_executions(text: &str) -> Result<Vec<PdExecution>, FeedError> {
    let raw: Vec<RawExecution> = parse(FeedKind::Executions, text)?;
    Ok(raw.into_iter().map(RawExecution::normalize).collect())
}

/// Parse telemetry from either a bare array or `{ "events": [...] }`.
pub fn parse_telemetry(text: &str) -> Result<Vec<TelemetryEvent>, FeedError> {
    const EXPECTED: &str = "an array of events or an object with an `events` array";
    let feed = FeedKind::Telemetry;

    let value: Value = parse(feed, text)?;
    let events = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("events") {
            Some(events @ Value::Array(_)) => events,
            _ => {
                return Err(FeedError::UnexpectedShape {
                    feed,
                    expected: EXPECTED,
                });
            }
        },
        _ => {
            return Err(FeedError::UnexpectedShape {
                feed,
                expected: EXPECTED,
            });
        }
    };

    let raw: Vec<RawTelemetryEvent> =
        serde_json::from_value(events).map_err(|source| FeedError::Parse { feed, source })?;
    Ok(raw.into_iter().map(RawTelemetryEvent::normalize).collect())
}

pub fn parse_integration_health(text: &str) -> Result<IntegrationHealth, FeedError> {
    parse(FeedKind::IntegrationHealth, text)
}

pub fn parse_oids(text: &str) -> Result<Vec<OidEntry>, FeedError> {
    parse(FeedKind::Oids, text)
}

pub fn parse_cases(text: &str) -> Result<Vec<GovernanceCase>, FeedError> {
    parse(FeedKind::Cases, text)
}

/// Where the four upstream feeds come from. Each is fetched independently.
pub trait FeedSource {
    fn findings(&self) -> Result<Vec<Finding>, FeedError>;
    fn executions(&self) -> Result<Vec<PdExecution>, FeedError>;
    fn telemetry(&self) -> Result<Vec<TelemetryEvent>, FeedError>;
    fn integration_health(&self) -> Result<IntegrationHealth, FeedError>;
}

/// JSON files in one directory, named per [`FeedSettings`].
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    names: FeedSettings,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            names: FeedSettings::default(),
        }
    }

    pub fn from_settings(settings: &FeedSettings) -> Self {
        Self {
            dir: settings.dir(),
            names: settings.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, feed: FeedKind) -> PathBuf {
        let name = match feed {
            FeedKind::Findings => &self.names.findings,
            FeedKind::Executions => &self.names.executions,
            FeedKind::Telemetry => &self.names.telemetry,
            FeedKind::IntegrationHealth => &self.names.integration_health,
            FeedKind::Oids => &self.names.oids,
            FeedKind::Cases => &self.names.cases,
        };
        self.dir.join(name)
    }

    fn read(&self, feed: FeedKind) -> Result<String, FeedError> {
        let path = self.path_for(feed);
        fs::read_to_string(&path).map_err(|source| FeedError::Io { feed, path, source })
    }

    /// Organization directory entries from the OID file.
    pub fn oids(&self) -> Result<Vec<OidEntry>, FeedError> {
        parse_oids(&self.read(FeedKind::Oids)?)
    }

    /// Governance cases used to seed the knowledge base. A missing file
    /// means no cases.
    pub fn cases(&self) -> Result<Vec<GovernanceCase>, FeedError> {
        match self.read(FeedKind::Cases) {
            Ok(text) => parse_cases(&text),
            Err(FeedError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl FeedSource for DirectorySource {
    fn findings(&self) -> Result<Vec<Finding>, FeedError> {
        parse_findings(&self.read(FeedKind::Findings)?)
    }

    fn executions(&self) -> Result<Vec<PdExecution>, FeedError> {
        parse_executions(&self.read(FeedKind::Executions)?)
    }

    fn telemetry(&self) -> Result<Vec<TelemetryEvent>, FeedError> {
        parse_telemetry(&self.read(FeedKind::Telemetry)?)
    }

    fn integration_health(&self) -> Result<IntegrationHealth, FeedError> {
        parse_integration_health(&self.read(FeedKind::IntegrationHealth)?)
    }
}

/// In-memory feeds. A feed left as `None` fails with
/// [`FeedError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub findings: Option<Vec<Finding>>,
    pub executions: Option<Vec<PdExecution>>,
    pub telemetry: Option<Vec<TelemetryEvent>>,
    pub integration_health: Option<IntegrationHealth>,
}

impl StaticSource {
    /// All four feeds present and empty.
    pub fn empty() -> Self {
        Self {
            findings: Some(Vec::new()),
            executions: Some(Vec::new()),
            telemetry: Some(Vec::new()),
            integration_health: Some(IntegrationHealth::default()),
        }
    }
}

fn served<T: Clone>(feed: FeedKind, data: &Option<T>) -> Result<T, FeedError> {
    data.clone().ok_or(FeedError::Unavailable { feed })
}

impl FeedSource for StaticSource {
    fn findings(&self) -> Result<Vec<Finding>, FeedError> {
        served(FeedKind::Findings, &self.findings)
    }

    fn executions(&self) -> Result<Vec<PdExecution>, FeedError> {
        served(FeedKind::Executions, &self.executions)
    }

    fn telemetry(&self) -> Result<Vec<TelemetryEvent>, FeedError> {
        served(FeedKind::Telemetry, &self.telemetry)
    }

    fn integration_health(&self) -> Result<IntegrationHealth, FeedError> {
        served(FeedKind::IntegrationHealth, &self.integration_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixmon_types::{Outcome, TelemetryStatus};

    #[test]
    fn executions_accept_both_naming_generations() {
        let text = r#"[
            {"requestId":"E1","outcome":"failure","certStatus":"expired","certRootCause":"CERT_EXPIRED"},
            {"requestId":"E2","outcome":"success","certificateStatus":"VALID","rootCause":"n/a",
             "certificateThumbprint":"AB:CD"}
        ]"#;
        let execs = parse_executions(text).unwrap();
        assert_eq!(execs[0].outcome, Outcome::Failure);
        assert_eq!(execs[0].certificate.status.as_deref(), Some("expired"));
        assert_eq!(execs[0].certificate.root_cause.as_deref(), Some("CERT_EXPIRED"));
        assert_eq!(execs[1].certificate.status.as_deref(), Some("VALID"));
        assert_eq!(execs[1].certificate.thumbprint.as_deref(), Some("AB:CD"));
    }

    #[test]
    fn current_name_wins_over_legacy() {
        let text = r#"[{"requestId":"E1","outcome":"success","certStatus":"VALID","certificateStatus":"EXPIRED"}]"#;
        let execs = parse_executions(text).unwrap();
        assert_eq!(execs[0].certificate.status.as_deref(), Some("VALID"));
    }

    const EVENT: &str = r#"{"eventId":"T1","requestId":"E1","outcome":{"status":"SUCCESS","resultCount":1}}"#;

    #[test]
    fn telemetry_bare_array() {
        let events = parse_telemetry(&format!("[{EVENT}]")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].request_id(), Some("E1"));
        assert_eq!(events[0].outcome.status, TelemetryStatus::Success);
    }

    #[test]
    fn telemetry_wrapped_in_events() {
        let events = parse_telemetry(&format!(r#"{{"events":[{EVENT}],"cursor":null}}"#)).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn telemetry_other_shapes_fail_explicitly() {
        for text in [r#"{"items":[]}"#, r#"{"events":{}}"#, "42", r#""events""#] {
            let err = parse_telemetry(text).unwrap_err();
            assert!(
                matches!(err, FeedError::UnexpectedShape { feed: FeedKind::Telemetry, .. }),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_findings("[{").unwrap_err();
        assert_eq!(err.feed(), FeedKind::Findings);
        assert!(matches!(err, FeedError::Parse { .. }));
    }

    #[test]
    fn static_source_missing_feed_is_unavailable() {
        let source = StaticSource {
            findings: Some(Vec::new()),
            ..Default::default()
        };
        assert!(source.findings().unwrap().is_empty());
        assert!(matches!(
            source.executions(),
            Err(FeedError::Unavailable { feed: FeedKind::Executions })
        ));
    }

    #[test]
    fn directory_source_uses_configured_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("events.json"), format!("[{EVENT}]")).unwrap();
        let settings = FeedSettings {
            dir: Some(dir.path().to_path_buf()),
            telemetry: "events.json".into(),
            ..Default::default()
        };
        let source = DirectorySource::from_settings(&settings);
        assert_eq!(source.telemetry().unwrap().len(), 1);
        assert!(matches!(source.findings(), Err(FeedError::Io { .. })));
        assert!(source.cases().unwrap().is_empty());
    }
}
