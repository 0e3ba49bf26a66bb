//! # ixmon-core
//!
//! **Tier 3 (Orchestration)**
//!
//! The primary library interface for `ixmon`. It loads the upstream feeds
//! into one immutable snapshot and serves every view (summary, drill-down,
//! OID directory) from that snapshot.
//!
//! If you are embedding `ixmon` into another Rust application, depend on
//! this crate and `ixmon-types`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ixmon_core::{DirectorySource, Session};
//! use ixmon_settings::HealthSettings;
//!
//! let mut session = Session::new(DirectorySource::new("./feeds"), HealthSettings::default());
//! session.refresh();
//! let summary = session.summary();
//! println!("{}: {}", summary.health.label, summary.health.narrative);
//! ```

pub mod feed;
pub mod oid;
pub mod session;

pub use ixmon_settings as settings;
pub use ixmon_types as types;

pub use feed::{
    DirectorySource, FeedError, FeedKind, FeedSource, StaticSource, parse_cases,
    parse_executions, parse_findings, parse_integration_health, parse_oids, parse_telemetry,
};
pub use oid::{OidCounts, OidDirectory};
pub use session::{
    DrillDown, ExecutionRow, FeedSnapshot, FeedStatus, FeedStatuses, FindingDetail, Session,
    Summary,
};
