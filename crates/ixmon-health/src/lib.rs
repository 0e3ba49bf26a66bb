//! # ixmon-health
//!
//! **Tier 2 (Status Resolution)**
//!
//! Turns execution metrics into the small ordinal status shown on summary
//! views, plus a one-line "what to do next" narrative.
//!
//! ## What belongs here
//! * Status and input types
//! * Fixed-precedence resolution against configurable thresholds
//! * Narrative wording
//!
//! ## Example
//! ```
//! use ixmon_health::{HealthInput, HealthStatus, evaluate_health};
//! use ixmon_settings::HealthSettings;
//!
//! let input = HealthInput { total_executions: 10, success_rate_pct: 90, ..Default::default() };
//! let report = evaluate_health(&input, &HealthSettings::default());
//! assert_eq!(report.status, HealthStatus::Degraded);
//! ```

mod evaluate;
mod types;

pub use evaluate::{action_narrative, evaluate_health, resolve_status};
pub use types::{HealthInput, HealthReport, HealthStatus};
