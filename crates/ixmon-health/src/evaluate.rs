//! Status resolution and narrative logic.

use ixmon_settings::HealthSettings;

use crate::types::{HealthInput, HealthReport, HealthStatus};

/// Resolve the qualitative status. First match wins:
/// loading, error, no executions, then the two inclusive thresholds.
pub fn resolve_status(input: &HealthInput, thresholds: &HealthSettings) -> HealthStatus {
    if input.loading {
        return HealthStatus::Loading;
    }
    if input.error.is_some() {
        return HealthStatus::Unavailable;
    }
    if input.total_executions == 0 {
        return HealthStatus::NoData;
    }
    if input.success_rate_pct >= thresholds.stable_min_pct {
        return HealthStatus::Stable;
    }
    if input.success_rate_pct >= thresholds.degraded_min_pct {
        return HealthStatus::Degraded;
    }
    HealthStatus::AtRisk
}

/// Action-required sentence, resolved independently of the status.
///
/// Affected partners take precedence over the generic review message
/// whenever at least one is flagged.
pub fn action_narrative(input: &HealthInput, thresholds: &HealthSettings) -> String {
    if input.loading {
        return "Loading integration health data.".to_string();
    }
    if let Some(error) = &input.error {
        return format!("Integration health is unavailable: {error}");
    }
    if input.total_executions == 0 {
        return "No execution activity reported yet.".to_string();
    }
    if input.success_rate_pct >= thresholds.stable_min_pct {
        return "No action required.".to_string();
    }
    match input.affected_partners {
        0 => "Success rate is below target; review recent failures.".to_string(),
        1 => "1 affected partner needs review.".to_string(),
        n => format!("{n} affected partners need review."),
    }
}

/// Resolve status and narrative together.
pub fn evaluate_health(input: &HealthInput, thresholds: &HealthSettings) -> HealthReport {
    let status = resolve_status(input, thresholds);
    HealthReport {
        status,
        label: status.label().to_string(),
        narrative: action_narrative(input, thresholds),
        input: input.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(total: usize, rate: u32, affected: usize) -> HealthInput {
        HealthInput {
            loading: false,
            error: None,
            total_executions: total,
            success_rate_pct: rate,
            affected_partners: affected,
        }
    }

    fn defaults() -> HealthSettings {
        HealthSettings::default()
    }

    #[test]
    fn loading_beats_everything() {
        let mut i = input(10, 100, 0);
        i.loading = true;
        i.error = Some("boom".into());
        assert_eq!(resolve_status(&i, &defaults()), HealthStatus::Loading);
        assert_eq!(action_narrative(&i, &defaults()), "Loading integration health data.");
    }

    #[test]
    fn error_beats_data() {
        let mut i = input(10, 100, 0);
        i.error = Some("timeout".into());
        assert_eq!(resolve_status(&i, &defaults()), HealthStatus::Unavailable);
        assert_eq!(
            action_narrative(&i, &defaults()),
            "Integration health is unavailable: timeout"
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(resolve_status(&input(1, 95, 0), &defaults()), HealthStatus::Stable);
        assert_eq!(resolve_status(&input(1, 94, 0), &defaults()), HealthStatus::Degraded);
        assert_eq!(resolve_status(&input(1, 85, 0), &defaults()), HealthStatus::Degraded);
        assert_eq!(resolve_status(&input(1, 84, 0), &defaults()), HealthStatus::AtRisk);
    }

    #[test]
    fn narrative_pluralizes_affected_partners() {
        assert_eq!(
            action_narrative(&input(10, 50, 1), &defaults()),
            "1 affected partner needs review."
        );
        assert_eq!(
            action_narrative(&input(10, 50, 3), &defaults()),
            "3 affected partners need review."
        );
    }

    #[test]
    fn narrative_generic_without_affected_partners() {
        assert_eq!(
            action_narrative(&input(10, 90, 0), &defaults()),
            "Success rate is below target; review recent failures."
        );
    }

    #[test]
    fn stable_narrative_ignores_affected_partners() {
        assert_eq!(action_narrative(&input(10, 99, 4), &defaults()), "No action required.");
    }

    #[test]
    fn custom_thresholds_shift_bands() {
        let strict = HealthSettings {
            stable_min_pct: 99,
            degraded_min_pct: 97,
        };
        assert_eq!(resolve_status(&input(1, 98, 0), &strict), HealthStatus::Degraded);
        assert_eq!(resolve_status(&input(1, 96, 0), &strict), HealthStatus::AtRisk);
    }
}
