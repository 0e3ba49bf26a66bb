//! # ixmon-cert
//!
//! **Tier 1 (Classification)**
//!
//! Maps the per-execution certificate signal onto a trust state and derives
//! the fixed presentation strings that go with it.
//!
//! ## What belongs here
//! * Status normalization (`VALID`, `EXPIRING_SOON`, `EXPIRED`, or unknown)
//! * Badge and description tables
//! * Finding-to-certificate correlation and the copy it selects
//!
//! Nothing here fails: unrecognized input is reported as an absent status.

mod badge;
mod classify;
mod copy;

pub use badge::{Badge, BadgeTone, badge, description};
pub use classify::{CertificateHealth, classify, classify_execution, parse_status};
pub use copy::{CertificateCopy, CopyKind, certificate_copy, is_certificate_related};

#[cfg(test)]
mod tests {
    use super::*;
    use ixmon_types::{CertStatus, CertificateSignal};

    #[test]
    fn classify_then_badge_for_lowercase_expired() {
        let signal = CertificateSignal {
            status: Some("expired".into()),
            ..Default::default()
        };
        let health = classify(&signal);
        assert_eq!(health.status, Some(CertStatus::Expired));
        assert_eq!(badge(health.status).label, "EXPIRED");
        assert!(description(health.status).contains("caused TLS failure"));
    }

    #[test]
    fn unknown_status_still_has_badge_and_description() {
        let health = classify(&CertificateSignal::default());
        assert_eq!(health.status, None);
        assert_eq!(badge(None).label, "UNKNOWN");
        assert!(!description(None).is_empty());
    }
}
