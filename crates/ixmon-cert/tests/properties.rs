//! Property-based tests for certificate classification.

use ixmon_cert::{badge, description, parse_status};
use ixmon_types::CertStatus;
use proptest::prelude::*;

/// Re-case a token by a bitmask so every casing is reachable.
fn recase(token: &str, mask: u64) -> String {
    token
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 64)) != 0 {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

fn arb_status() -> impl Strategy<Value = CertStatus> {
    prop_oneof![
        Just(CertStatus::Valid),
        Just(CertStatus::ExpiringSoon),
        Just(CertStatus::Expired),
    ]
}

proptest! {
    /// Every casing of a known token classifies to its canonical state.
    #[test]
    fn known_tokens_in_any_casing_classify(status in arb_status(), mask in any::<u64>()) {
        let raw = recase(status.as_str(), mask);
        prop_assert_eq!(parse_status(&raw), Some(status));
    }

    /// Anything that is not a known token in some casing is unknown.
    #[test]
    fn other_strings_are_unknown(raw in ".{0,20}") {
        let upper = raw.to_ascii_uppercase();
        prop_assume!(upper != "VALID" && upper != "EXPIRING_SOON" && upper != "EXPIRED");
        prop_assert_eq!(parse_status(&raw), None);
    }

    /// The presentation mapping is total.
    #[test]
    fn badge_and_description_exist_for_every_output(raw in ".{0,20}") {
        let status = parse_status(&raw);
        prop_assert!(!badge(status).label.is_empty());
        prop_assert!(!description(status).is_empty());
    }
}
