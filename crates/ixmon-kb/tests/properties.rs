//! Property-based tests for upsert uniqueness.

use ixmon_kb::{KnowledgeBase, MemoryKv};
use ixmon_types::{CaseStatus, GovernanceCase, KbStatus, Severity};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_status() -> impl Strategy<Value = KbStatus> {
    prop_oneof![
        Just(KbStatus::Queued),
        Just(KbStatus::Draft),
        Just(KbStatus::Published),
    ]
}

fn arb_case() -> impl Strategy<Value = GovernanceCase> {
    ("C-[0-4]", proptest::option::of("[A-Za-z ]{0,12}")).prop_map(|(id, decision)| {
        GovernanceCase {
            id,
            issue_type: "Certificate Expiry".into(),
            organization: "Acme".into(),
            severity: Severity::Critical,
            status: CaseStatus::Open,
            selected_decision: decision,
            resolution_summary: None,
        }
    })
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn case_ids_stay_unique(ops in proptest::collection::vec((arb_case(), arb_status()), 1..20)) {
        let mut kb = KnowledgeBase::new(MemoryKv::new(), "k", Vec::new());
        for (case, status) in &ops {
            kb.upsert(case, None, *status).unwrap();
        }
        let articles = kb.list().unwrap();
        let mut case_ids: Vec<&str> = articles.iter().map(|a| a.case_id.as_str()).collect();
        let before = case_ids.len();
        case_ids.sort_unstable();
        case_ids.dedup();
        prop_assert_eq!(before, case_ids.len());
    }

    #[test]
    fn ids_derive_from_first_upsert(ops in proptest::collection::vec(arb_case(), 1..10)) {
        let mut kb = KnowledgeBase::new(MemoryKv::new(), "k", Vec::new());
        for case in &ops {
            let article = kb.upsert(case, None, KbStatus::Queued).unwrap();
            prop_assert_eq!(article.id, format!("KB-{}", case.id));
            prop_assert!(!article.decision.is_empty());
        }
    }
}
