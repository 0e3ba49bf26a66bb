//! # ixmon-kb
//!
//! **Tier 2 (Persistence)**
//!
//! Knowledge-base articles recorded from governance decisions. The whole
//! collection lives under one key of a [`KvStore`] and is always read and
//! written as a unit.
//!
//! ## What belongs here
//! * The key-value surface and its memory/file implementations
//! * Load-or-seed with an explicit outcome
//! * Create-or-update keyed by case id
//!
//! ## What does NOT belong here
//! * Feed loading (see `ixmon-core`)
//! * Choosing where the store lives (see the `ixmon` binary)

mod article;
mod seed;
mod store;

use ixmon_types::{GovernanceCase, KbArticle, KbStatus};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use article::build_article;
pub use article::{PENDING_DECISION, PENDING_RESOLUTION, article_id, resolve_decision};
pub use seed::{REFERENCE_CASE_ID, seed_articles};
pub use store::{FileKv, KvError, KvStore, MemoryKv};

#[derive(Debug, Error)]
pub enum KbError {
    #[error(transparent)]
    Store(#[from] KvError),

    #[error("failed to encode knowledge base: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why the stored collection was replaced by the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    Missing,
    Corrupt,
    Empty,
}

/// Result of reading the stored collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<KbArticle>),
    Seeded {
        reason: SeedReason,
        articles: Vec<KbArticle>,
    },
}

impl LoadOutcome {
    pub fn articles(&self) -> &[KbArticle] {
        match self {
            LoadOutcome::Loaded(articles) | LoadOutcome::Seeded { articles, .. } => articles,
        }
    }

    pub fn into_articles(self) -> Vec<KbArticle> {
        match self {
            LoadOutcome::Loaded(articles) | LoadOutcome::Seeded { articles, .. } => articles,
        }
    }

    pub fn seed_reason(&self) -> Option<SeedReason> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Seeded { reason, .. } => Some(*reason),
        }
    }
}

/// Article collection over an injected key-value store.
#[derive(Debug)]
pub struct KnowledgeBase<S: KvStore> {
    store: S,
    key: String,
    seed_cases: Vec<GovernanceCase>,
}

impl<S: KvStore> KnowledgeBase<S> {
    pub fn new(store: S, key: impl Into<String>, seed_cases: Vec<GovernanceCase>) -> Self {
        Self {
            store,
            key: key.into(),
            seed_cases,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the stored collection, replacing it with the seed when it is
    /// missing, unparseable or empty. The seed is persisted before returning.
    pub fn load_or_seed(&mut self) -> Result<LoadOutcome, KbError> {
        self.load_or_seed_at(OffsetDateTime::now_utc())
    }

    pub fn load_or_seed_at(&mut self, now: OffsetDateTime) -> Result<LoadOutcome, KbError> {
        let reason = match self.store.get(&self.key) {
            Ok(None) => SeedReason::Missing,
            Err(e) if e.is_corrupt() => {
                warn!(key = %self.key, error = %e, "stored knowledge base is unreadable");
                SeedReason::Corrupt
            }
            Err(e) => return Err(e.into()),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<KbArticle>>(&raw) {
                Ok(articles) if !articles.is_empty() => {
                    debug!(key = %self.key, count = articles.len(), "loaded knowledge base");
                    return Ok(LoadOutcome::Loaded(articles));
                }
                Ok(_) => SeedReason::Empty,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "stored knowledge base is corrupt");
                    SeedReason::Corrupt
                }
            },
        };

        let articles = seed_articles(&self.seed_cases, now);
        self.persist(&articles)?;
        warn!(key = %self.key, ?reason, count = articles.len(), "knowledge base reseeded");
        Ok(LoadOutcome::Seeded { reason, articles })
    }

    /// Current collection (seeding first if needed).
    pub fn list(&mut self) -> Result<Vec<KbArticle>, KbError> {
        Ok(self.load_or_seed()?.into_articles())
    }

    /// Create or update the article for `case`, stamped with the current time.
    pub fn upsert(
        &mut self,
        case: &GovernanceCase,
        decision: Option<&str>,
        status: KbStatus,
    ) -> Result<KbArticle, KbError> {
        self.upsert_at(case, decision, status, OffsetDateTime::now_utc())
    }

    /// Create or update the article for `case`.
    ///
    /// An existing article is found by `caseId` and keeps its `id`; every
    /// other field is rebuilt. `updatedAt` never moves backwards.
    pub fn upsert_at(
        &mut self,
        case: &GovernanceCase,
        decision: Option<&str>,
        status: KbStatus,
        now: OffsetDateTime,
    ) -> Result<KbArticle, KbError> {
        let mut articles = self.load_or_seed_at(now)?.into_articles();

        let article = match articles.iter_mut().find(|a| a.case_id == case.id) {
            Some(existing) => {
                let stamp = now.max(existing.updated_at);
                let updated =
                    build_article(existing.id.clone(), case, decision, status, stamp);
                *existing = updated.clone();
                updated
            }
            None => {
                let created = build_article(article_id(case), case, decision, status, now);
                articles.push(created.clone());
                created
            }
        };

        self.persist(&articles)?;
        info!(
            case_id = %article.case_id,
            id = %article.id,
            status = article.status.as_str(),
            "knowledge base article upserted"
        );
        Ok(article)
    }

    fn persist(&mut self, articles: &[KbArticle]) -> Result<(), KbError> {
        let encoded = serde_json::to_string_pretty(articles)?;
        self.store.set(&self.key, &encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixmon_types::{CaseStatus, Severity};
    use time::Duration;

    const KEY: &str = "ixmon.kb.articles";

    fn case(id: &str, status: CaseStatus) -> GovernanceCase {
        GovernanceCase {
            id: id.into(),
            issue_type: "Certificate Expiry".into(),
            organization: "North HIE".into(),
            severity: Severity::Critical,
            status,
            selected_decision: None,
            resolution_summary: None,
        }
    }

    fn kb(store: MemoryKv) -> KnowledgeBase<MemoryKv> {
        KnowledgeBase::new(store, KEY, vec![case("C-1", CaseStatus::Resolved)])
    }

    #[test]
    fn missing_value_seeds_and_persists() {
        let mut kb = kb(MemoryKv::new());
        let outcome = kb.load_or_seed().unwrap();
        assert_eq!(outcome.seed_reason(), Some(SeedReason::Missing));
        assert_eq!(outcome.articles().len(), 2);
        assert!(kb.store().get(KEY).unwrap().is_some());

        let again = kb.load_or_seed().unwrap();
        assert_eq!(again.seed_reason(), None);
        assert_eq!(again.articles(), outcome.articles());
    }

    #[test]
    fn corrupt_value_seeds() {
        let mut kb = kb(MemoryKv::with_entry(KEY, "{not json"));
        assert_eq!(
            kb.load_or_seed().unwrap().seed_reason(),
            Some(SeedReason::Corrupt)
        );
    }

    #[test]
    fn empty_collection_seeds() {
        let mut kb = kb(MemoryKv::with_entry(KEY, "[]"));
        assert_eq!(kb.load_or_seed().unwrap().seed_reason(), Some(SeedReason::Empty));
    }

    #[test]
    fn seed_contains_resolved_cases_only() {
        let now = OffsetDateTime::now_utc();
        let cases = vec![case("C-1", CaseStatus::Resolved), case("C-2", CaseStatus::Open)];
        let seeded = seed_articles(&cases, now);
        let ids: Vec<&str> = seeded.iter().map(|a| a.case_id.as_str()).collect();
        assert_eq!(ids, vec!["C-1", REFERENCE_CASE_ID]);
        assert!(seeded.iter().all(|a| a.status == KbStatus::Published));
    }

    #[test]
    fn new_article_fields() {
        let mut kb = kb(MemoryKv::new());
        let article = kb
            .upsert(&case("C-9", CaseStatus::Open), None, KbStatus::Queued)
            .unwrap();
        assert_eq!(article.id, "KB-C-9");
        assert_eq!(article.title, "Certificate Expiry at North HIE");
        assert_eq!(article.decision, PENDING_DECISION);
        assert_eq!(article.tags, vec!["Certificate Expiry", "critical"]);
    }

    #[test]
    fn decision_falls_back_to_case_selection() {
        let mut c = case("C-9", CaseStatus::Open);
        c.selected_decision = Some("Escalate to partner".into());
        assert_eq!(resolve_decision(None, &c), "Escalate to partner");
        assert_eq!(resolve_decision(Some("  "), &c), "Escalate to partner");
        assert_eq!(resolve_decision(Some("Waive"), &c), "Waive");
    }

    #[test]
    fn update_keeps_id_and_never_moves_time_backwards() {
        let mut kb = kb(MemoryKv::new());
        let t0 = OffsetDateTime::now_utc();
        let c = case("C-9", CaseStatus::Open);

        let first = kb.upsert_at(&c, Some("Waive"), KbStatus::Draft, t0).unwrap();
        let second = kb
            .upsert_at(&c, Some("Escalate"), KbStatus::Published, t0 - Duration::minutes(5))
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.decision, "Escalate");
        assert_eq!(second.status, KbStatus::Published);
        assert!(second.updated_at >= first.updated_at);

        let all = kb.list().unwrap();
        assert_eq!(all.iter().filter(|a| a.case_id == "C-9").count(), 1);
    }

    #[test]
    fn update_preserves_legacy_id() {
        let stored = r#"[{"id":"legacy-7","caseId":"C-7","title":"t","organization":"o",
            "decision":"d","resolutionSummary":"r","updatedAt":"2024-01-01T00:00:00Z",
            "status":"queued","tags":[]}]"#;
        let mut kb = kb(MemoryKv::with_entry(KEY, stored));
        let updated = kb
            .upsert(&case("C-7", CaseStatus::InReview), None, KbStatus::Draft)
            .unwrap();
        assert_eq!(updated.id, "legacy-7");
        assert_eq!(kb.list().unwrap().len(), 1);
    }
}
