//! Organization identifier directory.

use std::collections::BTreeMap;

use ixmon_types::{OidEntry, OidStatus};
use serde::Serialize;

/// Entry counts per normalized status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OidCounts {
    pub active: usize,
    pub inactive: usize,
    pub pending: usize,
    pub unknown: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OidDirectory {
    entries: Vec<OidEntry>,
    by_oid: BTreeMap<String, usize>,
}

impl OidDirectory {
    /// Index entries by OID. The first entry for a repeated OID wins lookups.
    pub fn new(entries: Vec<OidEntry>) -> Self {
        let mut by_oid = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let oid = entry.oid.trim();
            if !oid.is_empty() {
                by_oid.entry(oid.to_string()).or_insert(i);
            }
        }
        Self { entries, by_oid }
    }

    pub fn entries(&self) -> &[OidEntry] {
        &self.entries
    }

    pub fn lookup(&self, oid: &str) -> Option<&OidEntry> {
        self.by_oid.get(oid.trim()).map(|&i| &self.entries[i])
    }

    pub fn status_of(&self, oid: &str) -> OidStatus {
        self.lookup(oid)
            .map(OidEntry::status)
            .unwrap_or(OidStatus::Unknown)
    }

    pub fn counts(&self) -> OidCounts {
        let mut counts = OidCounts {
            total: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry.status() {
                OidStatus::Active => counts.active += 1,
                OidStatus::Inactive => counts.inactive += 1,
                OidStatus::Pending => counts.pending += 1,
                OidStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}
