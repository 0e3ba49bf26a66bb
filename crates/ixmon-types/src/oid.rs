//! Organization identifier (OID) directory entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OidStatus {
    Active,
    Inactive,
    Pending,
    Unknown,
}

impl OidStatus {
    /// Map a raw directory status onto the enum. Anything unrecognized,
    /// including an absent value, is `Unknown`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return OidStatus::Unknown;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => OidStatus::Active,
            "inactive" => OidStatus::Inactive,
            "pending" => OidStatus::Pending,
            _ => OidStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OidStatus::Active => "active",
            OidStatus::Inactive => "inactive",
            OidStatus::Pending => "pending",
            OidStatus::Unknown => "unknown",
        }
    }
}

/// One directory row as the feed delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidEntry {
    pub oid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl OidEntry {
    pub fn status(&self) -> OidStatus {
        OidStatus::normalize(self.status.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(OidStatus::normalize(Some("ACTIVE")), OidStatus::Active);
        assert_eq!(OidStatus::normalize(Some(" Pending ")), OidStatus::Pending);
    }

    #[test]
    fn normalize_unrecognized_is_unknown() {
        assert_eq!(OidStatus::normalize(None), OidStatus::Unknown);
        assert_eq!(OidStatus::normalize(Some("")), OidStatus::Unknown);
        assert_eq!(OidStatus::normalize(Some("retired")), OidStatus::Unknown);
    }
}
