//! Candidate record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier assigned by the store.
pub type CandidateId = u64;

/// A political candidate as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Unique identifier, never reused.
    #[schema(value_type = u64)]
    pub id: CandidateId,
    /// Full name.
    pub name: String,
    /// Portrait URL.
    pub image: String,
    /// Party affiliation.
    pub political_party: String,
    /// Free-form biography.
    pub description: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated, `None` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Check whether `needle` (already lowercased) occurs in the name,
    /// party or description, ignoring case.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.political_party.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Overwrite every field the patch carries.
    fn apply(&mut self, patch: CandidatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(party) = patch.political_party {
            self.political_party = party;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    /// Apply a patch and stamp `updated_at`.
    ///
    /// The stamp is kept strictly after the previous one so repeated updates
    /// within the clock's resolution still order correctly.
    pub(crate) fn update(&mut self, patch: CandidatePatch, now: DateTime<Utc>) {
        self.apply(patch);

        let stamp = match self.updated_at {
            Some(previous) if now <= previous => previous + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.updated_at = Some(stamp);
    }
}

/// Fields required to create a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCandidate {
    pub name: String,
    pub image: String,
    pub political_party: String,
    pub description: String,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CandidatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub political_party: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CandidatePatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.political_party.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Candidate {
        Candidate {
            id: 1,
            name: "Ada Lovelace".to_string(),
            image: "https://example.com/ada.png".to_string(),
            political_party: "Analytical Engine Party".to_string(),
            description: "Writes the first program.".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys_and_null_updated_at() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["politicalParty"], "Analytical Engine Party");
        assert!(json.get("createdAt").is_some());
        assert!(json["updatedAt"].is_null());
        assert!(json.get("political_party").is_none());
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let candidate = sample();

        assert!(candidate.matches("ada"));
        assert!(candidate.matches("engine"));
        assert!(candidate.matches("first program"));
        assert!(candidate.matches(""));
        assert!(!candidate.matches("babbage"));
    }

    #[test]
    fn update_only_touches_provided_fields() {
        let mut candidate = sample();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        candidate.update(
            CandidatePatch {
                name: Some("Augusta Ada King".to_string()),
                ..Default::default()
            },
            now,
        );

        assert_eq!(candidate.name, "Augusta Ada King");
        assert_eq!(candidate.political_party, "Analytical Engine Party");
        assert_eq!(candidate.updated_at, Some(now));
    }

    #[test]
    fn update_stamp_strictly_increases_on_clock_ties() {
        let mut candidate = sample();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        candidate.update(CandidatePatch::default(), now);
        let first = candidate.updated_at.unwrap();
        candidate.update(CandidatePatch::default(), now);
        let second = candidate.updated_at.unwrap();

        assert!(second > first);
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: Result<CandidatePatch, _> = serde_json::from_str(r#"{"nickname":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_treats_null_as_absent() {
        let patch: CandidatePatch = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert!(patch.is_empty());
    }
}
