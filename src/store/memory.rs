//! In-memory candidate collection.

use std::collections::BTreeMap;

use chrono::Utc;

use super::seed::sample_candidates;
use super::types::{Candidate, CandidateId, CandidatePatch, NewCandidate};

/// Ordered, in-memory collection of candidates.
///
/// Records keep their insertion order. Every operation is a linear scan,
/// which is fine for the few thousand records this is meant to hold.
/// Callers sharing a store across tasks must serialize mutations.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
    /// Highest id ever handed out, so deleted ids are never reissued.
    last_id: CandidateId,
}

impl CandidateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the six sample candidates.
    pub fn with_sample_data() -> Self {
        Self::from_candidates(sample_candidates())
    }

    /// Create a store from existing records, kept in the given order.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let last_id = candidates.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            candidates,
            last_id,
        }
    }

    /// Return up to `limit` records starting at offset `skip`.
    pub fn list(&self, skip: usize, limit: usize) -> &[Candidate] {
        let start = skip.min(self.candidates.len());
        let end = start.saturating_add(limit).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// Look up a candidate by id.
    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Append a new candidate and return it.
    pub fn create(&mut self, fields: NewCandidate) -> Candidate {
        let candidate = Candidate {
            id: self.next_id(),
            name: fields.name,
            image: fields.image,
            political_party: fields.political_party,
            description: fields.description,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.last_id = candidate.id;
        self.candidates.push(candidate.clone());
        candidate
    }

    /// Apply a partial update. Returns `None` if the id is unknown.
    pub fn update(&mut self, id: CandidateId, patch: CandidatePatch) -> Option<Candidate> {
        let candidate = self.candidates.iter_mut().find(|c| c.id == id)?;
        candidate.update(patch, Utc::now());
        Some(candidate.clone())
    }

    /// Remove a candidate. Returns `false` if the id is unknown.
    pub fn delete(&mut self, id: CandidateId) -> bool {
        match self.candidates.iter().position(|c| c.id == id) {
            Some(index) => {
                self.candidates.remove(index);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring search over name, party and description.
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&Candidate> {
        let needle = query.to_lowercase();
        self.candidates.iter().filter(|c| c.matches(&needle)).collect()
    }

    /// Candidates whose party equals `party` exactly.
    pub fn filter_by_party(&self, party: &str) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.political_party == party)
            .collect()
    }

    /// Number of candidates held.
    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    /// Number of candidates per party.
    pub fn party_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for candidate in &self.candidates {
            *counts.entry(candidate.political_party.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn next_id(&self) -> CandidateId {
        self.last_id + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_candidate(name: &str, party: &str) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            image: format!("https://example.com/{}.png", name.to_lowercase()),
            political_party: party.to_string(),
            description: format!("{} runs for office.", name),
        }
    }

    fn ids(candidates: &[Candidate]) -> Vec<CandidateId> {
        candidates.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_store_starts_at_id_one() {
        let mut store = CandidateStore::new();
        let created = store.create(new_candidate("Alice", "Blue"));

        assert_eq!(created.id, 1);
        assert!(created.updated_at.is_none());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = CandidateStore::new();
        let created: Vec<_> = (0..5)
            .map(|i| store.create(new_candidate(&format!("C{}", i), "Blue")).id)
            .collect();

        assert!(created.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn seeded_store_issues_id_seven_next() {
        let mut store = CandidateStore::with_sample_data();
        assert_eq!(store.count(), 6);

        let created = store.create(new_candidate("Newcomer", "Blue"));
        assert_eq!(created.id, 7);
        assert_eq!(store.list(6, 1)[0], created);
    }

    #[test]
    fn deleted_highest_id_is_not_reused() {
        let mut store = CandidateStore::with_sample_data();
        assert!(store.delete(6));

        let created = store.create(new_candidate("Newcomer", "Blue"));
        assert_eq!(created.id, 7);
    }

    #[test]
    fn emptied_store_does_not_restart_at_one() {
        let mut store = CandidateStore::with_sample_data();
        for id in 1..=6 {
            assert!(store.delete(id));
        }
        assert_eq!(store.count(), 0);

        let created = store.create(new_candidate("Newcomer", "Blue"));
        assert_eq!(created.id, 7);
    }

    #[test]
    fn get_returns_created_record() {
        let mut store = CandidateStore::new();
        let created = store.create(new_candidate("Alice", "Blue"));

        assert_eq!(store.get(created.id), Some(&created));
        assert_eq!(store.get(99), None);
    }

    #[test]
    fn list_slices_in_insertion_order() {
        let store = CandidateStore::with_sample_data();

        assert_eq!(ids(store.list(2, 2)), vec![3, 4]);
        assert_eq!(ids(store.list(0, 100)), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ids(store.list(5, 10)), vec![6]);
        assert!(store.list(6, 10).is_empty());
        assert!(store.list(usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn update_changes_only_provided_fields() {
        let mut store = CandidateStore::with_sample_data();
        let before = store.get(2).cloned().unwrap();

        let updated = store
            .update(
                2,
                CandidatePatch {
                    description: Some("Changed.".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.description, "Changed.");
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.image, before.image);
        assert_eq!(updated.political_party, before.political_party);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(store.get(2), Some(&updated));
    }

    #[test]
    fn repeated_updates_increase_updated_at() {
        let mut store = CandidateStore::with_sample_data();

        let first = store.update(1, CandidatePatch::default()).unwrap();
        let second = store.update(1, CandidatePatch::default()).unwrap();

        assert!(second.updated_at.unwrap() > first.updated_at.unwrap());
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let mut store = CandidateStore::with_sample_data();
        assert!(store.update(42, CandidatePatch::default()).is_none());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = CandidateStore::with_sample_data();

        assert!(store.delete(3));
        assert_eq!(store.count(), 5);
        assert!(store.get(3).is_none());
        assert!(!store.delete(3));
        assert_eq!(store.count(), 5);
    }

    #[test]
    fn search_matches_any_text_field() {
        let store = CandidateStore::with_sample_data();

        let by_name: Vec<_> = store.search("LISA").iter().map(|c| c.id).collect();
        assert_eq!(by_name, vec![5]);

        let by_party: Vec<_> = store.search("green future").iter().map(|c| c.id).collect();
        assert_eq!(by_party, vec![3]);

        let by_description: Vec<_> = store.search("veterans").iter().map(|c| c.id).collect();
        assert_eq!(by_description, vec![4]);
    }

    #[test]
    fn search_empty_returns_all_and_unknown_returns_none() {
        let store = CandidateStore::with_sample_data();

        assert_eq!(store.search("").len(), 6);
        assert!(store.search("nonexistent-token-xyz").is_empty());
    }

    #[test]
    fn filter_by_party_is_exact_and_case_sensitive() {
        let store = CandidateStore::with_sample_data();

        let matched: Vec<_> = store
            .filter_by_party("Conservative Alliance")
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(matched, vec![2]);
        assert!(store.filter_by_party("conservative alliance").is_empty());
        assert!(store.filter_by_party("Conservative").is_empty());
    }

    #[test]
    fn party_counts_sum_to_total() {
        let mut store = CandidateStore::with_sample_data();
        store.create(new_candidate("Extra", "Green Future Party"));

        let counts = store.party_counts();
        assert_eq!(counts.len(), 6);
        assert_eq!(counts["Green Future Party"], 2);
        assert_eq!(counts.values().sum::<usize>(), store.count());
    }
}
