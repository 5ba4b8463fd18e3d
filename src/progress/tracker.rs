use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::storage::StateStore;

const PROGRESS_KEY: &str = "progress";

/// Stored shape: an array in insertion order, semantically a set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProgress {
    completed_topics: Vec<String>,
}

/// Set of completed topic names per user.
///
/// Topic names are not validated against the syllabus: toggling an unknown
/// name is accepted and stored, and names left over from a replaced syllabus
/// linger harmlessly.
pub struct ProgressTracker {
    store: StateStore,
}

impl ProgressTracker {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    fn load(&self, username: &str) -> UserProgress {
        self.store.get(username, PROGRESS_KEY).unwrap_or_default()
    }

    fn save(&self, username: &str, progress: &UserProgress) {
        self.store.set(username, PROGRESS_KEY, progress);
    }

    /// The completed-topic set.
    pub fn completed(&self, username: &str) -> BTreeSet<String> {
        self.load(username).completed_topics.into_iter().collect()
    }

    pub fn is_completed(&self, username: &str, topic: &str) -> bool {
        self.load(username)
            .completed_topics
            .iter()
            .any(|t| t == topic)
    }

    /// Flip one topic's completion and persist. Returns the new set.
    pub fn toggle(&self, username: &str, topic: &str) -> BTreeSet<String> {
        let mut progress = self.load(username);

        if progress.completed_topics.iter().any(|t| t == topic) {
            progress.completed_topics.retain(|t| t != topic);
        } else {
            progress.completed_topics.push(topic.to_string());
        }

        self.save(username, &progress);
        progress.completed_topics.into_iter().collect()
    }

    /// Reset to empty and persist.
    pub fn clear(&self, username: &str) -> BTreeSet<String> {
        let progress = UserProgress::default();
        self.save(username, &progress);
        BTreeSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tracker() -> (TempDir, ProgressTracker) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        (dir, ProgressTracker::new(store))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (_dir, tracker) = tracker();

        let set = tracker.toggle("student", "Sandhi");
        assert!(set.contains("Sandhi"));
        assert_eq!(set.len(), 1);

        let set = tracker.toggle("student", "Sandhi");
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_pair_is_identity() {
        let (_dir, tracker) = tracker();
        tracker.toggle("student", "Samas");
        tracker.toggle("student", "Time");
        let before = tracker.completed("student");

        tracker.toggle("student", "Sandhi");
        tracker.toggle("student", "Sandhi");

        assert_eq!(tracker.completed("student"), before);
    }

    #[test]
    fn test_unknown_topic_names_accepted() {
        let (_dir, tracker) = tracker();
        let set = tracker.toggle("student", "Topic From A Future Syllabus");
        assert!(set.contains("Topic From A Future Syllabus"));
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let (_dir, tracker) = tracker();
        tracker.toggle("student", "Sandhi");
        tracker.toggle("student", "Samas");

        assert!(tracker.clear("student").is_empty());
        assert!(tracker.completed("student").is_empty());
    }

    #[test]
    fn test_per_user_isolation() {
        let (_dir, tracker) = tracker();
        tracker.toggle("student", "Sandhi");

        assert!(tracker.completed("learner").is_empty());
    }
}
