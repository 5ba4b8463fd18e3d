use thiserror::Error;

use super::models::OptimizedSchedule;
use crate::storage::StateStore;

const SCHEDULE_KEY: &str = "schedule";
const PENDING_KEY: &str = "schedulePending";

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("A revised schedule must contain at least one item")]
    EmptyRevision,

    #[error("No pending schedule revision to apply")]
    NothingPending,

    #[error("No schedule has been accepted yet")]
    NoSchedule,
}

/// Holds the accepted schedule and at most one pending revision per user.
///
/// A gateway revision only previews; it becomes the accepted schedule when
/// the user explicitly applies it, and application is whole-schedule
/// replacement, never an item-level merge. Discarding a pending revision
/// leaves the accepted schedule untouched.
pub struct ScheduleMerger {
    store: StateStore,
}

impl ScheduleMerger {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    pub fn accepted(&self, username: &str) -> Option<OptimizedSchedule> {
        self.store.get(username, SCHEDULE_KEY)
    }

    pub fn pending(&self, username: &str) -> Option<OptimizedSchedule> {
        self.store.get(username, PENDING_KEY)
    }

    /// Accept a freshly proposed schedule outright (the initial proposal has
    /// no prior schedule to preview against).
    pub fn accept_initial(
        &self,
        username: &str,
        mut schedule: OptimizedSchedule,
    ) -> Result<OptimizedSchedule, ScheduleError> {
        if schedule.items.is_empty() {
            return Err(ScheduleError::EmptyRevision);
        }
        schedule.sort();
        self.store.set(username, SCHEDULE_KEY, &schedule);
        self.store.remove(username, PENDING_KEY);
        Ok(schedule)
    }

    /// Stage a revised schedule as the pending candidate. Rejects empty
    /// revisions before they can ever become visible.
    pub fn propose(
        &self,
        username: &str,
        candidate: OptimizedSchedule,
    ) -> Result<OptimizedSchedule, ScheduleError> {
        if candidate.items.is_empty() {
            return Err(ScheduleError::EmptyRevision);
        }
        self.store.set(username, PENDING_KEY, &candidate);
        Ok(candidate)
    }

    /// Promote the pending candidate to the accepted schedule, replacing the
    /// previous one wholesale and re-asserting (date, start) order.
    pub fn apply(&self, username: &str) -> Result<OptimizedSchedule, ScheduleError> {
        let mut pending: OptimizedSchedule = self
            .pending(username)
            .ok_or(ScheduleError::NothingPending)?;

        pending.sort();
        self.store.set(username, SCHEDULE_KEY, &pending);
        self.store.remove(username, PENDING_KEY);
        Ok(pending)
    }

    /// Drop the pending candidate; the accepted schedule is left as-is.
    pub fn discard(&self, username: &str) {
        self.store.remove(username, PENDING_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::models::ScheduleItem;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn merger() -> (TempDir, ScheduleMerger) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        (dir, ScheduleMerger::new(store))
    }

    fn schedule(activities: &[&str]) -> OptimizedSchedule {
        OptimizedSchedule {
            items: activities
                .iter()
                .enumerate()
                .map(|(i, a)| ScheduleItem {
                    date: NaiveDate::from_ymd_opt(2026, 8, 1 + i as u32).unwrap(),
                    start_time: "09:00".to_string(),
                    end_time: "10:30".to_string(),
                    activity: a.to_string(),
                })
                .collect(),
            reasoning: "balanced".to_string(),
        }
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let (_dir, merger) = merger();
        merger.accept_initial("student", schedule(&["Sandhi", "Samas"])).unwrap();
        merger.propose("student", schedule(&["Pratyaya"])).unwrap();

        let applied = merger.apply("student").unwrap();
        assert_eq!(applied.items.len(), 1);
        assert_eq!(applied.items[0].activity, "Pratyaya");

        assert_eq!(merger.accepted("student").unwrap(), applied);
        assert!(merger.pending("student").is_none());
    }

    #[test]
    fn test_discard_leaves_accepted_untouched() {
        let (_dir, merger) = merger();
        let accepted = merger
            .accept_initial("student", schedule(&["Sandhi", "Samas"]))
            .unwrap();
        let before = serde_json::to_string(&merger.accepted("student").unwrap()).unwrap();

        merger.propose("student", schedule(&["Pratyaya"])).unwrap();
        merger.discard("student");

        let after = serde_json::to_string(&merger.accepted("student").unwrap()).unwrap();
        assert_eq!(before, after);
        assert_eq!(merger.accepted("student").unwrap(), accepted);
        assert!(merger.pending("student").is_none());
    }

    #[test]
    fn test_empty_revision_rejected() {
        let (_dir, merger) = merger();
        merger.accept_initial("student", schedule(&["Sandhi"])).unwrap();

        let empty = OptimizedSchedule {
            items: Vec::new(),
            reasoning: String::new(),
        };
        assert!(matches!(
            merger.propose("student", empty),
            Err(ScheduleError::EmptyRevision)
        ));
        assert!(merger.pending("student").is_none());
    }

    #[test]
    fn test_apply_without_pending_fails() {
        let (_dir, merger) = merger();
        assert!(matches!(
            merger.apply("student"),
            Err(ScheduleError::NothingPending)
        ));
    }

    #[test]
    fn test_apply_restores_ordering() {
        let (_dir, merger) = merger();
        let mut out_of_order = schedule(&["b", "a"]);
        out_of_order.items.reverse();
        merger.accept_initial("student", schedule(&["seed"])).unwrap();
        merger.propose("student", out_of_order).unwrap();

        let applied = merger.apply("student").unwrap();
        assert!(applied.items[0].date < applied.items[1].date);
    }
}
