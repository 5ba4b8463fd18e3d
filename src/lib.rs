//! Abhyasa: a local-first Sanskrit study assistant.
//!
//! The crate is the application core behind the CLI: accounts, syllabus,
//! progress and stats tracking, study-session state machines, schedules,
//! and the gateway to the content-generation model. All durable state is
//! small per-user JSON files under a single data directory.

pub mod auth;
pub mod gateway;
pub mod progress;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod storage;
pub mod syllabus;

use std::path::PathBuf;

use auth::CredentialStore;
use progress::ProgressTracker;
use schedule::ScheduleMerger;
use stats::StatsAggregator;
use storage::{StateStore, StorageError};
use syllabus::SyllabusStore;

/// The wired-up application core. Every façade shares one [`StateStore`],
/// so they all read and write the same data directory.
pub struct App {
    pub store: StateStore,
    pub auth: CredentialStore,
    pub syllabus: SyllabusStore,
    pub progress: ProgressTracker,
    pub stats: StatsAggregator,
    pub schedule: ScheduleMerger,
}

impl App {
    pub fn open(data_dir: PathBuf) -> Self {
        let store = StateStore::new(data_dir);
        Self {
            auth: CredentialStore::new(store.clone()),
            syllabus: SyllabusStore::new(store.clone()),
            progress: ProgressTracker::new(store.clone()),
            stats: StatsAggregator::new(store.clone()),
            schedule: ScheduleMerger::new(store.clone()),
            store,
        }
    }

    /// Open against the platform-default data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::open(StateStore::default_data_dir()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_facades_share_one_data_dir() {
        let dir = TempDir::new().unwrap();
        let app = App::open(dir.path().to_path_buf());

        let user = app.auth.sign_up("mira", "hunter2").unwrap();
        app.progress.toggle(&user.username, "Sandhi");

        assert!(app.progress.is_completed(&user.username, "Sandhi"));
        assert!(app.store.base_path().starts_with(dir.path()));
    }
}
