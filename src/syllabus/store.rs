use super::defaults::default_sections;
use super::models::Section;
use crate::storage::StateStore;

const SECTIONS_KEY: &str = "sections";
const CUSTOM_FLAG_KEY: &str = "isSyllabusCustom";
const WELCOME_FLAG_KEY: &str = "hasSeenWelcome";

/// Per-user syllabus persistence: the active section list plus the flags
/// tracking whether it is a custom upload and whether the welcome flow ran.
pub struct SyllabusStore {
    store: StateStore,
}

impl SyllabusStore {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// The active syllabus; the built-in default when none is stored.
    pub fn sections(&self, username: &str) -> Vec<Section> {
        self.store
            .get(username, SECTIONS_KEY)
            .unwrap_or_else(default_sections)
    }

    /// Replace the active syllabus with an analyzed custom one.
    pub fn set_custom(&self, username: &str, sections: &[Section]) {
        self.store.set(username, SECTIONS_KEY, &sections);
        self.store.set(username, CUSTOM_FLAG_KEY, &true);
    }

    pub fn is_custom(&self, username: &str) -> bool {
        self.store.get(username, CUSTOM_FLAG_KEY).unwrap_or(false)
    }

    /// Drop any custom syllabus and fall back to the default.
    ///
    /// Completed-topic names recorded against the old syllabus are left in
    /// place; they simply stop matching anything.
    pub fn reset(&self, username: &str) -> Vec<Section> {
        self.store.remove_many(username, &[SECTIONS_KEY, CUSTOM_FLAG_KEY]);
        default_sections()
    }

    pub fn has_seen_welcome(&self, username: &str) -> bool {
        self.store.get(username, WELCOME_FLAG_KEY).unwrap_or(false)
    }

    pub fn mark_welcome_seen(&self, username: &str) {
        self.store.set(username, WELCOME_FLAG_KEY, &true);
    }
}
