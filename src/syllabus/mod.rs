//! Syllabus sections, topics, and uploaded study material.

mod defaults;
mod models;
mod store;

pub use defaults::default_sections;
pub use models::{all_topic_names, Section, StudyFile, Topic};
pub use store::SyllabusStore;
