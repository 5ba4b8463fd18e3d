pub mod auth;
pub mod chat;
pub mod doubt;
pub mod estimate;
pub mod progress;
pub mod schedule;
pub mod stats;
pub mod study;
pub mod syllabus;
