//! Completed-topic tracking.

mod tracker;

pub use tracker::ProgressTracker;
