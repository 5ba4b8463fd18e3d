//! AI-optimized study schedules and the preview/apply revision flow.

mod merger;
mod models;

pub use merger::{ScheduleError, ScheduleMerger};
pub use models::{OptimizedSchedule, ScheduleItem};
