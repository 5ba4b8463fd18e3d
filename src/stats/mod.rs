//! Session history aggregation: streaks, accuracy, per-topic performance.

mod aggregator;
mod models;

pub use aggregator::StatsAggregator;
pub use models::{QuizOutcome, SessionKind, TopicScore, UserStats};
