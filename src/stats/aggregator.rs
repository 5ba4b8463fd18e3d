use chrono::{Duration, Local, NaiveDate};

use super::models::{QuizOutcome, SessionKind, TopicScore, UserStats};
use crate::storage::StateStore;

const STATS_KEY: &str = "stats";

/// Records finished sessions and maintains the derived statistics.
pub struct StatsAggregator {
    store: StateStore,
}

impl StatsAggregator {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Current stats, or the zero-value struct if none were ever recorded.
    pub fn stats(&self, username: &str) -> UserStats {
        self.store.get(username, STATS_KEY).unwrap_or_default()
    }

    fn save(&self, username: &str, stats: &UserStats) {
        self.store.set(username, STATS_KEY, stats);
    }

    /// Record one finished session, updating totals, the day streak, and
    /// (for quizzes) per-topic performance. Returns the updated stats.
    pub fn record_session(
        &self,
        username: &str,
        kind: SessionKind,
        outcome: Option<QuizOutcome>,
    ) -> UserStats {
        self.record_session_on(username, kind, outcome, Local::now().date_naive())
    }

    /// The streak rule, spelled out:
    /// - several sessions on the same day leave streak and date unchanged
    /// - a session the day after the last one extends the streak
    /// - anything else (first session, skipped day) restarts it at 1
    fn record_session_on(
        &self,
        username: &str,
        kind: SessionKind,
        outcome: Option<QuizOutcome>,
        today: NaiveDate,
    ) -> UserStats {
        let mut stats = self.stats(username);

        if stats.last_session_date != Some(today) {
            let yesterday = today - Duration::days(1);
            if stats.last_session_date == Some(yesterday) {
                stats.streak += 1;
            } else {
                stats.streak = 1;
            }
            stats.last_session_date = Some(today);
        }

        stats.total_sessions += 1;

        if kind == SessionKind::Quiz {
            if let Some(outcome) = outcome {
                stats.quizzes_taken += 1;
                stats.total_correct += outcome.score;
                stats.total_questions += outcome.total;

                match stats
                    .topic_performance
                    .iter_mut()
                    .find(|t| t.topic == outcome.topic)
                {
                    Some(entry) => {
                        entry.correct += outcome.score;
                        entry.total += outcome.total;
                    }
                    None => stats.topic_performance.push(TopicScore {
                        topic: outcome.topic,
                        correct: outcome.score,
                        total: outcome.total,
                    }),
                }
            }
        }

        self.save(username, &stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn aggregator() -> (TempDir, StatsAggregator) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        (dir, StatsAggregator::new(store))
    }

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
    }

    fn quiz(topic: &str, score: u32, total: u32) -> Option<QuizOutcome> {
        Some(QuizOutcome {
            topic: topic.to_string(),
            score,
            total,
        })
    }

    #[test]
    fn test_first_quiz_from_zero() {
        let (_dir, agg) = aggregator();

        let stats = agg.record_session_on("student", SessionKind::Quiz, quiz("Sandhi", 2, 3), day(1));

        assert_eq!(stats.streak, 1);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.quizzes_taken, 1);
        assert_eq!(stats.total_correct, 2);
        assert_eq!(stats.total_questions, 3);
        let topic = stats.topic("Sandhi").unwrap();
        assert_eq!((topic.correct, topic.total), (2, 3));
    }

    #[test]
    fn test_same_day_does_not_inflate_streak() {
        let (_dir, agg) = aggregator();
        agg.record_session_on("student", SessionKind::Flashcards, None, day(1));
        let stats = agg.record_session_on("student", SessionKind::Learn, None, day(1));

        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_session_date, Some(day(1)));
        assert_eq!(stats.total_sessions, 2);
    }

    #[test]
    fn test_streak_extends_then_resets_after_gap() {
        let (_dir, agg) = aggregator();

        let s1 = agg.record_session_on("student", SessionKind::Learn, None, day(1));
        assert_eq!(s1.streak, 1);

        let s2 = agg.record_session_on("student", SessionKind::Learn, None, day(2));
        assert_eq!(s2.streak, 2);

        // Day 3 skipped
        let s3 = agg.record_session_on("student", SessionKind::Learn, None, day(4));
        assert_eq!(s3.streak, 1);
    }

    #[test]
    fn test_quiz_accumulates_per_topic() {
        let (_dir, agg) = aggregator();
        agg.record_session_on("student", SessionKind::Quiz, quiz("Sandhi", 2, 3), day(1));
        agg.record_session_on("student", SessionKind::Quiz, quiz("Samas", 4, 5), day(1));
        let stats = agg.record_session_on("student", SessionKind::Quiz, quiz("Sandhi", 1, 3), day(2));

        assert_eq!(stats.quizzes_taken, 3);
        assert_eq!(stats.total_correct, 7);
        assert_eq!(stats.total_questions, 11);

        let sandhi = stats.topic("Sandhi").unwrap();
        assert_eq!((sandhi.correct, sandhi.total), (3, 6));
        let samas = stats.topic("Samas").unwrap();
        assert_eq!((samas.correct, samas.total), (4, 5));

        // First-seen order preserved
        assert_eq!(stats.topic_performance[0].topic, "Sandhi");
        assert_eq!(stats.topic_performance[1].topic, "Samas");
    }

    #[test]
    fn test_accuracy_bounds_hold() {
        let (_dir, agg) = aggregator();
        agg.record_session_on("student", SessionKind::Quiz, quiz("a", 0, 4), day(1));
        agg.record_session_on("student", SessionKind::Quiz, quiz("b", 4, 4), day(1));
        let stats = agg.record_session_on("student", SessionKind::Quiz, quiz("a", 2, 3), day(2));

        assert!(stats.total_correct <= stats.total_questions);
        for topic in &stats.topic_performance {
            assert!(topic.correct <= topic.total);
        }
    }

    #[test]
    fn test_non_quiz_sessions_ignore_outcome_fields() {
        let (_dir, agg) = aggregator();
        let stats =
            agg.record_session_on("student", SessionKind::Flashcards, None, day(1));

        assert_eq!(stats.quizzes_taken, 0);
        assert_eq!(stats.total_questions, 0);
        assert!(stats.topic_performance.is_empty());
    }

    #[test]
    fn test_stats_persist_across_reads() {
        let (_dir, agg) = aggregator();
        agg.record_session_on("student", SessionKind::Quiz, quiz("Sandhi", 2, 3), day(1));

        let reloaded = agg.stats("student");
        assert_eq!(reloaded.total_sessions, 1);
        assert_eq!(reloaded.last_session_date, Some(day(1)));
    }
}
