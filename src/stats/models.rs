use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which kind of session is being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Flashcards,
    Quiz,
    Learn,
    MemoryPalace,
}

/// The scored result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub topic: String,
    pub score: u32,
    pub total: u32,
}

/// Running correct/total for one topic. Stored as an array of records so
/// first-seen order survives serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicScore {
    pub topic: String,
    pub correct: u32,
    pub total: u32,
}

impl TopicScore {
    /// Fraction correct, or `None` before any question was asked.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(self.total))
        }
    }
}

/// Aggregated study statistics for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_sessions: u32,
    pub quizzes_taken: u32,
    pub total_correct: u32,
    pub total_questions: u32,
    /// Consecutive calendar days (user-local) with at least one session.
    pub streak: u32,
    /// Calendar date of the most recent session, no time component.
    pub last_session_date: Option<NaiveDate>,
    #[serde(default)]
    pub topic_performance: Vec<TopicScore>,
}

impl UserStats {
    /// Overall quiz accuracy, or `None` before any quiz question.
    pub fn overall_accuracy(&self) -> Option<f64> {
        if self.total_questions == 0 {
            None
        } else {
            Some(f64::from(self.total_correct) / f64::from(self.total_questions))
        }
    }

    pub fn topic(&self, topic: &str) -> Option<&TopicScore> {
        self.topic_performance.iter().find(|t| t.topic == topic)
    }

    /// Topics ranked weakest first: ascending accuracy, first-seen order on
    /// ties (stable sort over the stored order).
    pub fn weakest_topics(&self) -> Vec<&TopicScore> {
        let mut ranked: Vec<&TopicScore> = self.topic_performance.iter().collect();
        ranked.sort_by(|a, b| {
            let a_acc = a.accuracy().unwrap_or(0.0);
            let b_acc = b.accuracy().unwrap_or(0.0);
            a_acc.partial_cmp(&b_acc).unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_value_accuracy_is_none() {
        let stats = UserStats::default();
        assert!(stats.overall_accuracy().is_none());
    }

    #[test]
    fn test_weakest_topics_sorted_ascending_with_stable_ties() {
        let stats = UserStats {
            topic_performance: vec![
                TopicScore { topic: "a".into(), correct: 3, total: 4 },
                TopicScore { topic: "b".into(), correct: 1, total: 4 },
                TopicScore { topic: "c".into(), correct: 1, total: 4 },
            ],
            ..UserStats::default()
        };

        let ranked: Vec<&str> = stats
            .weakest_topics()
            .iter()
            .map(|t| t.topic.as_str())
            .collect();
        assert_eq!(ranked, vec!["b", "c", "a"]);
    }
}
