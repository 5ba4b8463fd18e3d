//! The per-session state machine.
//!
//! A session is `Active(index, score, per-step answers)` until it finishes,
//! after which only the final score and the one-shot completion report
//! remain observable. Flashcard and quiz items are shuffled exactly once at
//! construction; lesson and memory-palace steps keep generation order.

use rand::seq::SliceRandom;
use rand::Rng;

use super::models::{
    Flashcard, GeneratedItems, LearningStep, MemoryPalaceStep, MemoryStepKind, QuizQuestion,
    StudyMode,
};

/// The locked-in answer for one quiz or recall step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerState {
    pub selected: String,
    pub correct: bool,
}

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to another item (or stayed put on a defensive no-op).
    Moved,
    /// The session just finished.
    Finished,
}

/// Completion report for a scored quiz, delivered exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub topic: String,
    pub score: u32,
    pub total: u32,
}

pub struct StudySession {
    topic: String,
    items: GeneratedItems,
    index: usize,
    score: u32,
    answers: Vec<Option<AnswerState>>,
    finished: bool,
    report: Option<SessionReport>,
}

impl StudySession {
    /// Build a session over generated items, shuffling card/question order.
    pub fn new(topic: impl Into<String>, items: GeneratedItems) -> Self {
        Self::with_rng(topic, items, &mut rand::thread_rng())
    }

    /// Like [`StudySession::new`] with a caller-supplied RNG, so the
    /// permutation can be pinned down.
    pub fn with_rng<R: Rng>(topic: impl Into<String>, mut items: GeneratedItems, rng: &mut R) -> Self {
        match &mut items {
            GeneratedItems::Flashcards(cards) => cards.shuffle(rng),
            GeneratedItems::Quiz(questions) => questions.shuffle(rng),
            // Pedagogically ordered; keep generation order.
            GeneratedItems::Learn(_) | GeneratedItems::MemoryPalace(_) => {}
        }

        let len = items.len();
        Self {
            topic: topic.into(),
            finished: len == 0,
            items,
            index: 0,
            score: 0,
            answers: vec![None; len],
            report: None,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn mode(&self) -> StudyMode {
        self.items.mode()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The items in their fixed session order.
    pub fn items(&self) -> &GeneratedItems {
        &self.items
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        match &self.items {
            GeneratedItems::Flashcards(cards) if !self.finished => cards.get(self.index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.items {
            GeneratedItems::Quiz(questions) if !self.finished => questions.get(self.index),
            _ => None,
        }
    }

    pub fn current_learning_step(&self) -> Option<&LearningStep> {
        match &self.items {
            GeneratedItems::Learn(steps) if !self.finished => steps.get(self.index),
            _ => None,
        }
    }

    pub fn current_memory_step(&self) -> Option<&MemoryPalaceStep> {
        match &self.items {
            GeneratedItems::MemoryPalace(steps) if !self.finished => steps.get(self.index),
            _ => None,
        }
    }

    /// The locked answer at an index, if that step was answered.
    pub fn answer_at(&self, index: usize) -> Option<&AnswerState> {
        self.answers.get(index).and_then(|a| a.as_ref())
    }

    /// Step forward. On the last item this finishes the session; for a quiz
    /// that also produces the completion report. A quiz cannot be advanced
    /// past an unanswered question.
    pub fn next(&mut self) -> Advance {
        if self.finished {
            return Advance::Finished;
        }

        if self.mode() == StudyMode::Quiz && self.answers[self.index].is_none() {
            return Advance::Moved;
        }

        if self.index + 1 < self.items.len() {
            self.index += 1;
            Advance::Moved
        } else {
            self.finish();
            Advance::Finished
        }
    }

    /// Step back, clamped at the first item. Quizzes only move forward.
    pub fn prev(&mut self) {
        if self.finished || self.mode() == StudyMode::Quiz {
            return;
        }
        self.index = self.index.saturating_sub(1);
    }

    /// Answer the current quiz question or recall step. The first selection
    /// locks; re-selection is a no-op returning `None`. Correctness is exact
    /// string match against the declared answer. Quiz answers score and
    /// auto-advance; recall answers are shown inline only.
    pub fn select_answer(&mut self, option: &str) -> Option<bool> {
        if self.finished {
            return None;
        }

        match &self.items {
            GeneratedItems::Quiz(questions) => {
                if self.answers[self.index].is_some() {
                    return None;
                }
                let correct = option == questions[self.index].correct_answer;
                self.answers[self.index] = Some(AnswerState {
                    selected: option.to_string(),
                    correct,
                });
                if correct {
                    self.score += 1;
                }
                self.next();
                Some(correct)
            }
            GeneratedItems::MemoryPalace(steps) => {
                let step = &steps[self.index];
                if step.step_type != MemoryStepKind::Recall {
                    return None;
                }
                let question = step.recall_question.as_ref()?;
                if self.answers[self.index].is_some() {
                    return None;
                }
                let correct = option == question.correct_answer;
                self.answers[self.index] = Some(AnswerState {
                    selected: option.to_string(),
                    correct,
                });
                Some(correct)
            }
            _ => None,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        if self.mode() == StudyMode::Quiz && !self.items.is_empty() {
            self.report = Some(SessionReport {
                topic: self.topic.clone(),
                score: self.score,
                total: self.items.len() as u32,
            });
        }
    }

    /// Take the quiz completion report. Yields a value exactly once per
    /// session, so stats recording cannot double-count.
    pub fn take_report(&mut self) -> Option<SessionReport> {
        self.report.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiz_items() -> GeneratedItems {
        GeneratedItems::Quiz(vec![
            question("q1", "a"),
            question("q2", "b"),
            question("q3", "c"),
        ])
    }

    fn question(text: &str, answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: answer.to_string(),
            explanation: String::new(),
            hint: None,
        }
    }

    fn cards(n: usize) -> GeneratedItems {
        GeneratedItems::Flashcards(
            (0..n)
                .map(|i| Flashcard {
                    front: format!("front {}", i),
                    back: format!("back {}", i),
                })
                .collect(),
        )
    }

    fn learn_steps(n: usize) -> GeneratedItems {
        GeneratedItems::Learn(
            (0..n)
                .map(|i| LearningStep {
                    concept: format!("concept {}", i),
                    example: String::new(),
                    explanation: String::new(),
                    mnemonic: String::new(),
                })
                .collect(),
        )
    }

    fn recall_step(answer: &str) -> MemoryPalaceStep {
        MemoryPalaceStep {
            step_type: MemoryStepKind::Recall,
            title: "Quick Recall".to_string(),
            explanation: String::new(),
            table_chunk: None,
            recall_question: Some(question("recall", answer)),
        }
    }

    fn plain_step(kind: MemoryStepKind) -> MemoryPalaceStep {
        MemoryPalaceStep {
            step_type: kind,
            title: String::new(),
            explanation: String::new(),
            table_chunk: None,
            recall_question: None,
        }
    }

    #[test]
    fn test_flashcards_prev_clamps_and_next_finishes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = StudySession::with_rng("Sandhi", cards(2), &mut rng);

        session.prev();
        assert_eq!(session.index(), 0);

        assert_eq!(session.next(), Advance::Moved);
        assert_eq!(session.next(), Advance::Finished);
        assert!(session.is_finished());
        assert!(session.take_report().is_none());
    }

    #[test]
    fn test_quiz_scoring_two_of_three() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = StudySession::with_rng("Sandhi", quiz_items(), &mut rng);

        // Answer each question as it comes: correct, incorrect, correct.
        let answers = [true, false, true];
        for &should_be_right in &answers {
            let q = session.current_question().unwrap().clone();
            let pick = if should_be_right {
                q.correct_answer.clone()
            } else {
                q.options
                    .iter()
                    .find(|o| **o != q.correct_answer)
                    .unwrap()
                    .clone()
            };
            let got = session.select_answer(&pick).unwrap();
            assert_eq!(got, should_be_right);
        }

        assert!(session.is_finished());
        assert_eq!(session.score(), 2);

        let report = session.take_report().unwrap();
        assert_eq!(report.topic, "Sandhi");
        assert_eq!((report.score, report.total), (2, 3));

        // Exactly once.
        assert!(session.take_report().is_none());
    }

    #[test]
    fn test_quiz_answer_locks_on_first_select() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = StudySession::with_rng(
            "Sandhi",
            GeneratedItems::Quiz(vec![question("q1", "a"), question("q2", "b")]),
            &mut rng,
        );

        let q = session.current_question().unwrap().clone();
        let wrong = q
            .options
            .iter()
            .find(|o| **o != q.correct_answer)
            .unwrap()
            .clone();

        assert_eq!(session.select_answer(&wrong), Some(false));
        // Session moved on; the first answer is locked.
        assert_eq!(session.answer_at(0).unwrap().selected, wrong);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_quiz_determinism_with_fixed_order() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(42);
            let mut session = StudySession::with_rng("Sandhi", quiz_items(), &mut rng);
            let mut picks = Vec::new();
            while !session.is_finished() {
                let q = session.current_question().unwrap().clone();
                picks.push(q.question.clone());
                session.select_answer(&q.correct_answer);
            }
            (picks, session.score())
        };

        let (order_a, score_a) = run();
        let (order_b, score_b) = run();
        assert_eq!(order_a, order_b);
        assert_eq!(score_a, score_b);
        assert_eq!(score_a, 3);
    }

    #[test]
    fn test_shuffle_is_stable_within_session() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = StudySession::with_rng("Sandhi", cards(8), &mut rng);

        let order_before: Vec<String> = match session.items() {
            GeneratedItems::Flashcards(v) => v.iter().map(|c| c.front.clone()).collect(),
            _ => unreachable!(),
        };

        session.next();
        session.next();
        session.prev();
        session.prev();
        session.prev();

        let order_after: Vec<String> = match session.items() {
            GeneratedItems::Flashcards(v) => v.iter().map(|c| c.front.clone()).collect(),
            _ => unreachable!(),
        };
        assert_eq!(order_before, order_after);
    }

    #[test]
    fn test_learn_preserves_generation_order() {
        let mut rng = StdRng::seed_from_u64(4);
        let session = StudySession::with_rng("Sandhi", learn_steps(5), &mut rng);

        let order: Vec<String> = match session.items() {
            GeneratedItems::Learn(v) => v.iter().map(|s| s.concept.clone()).collect(),
            _ => unreachable!(),
        };
        let expected: Vec<String> = (0..5).map(|i| format!("concept {}", i)).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_recall_step_does_not_score_or_advance() {
        let items = GeneratedItems::MemoryPalace(vec![
            plain_step(MemoryStepKind::Introduction),
            recall_step("a"),
            plain_step(MemoryStepKind::Review),
        ]);
        let mut session = StudySession::new("तिङन्त", items);

        session.next();
        assert_eq!(session.select_answer("a"), Some(true));
        assert_eq!(session.score(), 0);
        assert_eq!(session.index(), 1);

        // Locked after the first selection.
        assert_eq!(session.select_answer("b"), None);
        assert!(session.answer_at(1).unwrap().correct);

        session.next();
        assert_eq!(session.next(), Advance::Finished);
        assert!(session.take_report().is_none());
    }

    #[test]
    fn test_recall_rejected_on_non_recall_step() {
        let items = GeneratedItems::MemoryPalace(vec![plain_step(MemoryStepKind::Pattern)]);
        let mut session = StudySession::new("t", items);
        assert_eq!(session.select_answer("a"), None);
    }

    #[test]
    fn test_empty_items_never_panic() {
        let mut session = StudySession::new("t", GeneratedItems::Quiz(Vec::new()));
        assert!(session.is_finished());
        assert_eq!(session.next(), Advance::Finished);
        session.prev();
        assert_eq!(session.select_answer("a"), None);
        assert!(session.current_question().is_none());
        assert!(session.take_report().is_none());
    }

    #[test]
    fn test_quiz_next_blocked_until_answered() {
        let mut session = StudySession::new("t", quiz_items());
        assert_eq!(session.next(), Advance::Moved);
        assert_eq!(session.index(), 0);
    }
}
