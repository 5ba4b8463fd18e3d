//! Boundary to the content-generation model.
//!
//! Everything model-produced enters the rest of the crate through
//! [`ContentGenerator`], and structured payloads are validated here before
//! any caller sees them. A payload that fails validation is rejected as a
//! whole; no partially-checked items leak through.

mod gemini;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::OptimizedSchedule;
use crate::session::{GeneratedItems, MemoryStepKind, QuizQuestion, StudyMode};
use crate::stats::UserStats;
use crate::syllabus::{Section, StudyFile};

pub use gemini::GeminiGenerator;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("A generation request is already in flight")]
    Busy,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed model output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The model returned no usable content")]
    EmptyResult,

    #[error("Invalid model output: {0}")]
    InvalidResponse(String),
}

/// How the student wants to work through the remaining material. Shifts the
/// tone and pacing of time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Memorization,
    Understanding,
    Mastery,
}

impl LearningStyle {
    pub(crate) fn prompt_description(&self) -> &'static str {
        match self {
            LearningStyle::Memorization => {
                "The student's goal is Quick Memorization. They want to quickly learn key \
                 facts, vocabulary, and rules for an upcoming test. The focus is on speed \
                 and recall, not deep understanding."
            }
            LearningStyle::Understanding => {
                "The student's goal is Conceptual Understanding. They want to understand \
                 the 'why' behind the grammar and concepts, not just memorize. This might \
                 take slightly longer than pure memorization."
            }
            LearningStyle::Mastery => {
                "The student's goal is Deep Mastery. They want a thorough understanding of \
                 the concepts and to recall all key information perfectly. This is the most \
                 comprehensive approach."
            }
        }
    }
}

/// A friendly time estimate for finishing the remaining topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEstimate {
    pub time_estimate: String,
    pub reasoning: String,
}

/// Machine-readable intent extracted from a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum AssistantCommand {
    #[serde(rename_all = "camelCase")]
    Navigate { section_id: String },
    #[serde(rename_all = "camelCase")]
    Generate { study_mode: StudyMode, topic: String },
    #[serde(rename_all = "camelCase")]
    OpenModal { modal: String },
    AnswerOnly,
}

/// One assistant chat turn: conversational text plus the command the app
/// should carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub response_text: String,
    #[serde(default)]
    pub command: Option<AssistantCommand>,
}

/// The full set of model-backed operations the app needs.
pub trait ContentGenerator {
    /// Generate session content for a topic, optionally grounded in
    /// uploaded study files and steered by user instructions.
    fn generate(
        &self,
        mode: StudyMode,
        topic: &str,
        files: &[StudyFile],
        custom_instructions: Option<&str>,
    ) -> Result<GeneratedItems>;

    /// Extract a structured syllabus from uploaded document files.
    fn analyze_syllabus(&self, files: &[StudyFile]) -> Result<Vec<Section>>;

    /// Answer a free-form question, optionally grounded in study files.
    fn solve_doubt(&self, question: &str, files: &[StudyFile]) -> Result<String>;

    /// Estimate how long the remaining topics will take.
    fn estimate_time(
        &self,
        remaining_topics: &[String],
        stats: Option<&UserStats>,
        style: LearningStyle,
    ) -> Result<TimeEstimate>;

    /// Propose a study schedule for the remaining topics over a time window.
    fn propose_schedule(
        &self,
        remaining_topics: &[String],
        stats: Option<&UserStats>,
        start: &str,
        end: &str,
    ) -> Result<OptimizedSchedule>;

    /// Rework an existing schedule according to a free-form request.
    fn revise_schedule(
        &self,
        current: &OptimizedSchedule,
        request: &str,
    ) -> Result<OptimizedSchedule>;

    /// One chat turn with the study assistant, aware of the syllabus.
    fn chat(&self, input: &str, sections: &[Section]) -> Result<AssistantReply>;
}

/// Reject a generated payload that the session engine cannot run safely.
pub fn validate_items(items: &GeneratedItems) -> Result<()> {
    if items.is_empty() {
        return Err(GenerationError::EmptyResult);
    }
    match items {
        GeneratedItems::Quiz(questions) => {
            for q in questions {
                validate_question(q)?;
            }
        }
        GeneratedItems::MemoryPalace(steps) => {
            for step in steps {
                if step.step_type == MemoryStepKind::Recall {
                    let q = step.recall_question.as_ref().ok_or_else(|| {
                        GenerationError::InvalidResponse(format!(
                            "recall step '{}' has no question",
                            step.title
                        ))
                    })?;
                    validate_question(q)?;
                }
            }
        }
        GeneratedItems::Flashcards(_) | GeneratedItems::Learn(_) => {}
    }
    Ok(())
}

fn validate_question(q: &QuizQuestion) -> Result<()> {
    if q.options.len() < 2 {
        return Err(GenerationError::InvalidResponse(format!(
            "question '{}' has fewer than two options",
            q.question
        )));
    }
    if !q.options.contains(&q.correct_answer) {
        return Err(GenerationError::InvalidResponse(format!(
            "correct answer for '{}' is not among its options",
            q.question
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Flashcard, MemoryPalaceStep};

    fn question(correct: &str, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            question: "रामः किं करोति?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
            explanation: String::new(),
            hint: None,
        }
    }

    #[test]
    fn test_empty_payload_rejected() {
        let items = GeneratedItems::Flashcards(Vec::new());
        assert!(matches!(
            validate_items(&items),
            Err(GenerationError::EmptyResult)
        ));
    }

    #[test]
    fn test_quiz_answer_must_be_an_option() {
        let items = GeneratedItems::Quiz(vec![question("गच्छति", &["पठति", "खादति"])]);
        assert!(matches!(
            validate_items(&items),
            Err(GenerationError::InvalidResponse(_))
        ));

        let ok = GeneratedItems::Quiz(vec![question("पठति", &["पठति", "खादति"])]);
        assert!(validate_items(&ok).is_ok());
    }

    #[test]
    fn test_recall_step_requires_question() {
        let step = MemoryPalaceStep {
            step_type: MemoryStepKind::Recall,
            title: "Check yourself".to_string(),
            explanation: String::new(),
            table_chunk: None,
            recall_question: None,
        };
        let items = GeneratedItems::MemoryPalace(vec![step]);
        assert!(matches!(
            validate_items(&items),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_flashcards_pass_through() {
        let items = GeneratedItems::Flashcards(vec![Flashcard {
            front: "नमः".to_string(),
            back: "salutation".to_string(),
        }]);
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn test_assistant_command_wire_format() {
        let json = r#"{"name":"generate","studyMode":"quiz","topic":"Sandhi"}"#;
        let cmd: AssistantCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            AssistantCommand::Generate {
                study_mode: StudyMode::Quiz,
                topic: "Sandhi".to_string(),
            }
        );

        let answer_only: AssistantCommand =
            serde_json::from_str(r#"{"name":"answer_only"}"#).unwrap();
        assert_eq!(answer_only, AssistantCommand::AnswerOnly);
    }
}
