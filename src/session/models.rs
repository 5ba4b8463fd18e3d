use serde::{Deserialize, Serialize};

/// The four study modes a session can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Flashcards,
    Quiz,
    Learn,
    MemoryPalace,
}

impl StudyMode {
    pub fn label(&self) -> &'static str {
        match self {
            StudyMode::Flashcards => "flashcards",
            StudyMode::Quiz => "quiz",
            StudyMode::Learn => "learn",
            StudyMode::MemoryPalace => "memory_palace",
        }
    }
}

/// A front/back card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// One multiple-choice question with four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One step of a stepwise lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub concept: String,
    pub example: String,
    pub explanation: String,
    pub mnemonic: String,
}

/// The kind of a memory-palace step. The sequence is pedagogically ordered
/// and must never be shuffled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryStepKind {
    Introduction,
    Pattern,
    Chunk,
    Recall,
    Review,
}

/// A slice of a paradigm table shown during a `chunk` step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableChunk {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One memory-palace step. A `recall` step carries an embedded quiz
/// question; a `chunk` step usually carries a table slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPalaceStep {
    pub step_type: MemoryStepKind,
    pub title: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_chunk: Option<TableChunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_question: Option<QuizQuestion>,
}

/// Generated content for one session, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratedItems {
    Flashcards(Vec<Flashcard>),
    Quiz(Vec<QuizQuestion>),
    Learn(Vec<LearningStep>),
    MemoryPalace(Vec<MemoryPalaceStep>),
}

impl GeneratedItems {
    pub fn mode(&self) -> StudyMode {
        match self {
            GeneratedItems::Flashcards(_) => StudyMode::Flashcards,
            GeneratedItems::Quiz(_) => StudyMode::Quiz,
            GeneratedItems::Learn(_) => StudyMode::Learn,
            GeneratedItems::MemoryPalace(_) => StudyMode::MemoryPalace,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GeneratedItems::Flashcards(v) => v.len(),
            GeneratedItems::Quiz(v) => v.len(),
            GeneratedItems::Learn(v) => v.len(),
            GeneratedItems::MemoryPalace(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
