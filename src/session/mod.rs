//! Study sessions: the per-mode state machine and the generation guard.

mod engine;
mod guard;
mod models;

pub use engine::{Advance, AnswerState, SessionReport, StudySession};
pub use guard::{GenerationGuard, GenerationToken};
pub use models::{
    Flashcard, GeneratedItems, LearningStep, MemoryPalaceStep, MemoryStepKind, QuizQuestion,
    StudyMode, TableChunk,
};
