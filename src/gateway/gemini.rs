//! Gemini-backed [`ContentGenerator`] over the REST generateContent API.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{
    validate_items, AssistantReply, ContentGenerator, GenerationError, LearningStyle, Result,
    TimeEstimate,
};
use crate::schedule::OptimizedSchedule;
use crate::session::{
    Flashcard, GeneratedItems, LearningStep, MemoryPalaceStep, QuizQuestion, StudyMode,
};
use crate::stats::UserStats;
use crate::syllabus::{Section, StudyFile};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const TUTOR_PERSONA: &str = "You are an AI tutor named 'Lex'. Your student feels overwhelmed \
     and avoids studying. Your goal is to make learning Sanskrit feel easy, achievable, and \
     confidence-building. Your tone must be sharp, modern, and encouraging.";

pub struct GeminiGenerator {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Build a generator from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| GenerationError::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }

    /// One generateContent round trip; returns the first candidate's text.
    fn request(
        &self,
        parts: Vec<Value>,
        system_instruction: Option<&str>,
        json_output: bool,
    ) -> Result<String> {
        let mut body = json!({ "contents": [{ "parts": parts }] });
        if let Some(instruction) = system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
        }
        if json_output {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        log::debug!("gemini: POST {}", self.endpoint());
        let response: GenerateContentResponse = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let text = response.first_text();
        if text.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(text)
    }

    fn request_json<T: DeserializeOwned>(
        &self,
        parts: Vec<Value>,
        system_instruction: Option<&str>,
    ) -> Result<T> {
        let text = self.request(parts, system_instruction, true)?;
        Ok(serde_json::from_str(strip_json_fences(&text))?)
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default()
    }
}

/// Models occasionally wrap JSON output in a markdown code fence even when
/// asked for a JSON MIME type.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Fold text files into the prompt and return the remaining binary files as
/// inlineData parts. Keeping text inline avoids burning tokens on base64.
fn build_parts(mut prompt: String, files: &[StudyFile]) -> Vec<Value> {
    if !files.is_empty() {
        let text_notes: Vec<String> = files
            .iter()
            .filter(|f| f.mime_type.starts_with("text/"))
            .map(|f| format!("--- FILE: {} ---\n{}", f.name, f.content))
            .collect();
        if !text_notes.is_empty() {
            prompt.push('\n');
            prompt.push_str(&text_notes.join("\n\n"));
        }
    }

    let mut parts = vec![json!({ "text": prompt })];
    for file in files.iter().filter(|f| is_binary_attachment(f)) {
        parts.push(json!({
            "inlineData": { "mimeType": file.mime_type, "data": file.content }
        }));
    }
    parts
}

fn is_binary_attachment(file: &StudyFile) -> bool {
    file.is_image()
        || file.mime_type == "application/pdf"
        || file.mime_type.contains("document")
        || file.mime_type.contains("presentation")
}

fn with_custom_instructions(mut prompt: String, custom_instructions: Option<&str>) -> String {
    if let Some(instructions) = custom_instructions.filter(|i| !i.trim().is_empty()) {
        prompt.push_str(&format!(
            "\n\n**CRITICAL USER INSTRUCTIONS (HIGHEST PRIORITY):** You must strictly adhere \
             to the following instructions provided by the user. These override all other \
             directives.\n\"{}\"",
            instructions
        ));
    }
    prompt
}

fn grounding_note(prompt: &mut String, files: &[StudyFile]) {
    if files.is_empty() {
        prompt.push_str(
            "\n\nBase the content on your expert knowledge of the Sanskrit curriculum. \
             Ensure all grammar and examples are accurate.",
        );
    } else {
        prompt.push_str(
            "\n\nBase the content on the following provided study materials, ensuring it \
             aligns with the topic:",
        );
    }
}

fn flashcards_prompt(topic: &str) -> String {
    format!(
        "{TUTOR_PERSONA} Generate 5 key flashcards for the topic: \"{topic}\". Focus on the \
         most important concepts to build a foundation. Respond with a JSON array of objects \
         with keys \"front\" (a question, term, or concept) and \"back\" (the answer or \
         definition)."
    )
}

fn quiz_prompt(topic: &str) -> String {
    format!(
        "{TUTOR_PERSONA} Create a very short, 3-question multiple-choice quiz on \
         \"{topic}\". Start with a very easy question to build momentum. Respond with a JSON \
         array of objects with keys \"question\", \"options\" (exactly 4 strings), \
         \"correctAnswer\" (must be one of the options, verbatim), \"explanation\", and \
         \"hint\" (a short hint that guides the student without giving away the answer)."
    )
}

fn learn_prompt(topic: &str) -> String {
    format!(
        "{TUTOR_PERSONA} Create a 'Learn & Memorize' module with 3-5 simple steps for the \
         topic: \"{topic}\". Respond with a JSON array of objects with keys \"concept\" (the \
         rule being taught), \"example\" (a clear example in Sanskrit), \"explanation\" (a \
         simple English explanation), and \"mnemonic\" (a clever memory trick to make the \
         concept stick)."
    )
}

fn memory_palace_prompt(topic: &str) -> String {
    format!(
        "You are Lex, an expert AI tutor specializing in memory techniques for Sanskrit. The \
         user wants to memorize the table for the topic: \"{topic}\" (e.g., a shabdarupa or \
         dhaturupa). Create a step-by-step 'Memory Palace' tutorial.\n\n\
         **Core Directives:**\n\
         1. Deconstruct the table into small, logical chunks (by vibhakti or vacana).\n\
         2. Identify recurring suffixes, stems, or rules and call them out as patterns. For \
         example, for a noun declension, point out that '-bhyām' covers the dual of \
         Vibhaktis 3, 4, and 5.\n\
         3. Generate 6-10 steps that build the table up progressively.\n\
         4. Immediately after a chunk or pattern, add a recall step quizzing what was just \
         shown. End with ONE review step showing the complete table.\n\n\
         Respond with a JSON array of objects with keys \"stepType\" (one of \
         \"introduction\", \"pattern\", \"chunk\", \"recall\", \"review\"), \"title\", \
         \"explanation\", optional \"tableChunk\" ({{\"headers\": [...], \"rows\": \
         [[...]]}}), and for recall steps a required \"recallQuestion\" ({{\"question\", \
         \"options\" (4 strings), \"correctAnswer\" (one of the options, verbatim), \
         \"explanation\", \"hint\"}}).\n\n\
         Your tone must be sharp, modern, and encouraging. Make the student feel like \
         they're unlocking secrets, not just memorizing."
    )
}

fn stats_summary(stats: &UserStats) -> String {
    let accuracy = match stats.overall_accuracy() {
        Some(a) => format!("{:.0}%", a * 100.0),
        None => "N/A".to_string(),
    };
    format!(
        "Consider the student's performance:\n- Quizzes Taken: {}\n- Overall Accuracy: {}\n\
         - This indicates their learning pace. A higher accuracy suggests a faster pace.",
        stats.quizzes_taken, accuracy
    )
}

fn topic_accuracy_lines(stats: &UserStats) -> String {
    stats
        .topic_performance
        .iter()
        .map(|t| {
            let accuracy = match t.accuracy() {
                Some(a) => format!("{:.0}%", a * 100.0),
                None => "N/A".to_string(),
            };
            format!("- {}: {} accuracy", t.topic, accuracy)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn schedule_prompt(
    remaining_topics: &[String],
    stats: Option<&UserStats>,
    start: &str,
    end: &str,
) -> String {
    let mut prompt = format!(
        "You are an expert academic coach for a Sanskrit student. Create a detailed, \
         hour-by-hour study schedule from {start} to {end}. The student needs to master the \
         following remaining Sanskrit topics: {}.\n\
         The schedule should be realistic. If the time spans multiple days, include a 1-hour \
         lunch break (around 13:00) and a 45-minute dinner break (around 19:00) each day. If \
         the schedule covers a single day or just a few hours, place short 10-15 minute \
         breaks within the study sessions. Break larger topics into smaller study blocks.\n\
         Respond with a JSON object with keys \"schedule\" (an array of objects with keys \
         \"date\" in YYYY-MM-DD format, \"startTime\" and \"endTime\" in 24-hour HH:MM \
         format, and \"activity\") and \"reasoning\" (a short, encouraging message \
         explaining why this schedule works for them).",
        remaining_topics.join(", ")
    );

    match stats {
        Some(s) if !s.topic_performance.is_empty() => {
            prompt.push_str(
                "\n\nHere is their performance data. Prioritize topics where their accuracy \
                 is lower:\n",
            );
            prompt.push_str(&topic_accuracy_lines(s));
        }
        _ => prompt.push_str(
            "\n\nSince there's no performance data, create a balanced schedule covering all \
             topics.",
        ),
    }
    prompt
}

fn chat_system_instruction(sections: &[Section]) -> Result<String> {
    let summary: Vec<Value> = sections
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "title": s.title,
                "topics": s.topic_names(),
            })
        })
        .collect();

    Ok(format!(
        "You are 'Lex', an encouraging and intelligent AI study buddy for Sanskrit. Your \
         student sometimes struggles with motivation. Your personality is sharp, modern, \
         supportive, and proactive.\n\n\
         **Core Directives:**\n\
         1. Be a proactive guide: don't just answer questions, suggest next steps.\n\
         2. Always be encouraging. Praise effort.\n\
         3. Simplify everything into small, manageable pieces.\n\
         4. Strictly Sanskrit: if the user strays off topic, gently guide them back using \
         the 'answer_only' command.\n\
         5. Plain text only: no markdown in responseText.\n\n\
         Respond with a JSON object with keys \"responseText\" (the conversational reply) \
         and \"command\" (an object with key \"name\", one of \"navigate\", \"generate\", \
         \"open_modal\", \"answer_only\"; for \"navigate\" add \"sectionId\"; for \
         \"generate\" add \"studyMode\" (one of \"flashcards\", \"quiz\", \"learn\", \
         \"memory_palace\") and \"topic\" (an exact match from the available topics); for \
         \"open_modal\" add \"modal\" (\"stats\" or \"syllabus\")).\n\n\
         AVAILABLE SYLLABUS CONTEXT:\n{}",
        serde_json::to_string_pretty(&summary)?
    ))
}

impl ContentGenerator for GeminiGenerator {
    fn generate(
        &self,
        mode: StudyMode,
        topic: &str,
        files: &[StudyFile],
        custom_instructions: Option<&str>,
    ) -> Result<GeneratedItems> {
        let base = match mode {
            StudyMode::Flashcards => flashcards_prompt(topic),
            StudyMode::Quiz => quiz_prompt(topic),
            StudyMode::Learn => learn_prompt(topic),
            StudyMode::MemoryPalace => memory_palace_prompt(topic),
        };
        let mut prompt = with_custom_instructions(base, custom_instructions);
        grounding_note(&mut prompt, files);
        let parts = build_parts(prompt, files);

        let items = match mode {
            StudyMode::Flashcards => {
                GeneratedItems::Flashcards(self.request_json::<Vec<Flashcard>>(parts, None)?)
            }
            StudyMode::Quiz => {
                GeneratedItems::Quiz(self.request_json::<Vec<QuizQuestion>>(parts, None)?)
            }
            StudyMode::Learn => {
                GeneratedItems::Learn(self.request_json::<Vec<LearningStep>>(parts, None)?)
            }
            StudyMode::MemoryPalace => GeneratedItems::MemoryPalace(
                self.request_json::<Vec<MemoryPalaceStep>>(parts, None)?,
            ),
        };

        validate_items(&items)?;
        log::info!(
            "gemini: generated {} {} items for topic '{}'",
            items.len(),
            mode.label(),
            topic
        );
        Ok(items)
    }

    fn analyze_syllabus(&self, files: &[StudyFile]) -> Result<Vec<Section>> {
        let prompt = "You are a curriculum analysis expert for Sanskrit. Read the following \
             syllabus document(s) and extract the Sanskrit curriculum into structured JSON.\n\
             - Create logical sections (e.g., Grammar, Literature).\n\
             - For each section, identify main topics, and list any sub-topics under their \
             parent topic (e.g., under \"समासः (Samas)\" list types like \"तत्पुरुषः\").\n\
             - Ignore general instructions, exam rules, or non-Sanskrit content.\n\
             Respond with a JSON array of objects with keys \"id\" (a short unique \
             identifier like 'A'), \"title\" (English), \"nativeTitle\" (Sanskrit, or the \
             title again if not applicable), \"description\" (one sentence), and \"topics\" \
             (an array of objects with keys \"name\" and optional \"subTopics\", an array \
             of strings)."
            .to_string();
        let parts = build_parts(prompt, files);

        let sections: Vec<Section> = self.request_json(parts, None)?;
        if sections.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(sections)
    }

    fn solve_doubt(&self, question: &str, files: &[StudyFile]) -> Result<String> {
        let mut prompt = format!(
            "You are 'Lex', a sharp and friendly AI tutor for Sanskrit. A student has a \
             question. Answer them clearly and encouragingly. Start with a positive \
             affirmation like 'Great question!' or 'Let's break that down!'. Break the \
             answer into small, easy-to-understand steps. Use simple language and \
             analogies. Do not use markdown. Here is their question: \"{question}\"."
        );
        if !files.is_empty() {
            prompt.push_str(
                "\n\nBase your answer on the study materials they've uploaded:",
            );
        }
        let parts = build_parts(prompt, files);
        self.request(parts, None, false)
    }

    fn estimate_time(
        &self,
        remaining_topics: &[String],
        stats: Option<&UserStats>,
        style: LearningStyle,
    ) -> Result<TimeEstimate> {
        let mut prompt = format!(
            "As an expert academic coach, estimate the time required for a student to learn \
             the following remaining Sanskrit topics: {}.\n\n{}",
            remaining_topics.join(", "),
            style.prompt_description()
        );

        match stats {
            Some(s) => {
                prompt.push_str("\n\n");
                prompt.push_str(&stats_summary(s));
            }
            None => prompt.push_str("\n\nAssume an average learning pace for a student."),
        }

        prompt.push_str(
            "\n\nProvide a realistic and encouraging estimate in a concise format (e.g., \
             'approx. 8-10 hours', 'about 2-3 focused evenings'). This is a single subject \
             among others, so avoid long estimations like '3-4 weeks'. Respond with a JSON \
             object with keys \"timeEstimate\" and \"reasoning\" (a short, encouraging \
             explanation tailored to the student's learning style).",
        );

        self.request_json(vec![json!({ "text": prompt })], None)
    }

    fn propose_schedule(
        &self,
        remaining_topics: &[String],
        stats: Option<&UserStats>,
        start: &str,
        end: &str,
    ) -> Result<OptimizedSchedule> {
        let prompt = schedule_prompt(remaining_topics, stats, start, end);
        let schedule: OptimizedSchedule =
            self.request_json(vec![json!({ "text": prompt })], None)?;
        if schedule.items.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(schedule)
    }

    fn revise_schedule(
        &self,
        current: &OptimizedSchedule,
        request: &str,
    ) -> Result<OptimizedSchedule> {
        let prompt = format!(
            "You are an adaptive schedule assistant. A user wants to modify their study \
             schedule. Analyze the user's request and adapt your response tone to match \
             theirs.\n\nHere is the current schedule in JSON format:\n{}\n\nHere is their \
             request: \"{request}\"\n\nModify the schedule to accommodate the request. If \
             they ask for a break, add an item with the activity \"Break\"; if they want to \
             move a session, adjust the times. Respond with the ENTIRE updated schedule as a \
             JSON object with keys \"schedule\" (same item format as above) and \
             \"reasoning\" (a confirmation of the change, mirroring the user's style).",
            serde_json::to_string(&current.items)?
        );

        let revised: OptimizedSchedule =
            self.request_json(vec![json!({ "text": prompt })], None)?;
        if revised.items.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        Ok(revised)
    }

    fn chat(&self, input: &str, sections: &[Section]) -> Result<AssistantReply> {
        let system = chat_system_instruction(sections)?;
        let prompt = format!("User's message: \"{input}\"");
        self.request_json(vec![json!({ "text": prompt })], Some(&system))
    }
}
