use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;

use abhyasa::auth::User;
use abhyasa::gateway::GeminiGenerator;
use abhyasa::syllabus::StudyFile;

/// Shared application state for CLI commands
pub struct App {
    pub core: abhyasa::App,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let core = match data_dir {
            Some(dir) => abhyasa::App::open(dir),
            None => abhyasa::App::open_default()
                .context("Failed to resolve the data directory")?,
        };
        Ok(Self { core })
    }

    pub fn require_user(&self) -> Result<User> {
        self.core
            .auth
            .check_session()
            .context("Not signed in. Run 'abhyasa login <username> <password>' first")
    }

    /// Build the Gemini client; requires GEMINI_API_KEY.
    pub fn generator(&self) -> Result<GeminiGenerator> {
        GeminiGenerator::from_env()
            .context("Set GEMINI_API_KEY to use AI-backed commands")
    }
}

/// Load study files from disk. Text formats are kept as-is; binary formats
/// are base64-encoded for upload.
pub fn load_study_files(paths: &[PathBuf]) -> Result<Vec<StudyFile>> {
    paths.iter().map(|p| load_study_file(p)).collect()
}

fn load_study_file(path: &Path) -> Result<StudyFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime_type = mime_for(path);

    let content = if mime_type.starts_with("text/") {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        base64::engine::general_purpose::STANDARD.encode(bytes)
    };

    Ok(StudyFile::new(name, mime_type, content))
}

fn mime_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("md") => "text/markdown",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("doc") | Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("ppt") | Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        _ => "text/plain",
    }
    .to_string()
}
