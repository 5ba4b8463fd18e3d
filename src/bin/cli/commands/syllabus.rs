use std::path::PathBuf;

use anyhow::Result;

use abhyasa::gateway::ContentGenerator;

use crate::app::{load_study_files, App};
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.sections(&user.username);
    let completed = app.core.progress.completed(&user.username);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_sections(&sections, &completed, use_color));
            if app.core.syllabus.is_custom(&user.username) {
                println!();
                println!("{}", terminal::dim("(custom syllabus; 'abhyasa syllabus reset' restores the default)", use_color));
            }
        }
    }
    Ok(())
}

pub fn run_analyze(app: &App, files: &[PathBuf], use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let uploads = load_study_files(files)?;

    println!("Analyzing {} document(s)...", uploads.len());
    let sections = app.generator()?.analyze_syllabus(&uploads)?;
    app.core.syllabus.set_custom(&user.username, &sections);

    let completed = app.core.progress.completed(&user.username);
    println!("{}", terminal::render_sections(&sections, &completed, use_color));
    println!();
    println!("Syllabus replaced ({} sections).", sections.len());
    Ok(())
}

pub fn run_reset(app: &App, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.reset(&user.username);
    let completed = app.core.progress.completed(&user.username);
    println!("{}", terminal::render_sections(&sections, &completed, use_color));
    println!();
    println!("Default syllabus restored.");
    Ok(())
}
