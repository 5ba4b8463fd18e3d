use std::path::PathBuf;

use anyhow::Result;

use abhyasa::gateway::ContentGenerator;

use crate::app::{load_study_files, App};

pub fn run(app: &App, question: &str, files: &[PathBuf]) -> Result<()> {
    app.require_user()?;
    let uploads = load_study_files(files)?;
    let answer = app.generator()?.solve_doubt(question, &uploads)?;
    println!("{}", answer);
    Ok(())
}
