use anyhow::Result;

use abhyasa::gateway::{AssistantCommand, ContentGenerator};

use crate::app::App;
use crate::render::terminal;

pub fn run(app: &App, message: &str, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.sections(&user.username);

    let reply = app.generator()?.chat(message, &sections)?;
    println!("{}", reply.response_text);

    if let Some(hint) = command_hint(reply.command.as_ref()) {
        println!();
        println!("{}", terminal::dim(&hint, use_color));
    }
    Ok(())
}

/// Translate the assistant's intent into the command the user would run.
fn command_hint(command: Option<&AssistantCommand>) -> Option<String> {
    match command? {
        AssistantCommand::Navigate { section_id } => {
            Some(format!("See section [{}] in 'abhyasa syllabus show'.", section_id))
        }
        AssistantCommand::Generate { study_mode, topic } => Some(format!(
            "Try: abhyasa study {} \"{}\"",
            study_mode.label(),
            topic
        )),
        AssistantCommand::OpenModal { modal } => match modal.as_str() {
            "stats" => Some("Try: abhyasa stats".to_string()),
            "syllabus" => Some("Try: abhyasa syllabus show".to_string()),
            _ => None,
        },
        AssistantCommand::AnswerOnly => None,
    }
}
