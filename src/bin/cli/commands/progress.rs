use anyhow::Result;

use abhyasa::syllabus::all_topic_names;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.sections(&user.username);
    let completed = app.core.progress.completed(&user.username);
    let all = all_topic_names(&sections);
    let done = all.iter().filter(|t| completed.contains(*t)).count();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&completed)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_sections(&sections, &completed, use_color));
            println!();
            println!("{}/{} topics done.", done, all.len());
        }
    }
    Ok(())
}

pub fn run_toggle(app: &App, topic: &str, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let completed = app.core.progress.toggle(&user.username, topic);
    if completed.contains(topic) {
        println!("{} {}", terminal::green("[x]", use_color), topic);
    } else {
        println!("[ ] {}", topic);
    }
    Ok(())
}

pub fn run_clear(app: &App) -> Result<()> {
    let user = app.require_user()?;
    app.core.progress.clear(&user.username);
    println!("Progress cleared.");
    Ok(())
}
