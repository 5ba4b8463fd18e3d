use anyhow::Result;

use abhyasa::gateway::{ContentGenerator, LearningStyle};
use abhyasa::syllabus::all_topic_names;

use crate::app::App;
use crate::render::terminal;

pub fn run(app: &App, style: LearningStyle, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.sections(&user.username);
    let completed = app.core.progress.completed(&user.username);

    let remaining: Vec<String> = all_topic_names(&sections)
        .into_iter()
        .filter(|t| !completed.contains(t))
        .collect();
    if remaining.is_empty() {
        println!("Everything is done. Nothing left to estimate!");
        return Ok(());
    }

    let stats = app.core.stats.stats(&user.username);
    let has_history = stats.total_sessions > 0;
    let estimate = app.generator()?.estimate_time(
        &remaining,
        if has_history { Some(&stats) } else { None },
        style,
    )?;

    println!("{}", terminal::bold(&estimate.time_estimate, use_color));
    println!("{}", terminal::dim(&estimate.reasoning, use_color));
    Ok(())
}
