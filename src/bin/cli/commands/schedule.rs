use anyhow::Result;

use abhyasa::gateway::ContentGenerator;
use abhyasa::syllabus::all_topic_names;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let accepted = app.core.schedule.accepted(&user.username);
    let pending = app.core.schedule.pending(&user.username);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "accepted": accepted,
                    "pending": pending,
                }))?
            );
        }
        OutputFormat::Plain => {
            match &accepted {
                Some(schedule) => println!("{}", terminal::render_schedule(schedule, use_color)),
                None => println!("No schedule yet. Run 'abhyasa schedule propose <start> <end>'."),
            }
            if let Some(schedule) = &pending {
                println!();
                println!("{}", terminal::bold("Pending revision (not applied):", use_color));
                println!("{}", terminal::render_schedule(schedule, use_color));
                println!();
                println!("Run 'abhyasa schedule apply' or 'abhyasa schedule discard'.");
            }
        }
    }
    Ok(())
}

pub fn run_propose(app: &App, start: &str, end: &str, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let sections = app.core.syllabus.sections(&user.username);
    let completed = app.core.progress.completed(&user.username);
    let remaining: Vec<String> = all_topic_names(&sections)
        .into_iter()
        .filter(|t| !completed.contains(t))
        .collect();
    if remaining.is_empty() {
        println!("Everything is done. Nothing to schedule!");
        return Ok(());
    }

    let stats = app.core.stats.stats(&user.username);
    let has_history = !stats.topic_performance.is_empty();
    println!("Generating a schedule for {} topic(s)...", remaining.len());
    let proposed = app.generator()?.propose_schedule(
        &remaining,
        if has_history { Some(&stats) } else { None },
        start,
        end,
    )?;

    if app.core.schedule.accepted(&user.username).is_none() {
        let accepted = app.core.schedule.accept_initial(&user.username, proposed)?;
        println!("{}", terminal::render_schedule(&accepted, use_color));
        return Ok(());
    }

    let pending = app.core.schedule.propose(&user.username, proposed)?;
    println!("{}", terminal::render_schedule(&pending, use_color));
    println!();
    println!("This replaces your current schedule once you run 'abhyasa schedule apply'.");
    Ok(())
}

pub fn run_revise(app: &App, request: &str, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let current = app
        .core
        .schedule
        .accepted(&user.username)
        .ok_or(abhyasa::schedule::ScheduleError::NoSchedule)?;

    let revised = app.generator()?.revise_schedule(&current, request)?;
    let pending = app.core.schedule.propose(&user.username, revised)?;

    println!("{}", terminal::render_schedule(&pending, use_color));
    println!();
    println!("Preview only. Run 'abhyasa schedule apply' to make it your schedule.");
    Ok(())
}

pub fn run_apply(app: &App, use_color: bool) -> Result<()> {
    let user = app.require_user()?;
    let applied = app.core.schedule.apply(&user.username)?;
    println!("{}", terminal::render_schedule(&applied, use_color));
    println!();
    println!("Schedule updated.");
    Ok(())
}

pub fn run_discard(app: &App) -> Result<()> {
    let user = app.require_user()?;
    app.core.schedule.discard(&user.username);
    println!("Pending revision discarded.");
    Ok(())
}
