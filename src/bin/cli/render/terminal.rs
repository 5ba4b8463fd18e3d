use std::collections::BTreeSet;

use abhyasa::schedule::OptimizedSchedule;
use abhyasa::session::TableChunk;
use abhyasa::stats::UserStats;
use abhyasa::syllabus::Section;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn bold(text: &str, use_color: bool) -> String {
    paint(text, Color::BOLD, use_color)
}

pub fn dim(text: &str, use_color: bool) -> String {
    paint(text, Color::DIM, use_color)
}

pub fn green(text: &str, use_color: bool) -> String {
    paint(text, Color::GREEN, use_color)
}

pub fn red(text: &str, use_color: bool) -> String {
    paint(text, Color::RED, use_color)
}

fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", code, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render syllabus sections with completion marks.
pub fn render_sections(
    sections: &[Section],
    completed: &BTreeSet<String>,
    use_color: bool,
) -> String {
    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!(
            "{} {} {}",
            bold(&format!("[{}]", section.id), use_color),
            bold(&section.title, use_color),
            dim(&section.native_title, use_color),
        ));
        if !section.description.is_empty() {
            lines.push(format!("    {}", dim(&section.description, use_color)));
        }
        for topic in &section.topics {
            lines.push(format!("    {} {}", mark(completed.contains(&topic.name), use_color), topic.name));
            for sub in &topic.sub_topics {
                lines.push(format!("        {} {}", mark(completed.contains(sub), use_color), sub));
            }
        }
        lines.push(String::new());
    }
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn mark(done: bool, use_color: bool) -> String {
    if done {
        green("[x]", use_color)
    } else {
        "[ ]".to_string()
    }
}

/// Render stats as a small summary block.
pub fn render_stats(stats: &UserStats, use_color: bool) -> String {
    let accuracy = match stats.overall_accuracy() {
        Some(a) => format!("{:.0}%", a * 100.0),
        None => "-".to_string(),
    };
    let mut lines = vec![
        format!("Sessions:   {}", stats.total_sessions),
        format!("Quizzes:    {}", stats.quizzes_taken),
        format!("Accuracy:   {} ({}/{})", accuracy, stats.total_correct, stats.total_questions),
        format!("Day streak: {}", stats.streak),
    ];
    if let Some(date) = stats.last_session_date {
        lines.push(format!("Last study: {}", date));
    }

    if !stats.topic_performance.is_empty() {
        lines.push(String::new());
        lines.push(bold("By topic (weakest first):", use_color));
        for score in stats.weakest_topics() {
            let accuracy = match score.accuracy() {
                Some(a) => format!("{:.0}%", a * 100.0),
                None => "-".to_string(),
            };
            lines.push(format!(
                "  {}  {} ({}/{})",
                accuracy, score.topic, score.correct, score.total
            ));
        }
    }
    lines.join("\n")
}

/// Render a schedule grouped by day.
pub fn render_schedule(schedule: &OptimizedSchedule, use_color: bool) -> String {
    let mut lines = Vec::new();
    let mut current_date = None;
    for item in &schedule.items {
        if current_date != Some(item.date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(bold(&item.date.format("%A, %-d %B %Y").to_string(), use_color));
            current_date = Some(item.date);
        }
        lines.push(format!(
            "  {}-{}  {}",
            item.start_time, item.end_time, item.activity
        ));
    }
    if !schedule.reasoning.is_empty() {
        lines.push(String::new());
        lines.push(dim(&schedule.reasoning, use_color));
    }
    lines.join("\n")
}

/// Render a memory-palace table chunk with aligned columns.
pub fn render_table(chunk: &TableChunk) -> String {
    let mut widths: Vec<usize> = chunk.headers.iter().map(|h| h.chars().count()).collect();
    for row in &chunk.rows {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(cell.chars().count());
            } else {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![render_row(&chunk.headers)];
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &chunk.rows {
        lines.push(render_row(row));
    }
    lines.join("\n")
}
