use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

use abhyasa::gateway::{ContentGenerator, GenerationError};
use abhyasa::session::{GenerationGuard, QuizQuestion, StudyMode, StudySession};
use abhyasa::stats::{QuizOutcome, SessionKind};

use crate::app::{load_study_files, App};
use crate::render::terminal;

pub fn run(
    app: &App,
    mode: StudyMode,
    topic: &str,
    files: &[PathBuf],
    instructions: Option<&str>,
    use_color: bool,
) -> Result<()> {
    let user = app.require_user()?;
    let uploads = load_study_files(files)?;
    let generator = app.generator()?;

    // One outstanding generation per session; a failed call releases the
    // guard so the next attempt can start fresh.
    let mut guard = GenerationGuard::new();
    let token = match guard.try_begin() {
        Some(token) => token,
        None => return Err(GenerationError::Busy.into()),
    };

    println!("Generating {} for \"{}\"...", mode.label(), topic);
    let items = match generator.generate(mode, topic, &uploads, instructions) {
        Ok(items) => items,
        Err(e) => {
            guard.cancel();
            return Err(e.into());
        }
    };
    if !guard.accept(token) {
        bail!("Generation was cancelled");
    }

    let mut session = StudySession::new(topic.to_string(), items);
    if session.is_empty() {
        bail!("The model returned no usable content");
    }

    let completed = run_loop(&mut session, use_color)?;
    if !completed {
        println!("Session abandoned; nothing recorded.");
        return Ok(());
    }

    let (kind, outcome) = match session.take_report() {
        Some(report) => {
            println!();
            println!(
                "{}",
                terminal::bold(
                    &format!("Quiz finished: {}/{} correct.", report.score, report.total),
                    use_color,
                )
            );
            (
                SessionKind::Quiz,
                Some(QuizOutcome {
                    topic: report.topic,
                    score: report.score,
                    total: report.total,
                }),
            )
        }
        None => {
            println!();
            println!("Session complete.");
            let kind = match session.mode() {
                StudyMode::Flashcards => SessionKind::Flashcards,
                StudyMode::Quiz => SessionKind::Quiz,
                StudyMode::Learn => SessionKind::Learn,
                StudyMode::MemoryPalace => SessionKind::MemoryPalace,
            };
            (kind, None)
        }
    };

    let stats = app.core.stats.record_session(&user.username, kind, outcome);
    println!("Day streak: {}", stats.streak);
    Ok(())
}

/// Drive the session from stdin. Returns false if the user quit early.
fn run_loop(session: &mut StudySession, use_color: bool) -> Result<bool> {
    while !session.is_finished() {
        println!();
        let position = format!("[{}/{}]", session.index() + 1, session.len());
        match session.mode() {
            StudyMode::Flashcards => {
                let card = match session.current_card() {
                    Some(card) => card.clone(),
                    None => break,
                };
                println!("{} {}", terminal::dim(&position, use_color), card.front);
                if matches!(prompt("  [Enter] flip, (q)uit: ")?.as_str(), "q") {
                    return Ok(false);
                }
                println!("  {}", terminal::bold(&card.back, use_color));
                match prompt("  [Enter] next, (p)rev, (q)uit: ")?.as_str() {
                    "q" => return Ok(false),
                    "p" => session.prev(),
                    _ => {
                        session.next();
                    }
                }
            }
            StudyMode::Quiz => {
                let question = match session.current_question() {
                    Some(q) => q.clone(),
                    None => break,
                };
                println!("{} {}", terminal::dim(&position, use_color), question.question);
                if !ask_question(session, &question, use_color)? {
                    return Ok(false);
                }
            }
            StudyMode::Learn => {
                let step = match session.current_learning_step() {
                    Some(step) => step.clone(),
                    None => break,
                };
                println!("{} {}", terminal::dim(&position, use_color), terminal::bold(&step.concept, use_color));
                println!("  {}", step.example);
                println!("  {}", step.explanation);
                println!("  {}", terminal::dim(&format!("Remember: {}", step.mnemonic), use_color));
                match prompt("  [Enter] next, (p)rev, (q)uit: ")?.as_str() {
                    "q" => return Ok(false),
                    "p" => session.prev(),
                    _ => {
                        session.next();
                    }
                }
            }
            StudyMode::MemoryPalace => {
                let step = match session.current_memory_step() {
                    Some(step) => step.clone(),
                    None => break,
                };
                println!("{} {}", terminal::dim(&position, use_color), terminal::bold(&step.title, use_color));
                println!("  {}", step.explanation);
                if let Some(chunk) = &step.table_chunk {
                    println!();
                    println!("{}", indent(&terminal::render_table(chunk), "  "));
                }
                if let Some(question) = &step.recall_question {
                    println!();
                    println!("  {}", question.question);
                    if !ask_question(session, question, use_color)? {
                        return Ok(false);
                    }
                } else {
                    match prompt("  [Enter] next, (p)rev, (q)uit: ")?.as_str() {
                        "q" => return Ok(false),
                        "p" => session.prev(),
                        _ => {
                            session.next();
                        }
                    }
                }
            }
        }
    }
    Ok(true)
}

/// Present options, read a choice, and lock in the answer. Returns false
/// on quit. Quiz steps auto-advance inside the engine; recall steps need
/// an explicit `next` afterwards.
fn ask_question(
    session: &mut StudySession,
    question: &QuizQuestion,
    use_color: bool,
) -> Result<bool> {
    for (i, option) in question.options.iter().enumerate() {
        println!("    {}) {}", i + 1, option);
    }

    let selected = loop {
        let input = prompt("  Answer (number), (h)int, (q)uit: ")?;
        match input.as_str() {
            "q" => return Ok(false),
            "h" => match &question.hint {
                Some(hint) => println!("  {}", terminal::dim(hint, use_color)),
                None => println!("  No hint for this one."),
            },
            _ => {
                if let Ok(n) = input.parse::<usize>() {
                    if n >= 1 && n <= question.options.len() {
                        break question.options[n - 1].clone();
                    }
                }
                println!("  Pick a number between 1 and {}.", question.options.len());
            }
        }
    };

    let was_memory_step = session.mode() == StudyMode::MemoryPalace;
    match session.select_answer(&selected) {
        Some(true) => println!("  {}", terminal::green("Correct!", use_color)),
        Some(false) => {
            println!(
                "  {} The answer is: {}",
                terminal::red("Not quite.", use_color),
                question.correct_answer
            );
        }
        None => {}
    }
    if !question.explanation.is_empty() {
        println!("  {}", terminal::dim(&question.explanation, use_color));
    }

    if was_memory_step {
        prompt("  [Enter] continue: ")?;
        session.next();
    }
    Ok(true)
}

fn prompt(text: &str) -> Result<String> {
    print!("{}", text);
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        // EOF quits cleanly.
        return Ok("q".to_string());
    }
    Ok(line.trim().to_lowercase())
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|l| format!("{}{}", prefix, l))
        .collect::<Vec<_>>()
        .join("\n")
}
