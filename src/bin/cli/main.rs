mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "abhyasa", about = "Sanskrit study assistant CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    Flashcards,
    Quiz,
    Learn,
    MemoryPalace,
}

impl From<ModeArg> for abhyasa::session::StudyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flashcards => Self::Flashcards,
            ModeArg::Quiz => Self::Quiz,
            ModeArg::Learn => Self::Learn,
            ModeArg::MemoryPalace => Self::MemoryPalace,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StyleArg {
    Memorization,
    Understanding,
    Mastery,
}

impl From<StyleArg> for abhyasa::gateway::LearningStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Memorization => Self::Memorization,
            StyleArg::Understanding => Self::Understanding,
            StyleArg::Mastery => Self::Mastery,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account and sign in
    Signup {
        username: String,
        password: String,
    },

    /// Sign in to an existing account
    Login {
        username: String,
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Syllabus inspection and management
    #[command(subcommand)]
    Syllabus(SyllabusCommand),

    /// Completed-topic tracking
    #[command(subcommand)]
    Progress(ProgressCommand),

    /// Show study statistics
    Stats,

    /// Estimate time to finish the remaining topics
    Estimate {
        /// How the student wants to learn
        #[arg(long, default_value = "understanding")]
        style: StyleArg,
    },

    /// Run an interactive study session
    Study {
        mode: ModeArg,
        topic: String,
        /// Study material to ground generation in (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,
        /// Extra instructions for the generator
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Ask a free-form question
    Doubt {
        question: String,
        /// Study material to ground the answer in (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },

    /// Study schedules: propose, revise, apply
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// One chat turn with the study assistant
    Chat {
        message: String,
    },
}

#[derive(Subcommand)]
enum SyllabusCommand {
    /// Show sections and topics with completion marks
    Show,

    /// Replace the syllabus with one extracted from documents
    Analyze {
        /// Syllabus documents (text, PDF, or images)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Restore the built-in default syllabus
    Reset,
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// List topics with completion marks
    List,

    /// Flip a topic between done and not done
    Toggle {
        topic: String,
    },

    /// Clear all completed topics
    Clear,
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// Show the current schedule (and any pending revision)
    Show,

    /// Generate a schedule for the remaining topics
    Propose {
        /// Start of the study window, e.g. "Saturday 9am" or "2026-08-29 09:00"
        start: String,
        /// End of the study window
        end: String,
    },

    /// Ask for a change to the current schedule (previewed, not applied)
    Revise {
        request: String,
    },

    /// Apply the pending revision
    Apply,

    /// Discard the pending revision
    Discard,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && stdout_is_tty();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Signup { username, password } => {
            commands::auth::run_signup(&app, &username, &password)?;
        }
        Command::Login { username, password } => {
            commands::auth::run_login(&app, &username, &password)?;
        }
        Command::Logout => commands::auth::run_logout(&app),
        Command::Whoami => commands::auth::run_whoami(&app),
        Command::Syllabus(subcmd) => match subcmd {
            SyllabusCommand::Show => {
                commands::syllabus::run_show(&app, &cli.format, use_color)?;
            }
            SyllabusCommand::Analyze { files } => {
                commands::syllabus::run_analyze(&app, &files, use_color)?;
            }
            SyllabusCommand::Reset => {
                commands::syllabus::run_reset(&app, use_color)?;
            }
        },
        Command::Progress(subcmd) => match subcmd {
            ProgressCommand::List => {
                commands::progress::run_list(&app, &cli.format, use_color)?;
            }
            ProgressCommand::Toggle { topic } => {
                commands::progress::run_toggle(&app, &topic, use_color)?;
            }
            ProgressCommand::Clear => {
                commands::progress::run_clear(&app)?;
            }
        },
        Command::Stats => commands::stats::run(&app, &cli.format, use_color)?,
        Command::Estimate { style } => {
            commands::estimate::run(&app, style.into(), use_color)?;
        }
        Command::Study { mode, topic, files, instructions } => {
            commands::study::run(&app, mode.into(), &topic, &files, instructions.as_deref(), use_color)?;
        }
        Command::Doubt { question, files } => {
            commands::doubt::run(&app, &question, &files)?;
        }
        Command::Schedule(subcmd) => match subcmd {
            ScheduleCommand::Show => {
                commands::schedule::run_show(&app, &cli.format, use_color)?;
            }
            ScheduleCommand::Propose { start, end } => {
                commands::schedule::run_propose(&app, &start, &end, use_color)?;
            }
            ScheduleCommand::Revise { request } => {
                commands::schedule::run_revise(&app, &request, use_color)?;
            }
            ScheduleCommand::Apply => {
                commands::schedule::run_apply(&app, use_color)?;
            }
            ScheduleCommand::Discard => {
                commands::schedule::run_discard(&app)?;
            }
        },
        Command::Chat { message } => commands::chat::run(&app, &message, use_color)?,
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn stdout_is_tty() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
