use anyhow::Result;

use crate::app::App;

pub fn run_signup(app: &App, username: &str, password: &str) -> Result<()> {
    let user = app.core.auth.sign_up(username, password)?;
    println!("Account created. Signed in as {}.", user.username);
    print_welcome_once(app, &user.username);
    Ok(())
}

pub fn run_login(app: &App, username: &str, password: &str) -> Result<()> {
    let user = app.core.auth.log_in(username, password)?;
    println!("Signed in as {}.", user.username);
    print_welcome_once(app, &user.username);
    Ok(())
}

pub fn run_logout(app: &App) {
    app.core.auth.log_out();
    println!("Signed out.");
}

pub fn run_whoami(app: &App) {
    match app.core.auth.check_session() {
        Some(user) => println!("{}", user.username),
        None => println!("Not signed in."),
    }
}

fn print_welcome_once(app: &App, username: &str) {
    if app.core.syllabus.has_seen_welcome(username) {
        return;
    }
    println!();
    println!("Welcome to Abhyasa! A default Sanskrit syllabus is loaded.");
    println!("  abhyasa syllabus show        see sections and topics");
    println!("  abhyasa study quiz <topic>   run a quick quiz (needs GEMINI_API_KEY)");
    println!("  abhyasa progress toggle ...  mark topics done");
    app.core.syllabus.mark_welcome_seen(username);
}
