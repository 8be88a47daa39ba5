//! Line-oriented front end: home screen, lesson pages and profile rendering.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use culture_core::lesson::{CompletionRoute, PageView};
use culture_core::model::{ModuleOrdinal, UserId};
use services::{
    AppServices, LessonError, LessonSession, NarrationUnavailable, Narrator, NarratorFactory,
    OpenedModule, ProfileOverview, SessionStep,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

/// Prints utterances instead of speaking them. An utterance counts as playing
/// until the next stop.
#[derive(Default)]
pub struct ConsoleNarrator {
    speaking: AtomicBool,
}

impl Narrator for ConsoleNarrator {
    fn speak(&self, text: &str, _flush: bool) {
        self.speaking.store(true, Ordering::SeqCst);
        println!("  (narrating) {text}");
    }

    fn stop(&self) {
        self.speaking.store(false, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    fn shutdown(&self) {
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNarration;

impl NarratorFactory for ConsoleNarration {
    fn create(&self) -> Result<Arc<dyn Narrator>, NarrationUnavailable> {
        let narrator: Arc<dyn Narrator> = Arc::new(ConsoleNarrator::default());
        Ok(narrator)
    }
}

async fn prompt(input: &mut Input, label: &str) -> io::Result<Option<String>> {
    print!("{label} ");
    io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_owned()))
}

/// Runs the home screen until the user quits or stdin closes.
///
/// # Errors
///
/// Returns `io::Error` if the terminal cannot be read or written.
pub async fn run_home(app: &AppServices, user: &UserId) -> io::Result<()> {
    let dispatcher = app.dispatcher();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let overall = dispatcher.overall_progress(user).await;
        println!();
        println!("Home  [{:>3.0}% grown]", overall.fraction() * 100.0);
        for entry in dispatcher.entries() {
            println!("  {}. {}", entry.ordinal, entry.key);
        }

        let Some(choice) = prompt(&mut input, "open module (q to quit):").await? else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let Some(ordinal) = choice
            .parse::<u32>()
            .ok()
            .and_then(|value| ModuleOrdinal::new(value).ok())
        else {
            println!("unknown choice: {choice}");
            continue;
        };

        let OpenedModule { mut session, writes } = match dispatcher.open_module(user, ordinal) {
            Ok(opened) => opened,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        // The lesson is already on screen; failures show up whenever the store answers.
        tokio::spawn(async move {
            let writes = writes.settled().await;
            if let Err(err) = writes.completed_module {
                println!("\n  Error updating progress: {err}");
            }
            if let Err(err) = writes.module_progress {
                println!("\n  {err}");
            }
        });

        if !run_lesson(&mut session, &mut input).await? {
            return Ok(());
        }
    }
}

/// Returns `false` when stdin closed during the lesson.
async fn run_lesson(session: &mut LessonSession, input: &mut Input) -> io::Result<bool> {
    render_page(&session.view());
    if !session.narration_available() {
        println!("  (narration unavailable)");
    }

    loop {
        let Some(command) = prompt(input, "[n]ext [p]revious [r]ead [q]uit:").await? else {
            session.exit();
            return Ok(false);
        };

        let step = match command.as_str() {
            "n" => session.next(),
            "p" => session.previous(),
            "r" => session.read_aloud().map(|()| SessionStep::Unchanged),
            "q" => {
                session.exit();
                return Ok(true);
            }
            other => {
                println!("unknown command: {other}");
                continue;
            }
        };

        match step {
            Ok(SessionStep::Page(view)) => render_page(&view),
            Ok(SessionStep::Unchanged) => {}
            Ok(SessionStep::Celebrating) => {
                println!("  *** well done! ***");
                let outcome = match session.await_celebration().await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                println!("{}", outcome.message);
                if let Err(err) = outcome.completed_module {
                    println!("Error updating progress: {err}");
                }
                match outcome.route {
                    CompletionRoute::Stay => {
                        // The message stays up until the user leaves.
                        let _ = prompt(input, "press enter to return home").await?;
                        return Ok(true);
                    }
                    CompletionRoute::ReturnToCaller | CompletionRoute::NavigateHome => {
                        return Ok(true);
                    }
                }
            }
            Err(LessonError::NarrationUnavailable(err)) => println!("  ({err})"),
            Err(err) => println!("{err}"),
        }
    }
}

fn render_page(view: &PageView) {
    println!();
    println!("{}", view.text);
    println!();
    println!(
        "  {}   {}{}",
        view.indicator,
        if view.previous_enabled { "[previous] " } else { "" },
        view.advance
    );
}

pub fn print_profile(user: &UserId, overview: &ProfileOverview) {
    println!("Profile for {user}");
    match &overview.selected_country {
        Some(country) => println!("Country: {country}"),
        None => println!("Country: not selected"),
    }
    if overview.is_empty() {
        println!("No module progress recorded yet.");
        return;
    }
    for entry in &overview.modules {
        println!("  {:<10} {}", entry.module.as_str(), entry.percent);
    }
}
