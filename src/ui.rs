// UI layer: the interactive menu loop. Input comes through `LineSource` and
// output goes to any `Write`, so the whole flow can be replayed in tests with
// scripted answers and a stub generator.

use crate::api::Generator;
use crate::format;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

/// Source of single lines of user input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the terminal with `dialoguer`. Empty answers are accepted so
/// the loop can react to them itself.
pub struct TerminalInput;

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt.cyan().bold().to_string())
            .allow_empty(true)
            .interact_text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Write,
    Quit,
    Exit,
}

impl MenuChoice {
    /// Case-insensitive: `y` writes, `q` quits, anything else exits. The
    /// line is taken as entered, so `" y"` is not `y`.
    pub fn parse(input: &str) -> Self {
        match input.to_uppercase().as_str() {
            "Y" => MenuChoice::Write,
            "Q" => MenuChoice::Quit,
            _ => MenuChoice::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// User chose `Q`; the summary with the count was printed.
    Quit,
    /// Any other menu answer.
    Goodbye,
}

/// What a finished session leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub generated: u32,
    pub exit: ExitReason,
}

#[derive(Debug)]
enum State {
    Ready,
    Generating(String),
    Exited(ExitReason),
}

/// Run the menu loop until the user leaves. The count of successful
/// generations lives only in this call and is returned in the summary.
pub fn run_session<L, G, W>(input: &mut L, generator: &G, out: &mut W) -> Result<SessionSummary>
where
    L: LineSource,
    G: Generator + ?Sized,
    W: Write,
{
    let mut generated: u32 = 0;
    let mut state = State::Ready;

    loop {
        state = match state {
            State::Ready => ready(input, out)?,
            State::Generating(topic) => {
                if generate(generator, &topic, generated + 1, out)? {
                    generated += 1;
                }
                State::Ready
            }
            State::Exited(exit) => {
                match exit {
                    ExitReason::Quit => print_farewell(generated, out)?,
                    ExitReason::Goodbye => writeln!(out, "{}", format::info("Goodbye! 👋"))?,
                }
                out.flush()?;
                return Ok(SessionSummary { generated, exit });
            }
        };
        debug!(?state, generated, "transition");
    }
}

fn ready<L: LineSource, W: Write>(input: &mut L, out: &mut W) -> Result<State> {
    print_menu(out)?;
    out.flush()?;
    let answer = input
        .read_line("🤔 What would you like to do?")
        .context("Failed to read menu choice")?;

    Ok(match MenuChoice::parse(&answer) {
        MenuChoice::Write => {
            let topic = input
                .read_line("💭 What should this paragraph talk about?")
                .context("Failed to read topic")?;
            if topic.trim().is_empty() {
                writeln!(out, "{}", format::warning("Please enter a valid topic!"))?;
                State::Ready
            } else {
                State::Generating(topic)
            }
        }
        MenuChoice::Quit => State::Exited(ExitReason::Quit),
        MenuChoice::Exit => State::Exited(ExitReason::Goodbye),
    })
}

/// Returns whether a paragraph was produced.
fn generate<G, W>(generator: &G, topic: &str, number: u32, out: &mut W) -> Result<bool>
where
    G: Generator + ?Sized,
    W: Write,
{
    writeln!(
        out,
        "{}",
        format::info(&format!("Generating content about: '{}'...", topic))
    )?;
    out.flush()?;

    // The spinner draws to stderr and hides itself when that is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("🔄 Please wait...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = generator.generate(topic);
    spinner.finish_and_clear();

    match result {
        Ok(content) => {
            writeln!(out, "{}", format::format_blog_output(&content, topic))?;
            writeln!(
                out,
                "{}",
                format::success(&format!("Blog paragraph #{} generated successfully!", number))
            )?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}", format::error(&format!("Error generating blog: {}", e)))?;
            Ok(false)
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "Options:".magenta().bold())?;
    writeln!(out, "  {} - Write a new paragraph", "Y".green())?;
    writeln!(out, "  {} - Quit the program", "Q".red())?;
    writeln!(out, "  {} - Exit", "Any other key".yellow())
}

fn print_farewell<W: Write>(generated: u32, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", format::separator())?;
    writeln!(
        out,
        "{}",
        "👋 Thanks for using AI Blog Generator!".magenta().bold()
    )?;
    if generated > 0 {
        let plural = if generated == 1 { "" } else { "s" };
        writeln!(
            out,
            "{}",
            format::success(&format!(
                "You generated {} blog paragraph{} today!",
                generated, plural
            ))
        )?;
    }
    writeln!(out, "{}", "Happy writing! 📝✨".cyan())?;
    writeln!(out, "{}", format::separator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choice_is_case_insensitive() {
        assert_eq!(MenuChoice::parse("y"), MenuChoice::Write);
        assert_eq!(MenuChoice::parse("Y"), MenuChoice::Write);
        assert_eq!(MenuChoice::parse("q"), MenuChoice::Quit);
        assert_eq!(MenuChoice::parse("Q"), MenuChoice::Quit);
    }

    #[test]
    fn anything_else_exits() {
        for s in ["", "n", "yes", "quit", "x", " y", "q "] {
            assert_eq!(MenuChoice::parse(s), MenuChoice::Exit, "{s:?}");
        }
    }

    #[test]
    fn farewell_pluralizes() {
        let mut buf = Vec::new();
        print_farewell(1, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("You generated 1 blog paragraph today!"));

        let mut buf = Vec::new();
        print_farewell(3, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("You generated 3 blog paragraphs today!"));
    }

    #[test]
    fn farewell_without_paragraphs_skips_the_count() {
        let mut buf = Vec::new();
        print_farewell(0, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(!s.contains("You generated"));
        assert!(s.contains("Happy writing!"));
    }
}
