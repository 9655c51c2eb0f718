// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, build the Gemini client and hand
//   it to the UI loop.
// - Returns `anyhow::Result` so terminal I/O failures end the program.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use gemini_blog_cli::api::GeminiClient;
use gemini_blog_cli::config::{Config, API_KEY_VAR};
use gemini_blog_cli::format;
use gemini_blog_cli::ui::{run_session, TerminalInput};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let mut stdout = io::stdout();
    // Not every terminal supports clearing; carry on without it.
    let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
    println!("{}", format::banner());

    let Some(client) = setup_gemini() else {
        println!(
            "{}",
            format::error("Failed to initialize Gemini API. Please check your configuration.")
        );
        println!("{}", format::info("Make sure you have:"));
        println!("   • Created a .env file in your project directory");
        println!("   • Added your {} to the .env file", API_KEY_VAR);
        println!("   • Or exported {} in your shell", API_KEY_VAR);
        return Ok(());
    };

    println!("{}", format::separator());
    println!("{}", "🎉 Ready to generate amazing blog content!".green().bold());
    println!("{}", format::separator());

    let summary = run_session(&mut TerminalInput, &client, &mut stdout)?;
    stdout.flush()?;
    info!(generated = summary.generated, exit = ?summary.exit, "session ended");
    Ok(())
}

fn setup_gemini() -> Option<GeminiClient> {
    println!("{}", format::info("Setting up Gemini AI..."));
    let client = Config::from_env().and_then(|cfg| GeminiClient::new(&cfg));
    match client {
        Ok(client) => {
            println!("{}", format::success("Gemini AI configured successfully!"));
            Some(client)
        }
        Err(e) => {
            println!("{}", format::error(&format!("Error setting up Gemini API: {}", e)));
            None
        }
    }
}
