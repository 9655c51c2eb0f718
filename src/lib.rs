// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to run the interactive blog generator.
//
// Module responsibilities:
// - `config`: reads the Gemini API key from the environment / `.env`.
// - `error`: the two error kinds (configuration, generation).
// - `api`: prompt template and the blocking Gemini client.
// - `format`: terminal styling and the generated paragraph layout.
// - `ui`: the menu loop, driven through the `Generator` trait.
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod ui;
