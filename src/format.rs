// Output formatting: the banner, status lines and the generated paragraph
// block. Everything here builds strings; printing is left to the caller.

use chrono::{Local, NaiveDateTime};
use crossterm::style::Stylize;

/// Column the paragraph body is wrapped to, indent included.
pub const WRAP_WIDTH: usize = 70;
pub const BODY_INDENT: &str = "  ";
pub const SEPARATOR_WIDTH: usize = 60;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn banner() -> String {
    let art = "\
╔══════════════════════════════════════════════════════════════╗
║                    🤖 AI Blog Generator 📝                   ║
║                   Powered by Google Gemini                   ║
╚══════════════════════════════════════════════════════════════╝";
    format!("\n{}\n", art.magenta().bold())
}

pub fn separator() -> String {
    "─".repeat(SEPARATOR_WIDTH).cyan().to_string()
}

pub fn success(msg: &str) -> String {
    format!("✅ {}", msg).green().to_string()
}

pub fn info(msg: &str) -> String {
    format!("ℹ️  {}", msg).blue().to_string()
}

pub fn warning(msg: &str) -> String {
    format!("⚠️  {}", msg).yellow().to_string()
}

pub fn error(msg: &str) -> String {
    format!("❌ {}", msg).red().to_string()
}

/// Greedy word wrap. Every line starts with `indent` and is at most `width`
/// columns wide. A word longer than a whole line fills the rest of the
/// current line and continues on the next. Runs of whitespace collapse to
/// one space.
pub fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let avail = width.saturating_sub(indent.chars().count()).max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            let sep = usize::from(line_len > 0);
            if line_len + sep + word_len <= avail {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_len += sep + word_len;
                break;
            }
            let room = avail.saturating_sub(line_len + sep);
            if word_len <= avail || room == 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            // room <= avail < word_len, so the tail is never empty
            let split = word
                .char_indices()
                .nth(room)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(&word[..split]);
            lines.push(std::mem::take(&mut line));
            line_len = 0;
            word = &word[split..];
        }
    }
    if line_len > 0 {
        lines.push(line);
    }

    lines
        .iter()
        .map(|l| format!("{}{}", indent, l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decorate a generated paragraph, stamped with the current local time.
pub fn format_blog_output(content: &str, topic: &str) -> String {
    format_blog_output_at(content, topic, &Local::now().naive_local())
}

pub fn format_blog_output_at(content: &str, topic: &str, at: &NaiveDateTime) -> String {
    let header = "\
╭─────────────────────────────────────────────────────────────╮
│  📖 Generated Blog Paragraph                                │
╰─────────────────────────────────────────────────────────────╯";
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let body = wrap_text(content, WRAP_WIDTH, BODY_INDENT);

    format!(
        "\n{}\n\n{} {}\n{} {}\n\n{}\n\n{}\n",
        header.magenta().bold(),
        "Topic:".blue().bold(),
        topic.cyan(),
        "Generated at:".blue().bold(),
        timestamp.yellow(),
        body.green(),
        separator(),
    )
}
