use std::io::Write;

use chat_widget::{Entry, InputField, Notifier, Role, TranscriptView};
use tracing::warn;

const PROMPT: &str = "> ";

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Send(&'a str),
    NewChat,
    Quit,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => Command::Quit,
            "/new" => Command::NewChat,
            _ => Command::Send(line),
        }
    }
}

/// Replaces control characters other than `\n` so message text can't move
/// the cursor or restyle the terminal.
pub fn strip_controls(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && c != '\n' { '\u{FFFD}' } else { c })
        .collect()
}

/// One printed transcript line, e.g. `[09:05] you: Hello`.
pub fn format_line(entry: &Entry) -> String {
    let who = match entry.role() {
        Role::User => "you",
        Role::Bot => "bot",
    };
    format!("[{}] {who}: {}", entry.stamp, strip_controls(entry.text()))
}

pub fn prompt() {
    let mut out = std::io::stdout().lock();
    if let Err(e) = write!(out, "{PROMPT}").and_then(|_| out.flush()) {
        warn!("Failed to write prompt: {e}");
    }
}

/// Prints entries as they arrive. Replies can land while the user is at the
/// prompt, so every line starts by returning the cursor to column zero.
pub struct ConsoleView;

impl TranscriptView for ConsoleView {
    fn push(&self, entry: Entry) {
        println!("\r{}", format_line(&entry));
    }

    fn scroll_to_latest(&self) {
        prompt();
    }

    fn replace_all(&self, entry: Entry) {
        println!("\r--- new chat ---");
        self.push(entry);
    }
}

/// Reading a line from stdin already consumes it.
pub struct ConsoleInput;

impl InputField for ConsoleInput {
    fn clear(&self) {}
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &str) {
        eprintln!("\r! {notice}");
    }
}
