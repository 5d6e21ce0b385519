//! Turns messages into transcript entries.
//!
//! Message text is untrusted (it comes from the user or from the endpoint), so
//! it is always escaped before it is spliced into entry markup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, TimeZone};

use crate::models::{Entry, Message, Role, GREETING, GREETING_STAMP};
use crate::transcript::TranscriptView;

const USER_AVATAR: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor"><path d="M12 12c2.21 0 4-1.79 4-4s-1.79-4-4-4-4 1.79-4 4 1.79 4 4 4zm0 2c-2.67 0-8 1.34-8 4v2h16v-2c0-2.66-5.33-4-8-4z"/></svg>"#;

const BOT_AVATAR: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor"><path d="M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm0 18c-4.42 0-8-3.58-8-8s3.58-8 8-8 8 3.58 8 8-3.58 8-8 8z"/></svg>"#;

/// Source of "now". Injected so rendering stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Replaces markup-significant characters with entities. The escaped string
/// displays exactly like the input but can never open a tag or attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 24-hour `HH:MM`, zero padded, in the time zone the value carries.
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

fn avatar(role: Role) -> &'static str {
    match role {
        Role::User => USER_AVATAR,
        Role::Bot => BOT_AVATAR,
    }
}

/// Full markup of one transcript entry.
pub fn entry_html(message: &Message, stamp: &str) -> String {
    let role = message.role.as_str();
    format!(
        "<div class=\"message-group {role}-message\">\
         <div class=\"message-avatar {role}\">{avatar}</div>\
         <div class=\"message-content\">\
         <div class=\"message {role}\"><p>{text}</p></div>\
         <span class=\"message-time\">{stamp}</span>\
         </div></div>",
        avatar = avatar(message.role),
        text = escape_html(&message.text),
        stamp = escape_html(stamp),
    )
}

/// Appends escaped, time-stamped entries to a transcript view.
///
/// Touches nothing besides the view and the clock it was built with.
#[derive(Clone)]
pub struct Renderer {
    view: Arc<dyn TranscriptView>,
    clock: Arc<dyn Clock>,
    next_seq: Arc<AtomicU64>,
}

impl Renderer {
    pub fn new(view: Arc<dyn TranscriptView>, clock: Arc<dyn Clock>) -> Self {
        Self {
            view,
            clock,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    fn build(&self, message: Message, stamp: String) -> Entry {
        let html = entry_html(&message, &stamp);
        Entry {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            message,
            stamp,
            html,
        }
    }

    /// Renders `text` as a `role` entry after every existing entry and scrolls
    /// the view to it.
    pub fn append(&self, text: &str, role: Role) -> Entry {
        let stamp = format_time(&self.clock.now());
        let entry = self.build(Message::new(role, text), stamp);
        self.view.push(entry.clone());
        self.view.scroll_to_latest();
        entry
    }

    /// Starts a new chat: the view is replaced by the greeting alone.
    pub fn reset(&self) -> Entry {
        let entry = self.build(Message::bot(GREETING), GREETING_STAMP.to_string());
        self.view.replace_all(entry.clone());
        self.view.scroll_to_latest();
        entry
    }
}
