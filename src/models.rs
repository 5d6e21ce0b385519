use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when the endpoint answers without a usable `reply`.
pub const REPLY_FALLBACK: &str = "I received your message but couldn't generate a response.";

/// Shown when the exchange fails (transport, status, or unparsable body).
pub const ERROR_FALLBACK: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Blocking notice raised for empty or whitespace-only input.
pub const EMPTY_INPUT_NOTICE: &str = "Please enter a message";

/// Opening message of a fresh transcript.
pub const GREETING: &str = "Welcome to CRM Assistant! 👋 I'm here to help you manage customer \
                            relationships, track sales, and optimize your business. \
                            What can I help you with?";

/// Stamp used for the greeting instead of a clock reading.
pub const GREETING_STAMP: &str = "just now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of conversation. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub role: Role,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self { text: text.into(), role }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }
}

/// A message as it sits in the transcript view.
///
/// `seq` only keys view nodes; entries have no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub seq: u64,
    pub message: Message,
    pub stamp: String,
    pub html: String,
}

impl Entry {
    pub fn role(&self) -> Role {
        self.message.role
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }
}

/// Body POSTed to the chat endpoint, built fresh for every send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundRequest {
    pub message: String,
    pub timestamp: String,
}

impl OutboundRequest {
    pub fn new<Tz: TimeZone>(message: impl Into<String>, at: &DateTime<Tz>) -> Self {
        Self {
            message: message.into(),
            timestamp: iso_timestamp(at),
        }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:05:00.000Z`.
pub fn iso_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    at.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// What the endpoint answered with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundReply {
    pub reply: Option<String>,
}

impl InboundReply {
    /// Reads `reply` out of a JSON document. Anything other than an object
    /// carrying a string `reply` yields an empty reply rather than an error;
    /// rejecting a `null` body is left to `transport::parse_reply`.
    pub fn from_value(value: &Value) -> Self {
        let reply = value
            .get("reply")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { reply }
    }

    /// The reply text, or `None` when it is missing or empty.
    pub fn usable_text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(Role::Bot.to_string(), "bot");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
    }

    #[test]
    fn outbound_request_serializes_message_and_timestamp_only() {
        let at = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 11, 5, 0)
            .unwrap();
        let req = OutboundRequest::new("Hello", &at);
        assert_eq!(req.timestamp, "2024-05-01T09:05:00.000Z");

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({ "message": "Hello", "timestamp": "2024-05-01T09:05:00.000Z" })
        );
    }

    #[test]
    fn reply_is_extracted_only_from_string_fields() {
        let ok = InboundReply::from_value(&json!({ "reply": "Hi there" }));
        assert_eq!(ok.usable_text(), Some("Hi there"));

        let missing = InboundReply::from_value(&json!({ "status": "ok" }));
        assert_eq!(missing.usable_text(), None);

        let empty = InboundReply::from_value(&json!({ "reply": "" }));
        assert_eq!(empty.usable_text(), None);

        let numeric = InboundReply::from_value(&json!({ "reply": 42 }));
        assert_eq!(numeric.usable_text(), None);

        let array = InboundReply::from_value(&json!([1, 2, 3]));
        assert_eq!(array.usable_text(), None);
    }

    #[test]
    fn whitespace_reply_is_kept_verbatim() {
        let reply = InboundReply::from_value(&json!({ "reply": "  " }));
        assert_eq!(reply.usable_text(), Some("  "));
    }
}
