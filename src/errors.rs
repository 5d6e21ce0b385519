use thiserror::Error;

/// Everything that can go wrong between the input box and the transcript.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Message cannot be empty")]
    EmptyMessage,

    // ── Exchange errors ──────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Parse error: {message}")]
    MalformedResponse { message: String },

    // ── Configuration / persistence errors ───────────────────────────────────
    #[error("Endpoint '{endpoint}' must be an http:// or https:// URL")]
    InvalidEndpoint { endpoint: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ChatError {
    pub fn transport(message: impl Into<String>) -> Self {
        ChatError::Transport { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ChatError::MalformedResponse { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_the_message() {
        assert_eq!(
            ChatError::transport("refused"),
            ChatError::Transport { message: "refused".into() }
        );
        assert_eq!(ChatError::malformed("eof").to_string(), "Parse error: eof");
    }

    #[test]
    fn status_display_names_code_and_reason() {
        let err = ChatError::Status { status: 404, status_text: "Not Found".into() };
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
    }
}
