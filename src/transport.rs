use futures_util::future::LocalBoxFuture;

use crate::errors::ChatError;
use crate::models::{InboundReply, OutboundRequest};

/// One JSON POST to the chat endpoint.
///
/// Futures are `!Send`: the browser's fetch can't leave its thread, and the
/// terminal client drives everything from a single `LocalSet`.
pub trait Transport: Send + Sync {
    /// Resolves to the parsed reply. Connection failures, non-2xx statuses and
    /// bodies that are not JSON all resolve to an error.
    fn post_json(
        &self,
        endpoint: String,
        request: OutboundRequest,
    ) -> LocalBoxFuture<'static, Result<InboundReply, ChatError>>;
}

/// Maps a raw response body to an [`InboundReply`]. A `null` body is
/// malformed; any other JSON without a string `reply` just has no reply.
pub fn parse_reply(body: &str) -> Result<InboundReply, ChatError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ChatError::malformed(e.to_string()))?;
    if value.is_null() {
        return Err(ChatError::malformed("null body"));
    }
    Ok(InboundReply::from_value(&value))
}
