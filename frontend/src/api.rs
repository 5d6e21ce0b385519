use chat_widget::config::DEFAULT_ENDPOINT;
use chat_widget::errors::ChatError;
use chat_widget::models::{InboundReply, OutboundRequest};
use chat_widget::transport::{Transport, parse_reply};
use futures_util::future::LocalBoxFuture;
use gloo_net::http::Request;

/// Chat endpoint, overridable at build time with `CHAT_ENDPOINT`.
pub const ENDPOINT: &str = match option_env!("CHAT_ENDPOINT") {
    Some(endpoint) => endpoint,
    None => DEFAULT_ENDPOINT,
};

/// [`Transport`] over the browser's `fetch`.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn post_json(
        &self,
        endpoint: String,
        request: OutboundRequest,
    ) -> LocalBoxFuture<'static, Result<InboundReply, ChatError>> {
        Box::pin(async move {
            let resp = Request::post(&endpoint)
                .json(&request)
                .map_err(|e| ChatError::transport(format!("Serialize error: {e}")))?
                .send()
                .await
                .map_err(|e| ChatError::transport(e.to_string()))?;

            if !resp.ok() {
                return Err(ChatError::Status {
                    status: resp.status(),
                    status_text: resp.status_text(),
                });
            }

            let body = resp
                .text()
                .await
                .map_err(|e| ChatError::transport(e.to_string()))?;
            log::debug!("API Response: {body}");
            parse_reply(&body)
        })
    }
}
