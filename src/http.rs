use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::errors::ChatError;
use crate::models::{InboundReply, OutboundRequest};
use crate::transport::{parse_reply, Transport};

/// Native [`Transport`] backed by a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(8);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        endpoint: String,
        request: OutboundRequest,
    ) -> LocalBoxFuture<'static, Result<InboundReply, ChatError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let resp = client
                .post(&endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|e| ChatError::transport(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(ChatError::Status {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            let body = resp
                .text()
                .await
                .map_err(|e| ChatError::transport(e.to_string()))?;
            debug!("API Response: {body}");
            parse_reply(&body)
        })
    }
}
