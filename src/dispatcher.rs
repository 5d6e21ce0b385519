use std::sync::Arc;

use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::errors::ChatError;
use crate::models::{OutboundRequest, Role, EMPTY_INPUT_NOTICE, ERROR_FALLBACK, REPLY_FALLBACK};
use crate::render::{Clock, Renderer};
use crate::transcript::TranscriptView;
use crate::transport::Transport;

/// The text box the user types into.
pub trait InputField: Send + Sync {
    fn clear(&self);
}

/// Blocking notices (the browser uses `alert`).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &str);
}

/// Handles to everything the send flow touches, gathered once at start-up.
pub struct ChatContext {
    pub view: Arc<dyn TranscriptView>,
    pub input: Arc<dyn InputField>,
    pub notifier: Arc<dyn Notifier>,
    pub transport: Arc<dyn Transport>,
    pub clock: Arc<dyn Clock>,
    pub endpoint: String,
}

/// How a send ended. Every variant has already been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The endpoint's `reply` was shown verbatim.
    Replied,
    /// The endpoint answered without a usable `reply`; the fallback was shown.
    Substituted,
    /// The exchange failed; the error fallback was shown.
    Failed(ChatError),
}

/// Second half of a send: awaits the endpoint and renders the bot's answer.
pub type PendingReply = LocalBoxFuture<'static, Delivery>;

/// Turns user input into a network exchange and transcript updates.
///
/// Overlapping sends are not guarded against; replies land in the order the
/// endpoint answers them.
#[derive(Clone)]
pub struct Dispatcher {
    renderer: Renderer,
    input: Arc<dyn InputField>,
    notifier: Arc<dyn Notifier>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    endpoint: Arc<str>,
}

impl Dispatcher {
    pub fn new(ctx: ChatContext) -> Self {
        Self {
            renderer: Renderer::new(ctx.view, ctx.clock.clone()),
            input: ctx.input,
            notifier: ctx.notifier,
            transport: ctx.transport,
            clock: ctx.clock,
            endpoint: ctx.endpoint.into(),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Sends `raw` to the endpoint.
    ///
    /// Empty input raises the notice and returns [`ChatError::EmptyMessage`]
    /// with nothing else touched. Otherwise the user's message is already on
    /// screen and the input cleared by the time this returns; the caller spawns
    /// the returned future to finish the exchange.
    pub fn submit(&self, raw: &str) -> Result<PendingReply, ChatError> {
        let text = raw.trim();
        if text.is_empty() {
            self.notifier.notify(EMPTY_INPUT_NOTICE);
            return Err(ChatError::EmptyMessage);
        }

        self.renderer.append(text, Role::User);
        self.input.clear();

        let request = OutboundRequest::new(text, &self.clock.now());
        debug!("Posting message to {} at {}", self.endpoint, request.timestamp);
        let call = self.transport.post_json(self.endpoint.to_string(), request);
        let renderer = self.renderer.clone();

        Ok(Box::pin(async move {
            match call.await {
                Ok(reply) => match reply.usable_text() {
                    Some(text) => {
                        renderer.append(text, Role::Bot);
                        Delivery::Replied
                    }
                    None => {
                        renderer.append(REPLY_FALLBACK, Role::Bot);
                        Delivery::Substituted
                    }
                },
                Err(e) => {
                    error!("Error sending message: {e}");
                    renderer.append(ERROR_FALLBACK, Role::Bot);
                    Delivery::Failed(e)
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::{FixedOffset, TimeZone};
    use futures_util::future;

    use super::*;
    use crate::models::{InboundReply, Message};
    use crate::render::FixedClock;
    use crate::transcript::Transcript;

    #[derive(Default)]
    struct CountingInput(AtomicUsize);

    impl InputField for CountingInput {
        fn clear(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<String>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &str) {
            self.0.lock().unwrap().push(notice.to_string());
        }
    }

    struct CannedTransport {
        answer: Result<InboundReply, ChatError>,
        sent: Mutex<Vec<(String, OutboundRequest)>>,
    }

    impl Transport for CannedTransport {
        fn post_json(
            &self,
            endpoint: String,
            request: OutboundRequest,
        ) -> LocalBoxFuture<'static, Result<InboundReply, ChatError>> {
            self.sent.lock().unwrap().push((endpoint, request));
            Box::pin(future::ready(self.answer.clone()))
        }
    }

    struct Harness {
        transcript: Arc<Transcript>,
        input: Arc<CountingInput>,
        notifier: Arc<RecordingNotifier>,
        transport: Arc<CannedTransport>,
        dispatcher: Dispatcher,
    }

    fn harness(answer: Result<InboundReply, ChatError>) -> Harness {
        let transcript = Arc::new(Transcript::new());
        let input = Arc::new(CountingInput::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let transport = Arc::new(CannedTransport { answer, sent: Mutex::new(Vec::new()) });
        let clock = FixedClock(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 9, 5, 0)
                .unwrap(),
        );
        let dispatcher = Dispatcher::new(ChatContext {
            view: transcript.clone(),
            input: input.clone(),
            notifier: notifier.clone(),
            transport: transport.clone(),
            clock: Arc::new(clock),
            endpoint: "https://api.example.com/chat".into(),
        });
        Harness { transcript, input, notifier, transport, dispatcher }
    }

    fn messages(transcript: &Transcript) -> Vec<Message> {
        transcript.entries().into_iter().map(|e| e.message).collect()
    }

    fn reply(text: &str) -> Result<InboundReply, ChatError> {
        Ok(InboundReply { reply: Some(text.to_string()) })
    }

    #[tokio::test]
    async fn user_message_lands_before_the_reply() {
        let h = harness(reply("Hi there"));

        let pending = h.dispatcher.submit("Hello").unwrap();
        assert_eq!(messages(&h.transcript), vec![Message::user("Hello")]);
        assert_eq!(h.input.0.load(Ordering::SeqCst), 1);

        assert_eq!(pending.await, Delivery::Replied);
        assert_eq!(
            messages(&h.transcript),
            vec![Message::user("Hello"), Message::bot("Hi there")]
        );
    }

    #[tokio::test]
    async fn posts_trimmed_text_once() {
        let h = harness(reply("ok"));
        h.dispatcher.submit("  padded  ").unwrap().await;

        let sent = h.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://api.example.com/chat");
        assert_eq!(sent[0].1.message, "padded");
        assert_eq!(sent[0].1.timestamp, "2024-05-01T09:05:00.000Z");
    }

    #[test]
    fn whitespace_input_is_rejected_untouched() {
        let h = harness(reply("unused"));

        let err = h.dispatcher.submit("  \t\n").err().unwrap();
        assert_eq!(err, ChatError::EmptyMessage);
        assert!(h.transcript.is_empty());
        assert_eq!(h.input.0.load(Ordering::SeqCst), 0);
        assert_eq!(*h.notifier.0.lock().unwrap(), vec![EMPTY_INPUT_NOTICE.to_string()]);
        assert!(h.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_reply_uses_fallback_text() {
        let h = harness(Ok(InboundReply::default()));
        let outcome = h.dispatcher.submit("Hello").unwrap().await;
        assert_eq!(outcome, Delivery::Substituted);
        assert_eq!(h.transcript.entries()[1].message, Message::bot(REPLY_FALLBACK));
    }

    #[tokio::test]
    async fn transport_failure_renders_error_fallback() {
        let h = harness(Err(ChatError::transport("connection refused")));
        let outcome = h.dispatcher.submit("Test").unwrap().await;

        assert!(matches!(outcome, Delivery::Failed(ChatError::Transport { .. })));
        assert_eq!(
            messages(&h.transcript),
            vec![Message::user("Test"), Message::bot(ERROR_FALLBACK)]
        );
    }

    #[tokio::test]
    async fn reply_markup_is_escaped() {
        let h = harness(reply("<img src=x onerror=alert(1)>"));
        h.dispatcher.submit("hi").unwrap().await;

        let bot = &h.transcript.entries()[1];
        assert_eq!(bot.text(), "<img src=x onerror=alert(1)>");
        assert!(bot.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!bot.html.contains("<img"));
    }
}
