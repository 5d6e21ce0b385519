//! Client-side chat widget: a dispatcher that relays user input to a chat
//! endpoint and a renderer that keeps an escaped, append-only transcript.

pub mod config;
pub mod dispatcher;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod models;
pub mod render;
pub mod theme;
pub mod transcript;
pub mod transport;

pub use dispatcher::{ChatContext, Delivery, Dispatcher, InputField, Notifier, PendingReply};
pub use errors::ChatError;
pub use models::{Entry, Message, Role};
pub use render::{Clock, Renderer, SystemClock};
pub use transcript::{Transcript, TranscriptView};
pub use transport::Transport;
