use std::sync::Arc;

use chat_widget::theme::{self as prefs, Theme};
use chat_widget::{
    ChatContext, Delivery, Dispatcher, Entry, InputField, Notifier, SystemClock, TranscriptView,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ENDPOINT, FetchTransport};
use crate::theme::{self, LocalStorageStore};

/// Transcript backed by signals; the chat area renders from them.
struct SignalTranscript {
    set_entries: WriteSignal<Vec<Entry>>,
    set_scroll_tick: WriteSignal<u64>,
}

impl TranscriptView for SignalTranscript {
    fn push(&self, entry: Entry) {
        self.set_entries.update(|entries| entries.push(entry));
    }

    fn scroll_to_latest(&self) {
        self.set_scroll_tick.update(|tick| *tick += 1);
    }

    fn replace_all(&self, entry: Entry) {
        self.set_entries.set(vec![entry]);
    }
}

struct SignalInput {
    set_input: WriteSignal<String>,
}

impl InputField for SignalInput {
    fn clear(&self) {
        self.set_input.set(String::new());
    }
}

struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(notice) {
                log::warn!("Failed to show notice: {e:?}");
            }
        }
    }
}

/// Shared application state, provided via Leptos context.
#[derive(Clone)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub entries: ReadSignal<Vec<Entry>>,
    pub scroll_tick: ReadSignal<u64>,
    pub input: ReadSignal<String>,
    pub sidebar_open: ReadSignal<bool>,
    pub theme: ReadSignal<Theme>,

    // --- Write signals (for mutating state) ---
    pub set_input: WriteSignal<String>,
    set_sidebar_open: WriteSignal<bool>,
    set_theme: WriteSignal<Theme>,

    dispatcher: Dispatcher,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (entries, set_entries) = signal(Vec::<Entry>::new());
        let (scroll_tick, set_scroll_tick) = signal(0u64);
        let (input, set_input) = signal(String::new());
        let (sidebar_open, set_sidebar_open) = signal(false);
        let (theme, set_theme) = signal(prefs::load_theme(&LocalStorageStore));

        let dispatcher = Dispatcher::new(ChatContext {
            view: Arc::new(SignalTranscript { set_entries, set_scroll_tick }),
            input: Arc::new(SignalInput { set_input }),
            notifier: Arc::new(AlertNotifier),
            transport: Arc::new(FetchTransport),
            clock: Arc::new(SystemClock),
            endpoint: ENDPOINT.to_string(),
        });

        let state = Self {
            entries,
            scroll_tick,
            input,
            sidebar_open,
            theme,
            set_input,
            set_sidebar_open,
            set_theme,
            dispatcher,
        };

        provide_context(state.clone());
        state
    }

    /// Applies the stored theme and shows the greeting.
    pub fn start(&self) {
        theme::apply(self.theme.get_untracked());
        self.dispatcher.renderer().reset();
    }

    /// Sends whatever is in the input box. The reply is awaited in the
    /// background so the user can keep typing (and sending) meanwhile.
    pub fn send(&self) {
        let text = self.input.get_untracked();
        match self.dispatcher.submit(&text) {
            Ok(pending) => spawn_local(async move {
                if let Delivery::Failed(e) = pending.await {
                    log::warn!("Reply replaced by error notice: {e}");
                }
            }),
            Err(e) => log::debug!("Nothing sent: {e}"),
        }
    }

    /// Starts over with the greeting and closes the sidebar.
    pub fn new_chat(&self) {
        self.dispatcher.renderer().reset();
        self.close_sidebar();
    }

    pub fn toggle_sidebar(&self) {
        self.set_sidebar_open.update(|open| *open = !*open);
    }

    pub fn close_sidebar(&self) {
        self.set_sidebar_open.set(false);
    }

    pub fn toggle_theme(&self) {
        let next = prefs::toggle_theme(&LocalStorageStore, self.theme.get_untracked());
        theme::apply(next);
        self.set_theme.set(next);
    }
}
