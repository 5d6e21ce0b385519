use chat_widget::theme::Theme;
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::state::AppState;

/// Header, transcript and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let entries = state.entries;
    let scroll_tick = state.scroll_tick;
    let theme = state.theme;
    let container = NodeRef::<Div>::new();

    // Keep the newest entry in view. Deferred a frame so the entry the tick
    // announced is already in the DOM.
    Effect::new(move |_| {
        scroll_tick.track();
        request_animation_frame(move || {
            if let Some(el) = container.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    });

    let toggle_sidebar = {
        let state = state.clone();
        move |_| state.toggle_sidebar()
    };
    let toggle_theme = move |_| state.toggle_theme();

    view! {
        <main class="chat-area">
            <header class="chat-header">
                <button id="sidebarToggle" class="icon-btn" on:click=toggle_sidebar>
                    "☰"
                </button>
                <h1>"CRM Assistant"</h1>
                <button id="themeToggle" class="icon-btn" on:click=toggle_theme>
                    {move || match theme.get() {
                        Theme::Light => "🌙",
                        Theme::Dark => "☀",
                    }}
                </button>
            </header>

            <div id="messagesContainer" class="messages-container" node_ref=container>
                <For
                    each=move || entries.get()
                    key=|entry| entry.seq
                    let:entry
                >
                    // Entry markup is built with the text already escaped
                    <div class="transcript-entry" inner_html=entry.html></div>
                </For>
            </div>

            <ChatInput />
        </main>
    }
}

/// Message box and send button. Enter sends, Shift+Enter inserts a newline.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let input = state.input;
    let set_input = state.set_input;

    let send = move || state.send();

    let send_clone = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send_clone();
        }
    };

    let on_submit = move |_| {
        send();
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    id="messageInput"
                    rows="1"
                    placeholder="Type a message… (Enter to send, Shift+Enter for newline)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button id="sendBtn" class="send-btn" on:click=on_submit>
                    "Send"
                </button>
            </div>
        </div>
    }
}
