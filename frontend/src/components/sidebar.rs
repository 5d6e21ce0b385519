use leptos::prelude::*;

use crate::state::AppState;

/// Slide-in panel with the "New Chat" button, plus the overlay behind it.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let open = state.sidebar_open;

    let on_close = {
        let state = state.clone();
        move |_| state.close_sidebar()
    };
    let on_overlay = {
        let state = state.clone();
        move |_| state.close_sidebar()
    };
    let on_new = move |_| state.new_chat();

    view! {
        <aside id="sidebar" class="sidebar" class:active=move || open.get()>
            <div class="sidebar-header">
                <h2>"CRM Assistant"</h2>
                <button id="sidebarClose" class="icon-btn" on:click=on_close>
                    "×"
                </button>
            </div>
            <button id="newChatBtn" class="new-chat-btn" on:click=on_new>
                "+ New Chat"
            </button>
        </aside>
        <div
            id="sidebarOverlay"
            class="sidebar-overlay"
            class:active=move || open.get()
            on:click=on_overlay
        ></div>
    }
}
