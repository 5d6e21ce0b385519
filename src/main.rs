mod terminal;

use std::sync::Arc;

use anyhow::Context;
use chat_widget::config::Config;
use chat_widget::http::HttpTransport;
use chat_widget::{ChatContext, Dispatcher, SystemClock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinSet, LocalSet};
use tracing::info;

use crate::terminal::{Command, ConsoleInput, ConsoleNotifier, ConsoleView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_widget=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Invalid chat configuration")?;
    let transport = HttpTransport::new(config.timeout)?;
    info!("Chatting with {} (/new to start over, /quit to leave)", config.endpoint);

    let dispatcher = Dispatcher::new(ChatContext {
        view: Arc::new(ConsoleView),
        input: Arc::new(ConsoleInput),
        notifier: Arc::new(ConsoleNotifier),
        transport: Arc::new(transport),
        clock: Arc::new(SystemClock),
        endpoint: config.endpoint,
    });

    // Pending replies are !Send, so everything runs on this thread
    LocalSet::new().run_until(run(dispatcher)).await
}

async fn run(dispatcher: Dispatcher) -> anyhow::Result<()> {
    dispatcher.renderer().reset();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::NewChat => {
                dispatcher.renderer().reset();
            }
            Command::Send(text) => match dispatcher.submit(text) {
                Ok(pending) => {
                    in_flight.spawn_local(pending);
                }
                Err(_) => terminal::prompt(),
            },
        }
        while in_flight.try_join_next().is_some() {}
    }

    // Let replies that are still on the wire land before exiting
    while in_flight.join_next().await.is_some() {}
    Ok(())
}
