//! tasklist - interactive console entry point
//!
//! Loads configuration, opens the configured task store, hydrates the list
//! and hands stdin/stdout to the console loop.

use std::sync::Arc;

use tasklist::{console, create_task_store, notify::ConsoleNotifier, Config, TaskListController};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Single event loop; nothing runs in parallel.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the list on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(
        "Loaded configuration: backend={}, api_url={}",
        config.backend,
        config.api_url.as_deref().unwrap_or("(none)")
    );

    let store = create_task_store(&config).await?;
    let mut controller = TaskListController::new(store, Arc::new(ConsoleNotifier));
    controller.hydrate().await;

    let stdin = BufReader::new(tokio::io::stdin());
    console::run(&mut controller, stdin, tokio::io::stdout()).await?;

    info!("Session ended with {} tasks", controller.tasks().len());
    Ok(())
}
