use blendchat::cli::{self, Args};
use blendchat::config::ConfigDiscovery;
use blendchat::dispatch::Dispatcher;
use blendchat::provider::{ClaudeAdapter, DeepseekAdapter};
use blendchat::service::ChatService;
use blendchat::store::{MemoryStore, StoreGateway};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "blendchat=info".to_string()),
        )
        .init();

    let args = Args::parse();

    info!("starting blendchat");
    let config = ConfigDiscovery::discover()?;

    let dispatcher = Dispatcher::new(
        Arc::new(ClaudeAdapter::new(config.claude)),
        Arc::new(DeepseekAdapter::new(config.deepseek)),
    );
    let service = ChatService::new(StoreGateway::new(Arc::new(MemoryStore::new())), dispatcher);

    cli::run(args.command, &service).await
}
