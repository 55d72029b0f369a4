//! Discord bot - Main entry point.

use anyhow::Context;
use control_panel::{create_router, AppState, SharedSecret};
use discord_bot::commands::CommandRegistry;
use discord_bot::config::Config;
use discord_bot::presence::{PresenceRotation, PresenceUpdater};
use discord_bot::{AppResult, Dispatcher};
use discord_client::{ChatClient, DiscordError, Gateway, GatewayEvent};
use secrecy::ExposeSecret;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting Discord bot...");

    // Commands
    let registry = Arc::new(CommandRegistry::builtin()?);
    info!(
        "Registered {} commands: {}",
        registry.len(),
        registry.names().join(", ")
    );

    // Discord session
    let gateway = Gateway::connect(
        config.discord.token.expose_secret(),
        config.discord.guild_id,
    )
    .await
    .context("Failed to create Discord client")?;
    let chat: Arc<dyn ChatClient> = Arc::new(gateway.chat_client());
    let shards = gateway.shard_manager();

    // Control panel
    let state = AppState::new(chat.clone(), SharedSecret::new(&config.panel.token))?;
    let app = create_router(state, &config.panel.public_dir);

    let ip: IpAddr = config
        .panel
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {:?}", config.panel.listen_addr))?;
    let addr = SocketAddr::new(ip, config.panel.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind control panel to {}", addr))?;
    info!("Control panel listening on {}", addr);

    let (stop_panel, panel_stopped) = oneshot::channel::<()>();
    let panel = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = panel_stopped.await;
            })
            .await
    });

    let dispatcher = Dispatcher::new(config.bot.prefix.as_str(), registry, chat);
    let presence = PresenceUpdater::new(PresenceRotation::new(&config.presence));

    info!("Listening for messages with prefix {:?}", config.bot.prefix);
    let (gateway_task, events) = gateway.run();
    let mut events = Box::pin(events);

    // Main event loop
    let mut result = Ok(());
    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(GatewayEvent::Ready { user_tag, presence: sink }) => {
                    info!("{} is connected", user_tag);
                    if presence.on_ready(sink).is_some() {
                        info!("Presence rotation started");
                    }
                }
                Some(GatewayEvent::Message(message)) => {
                    let _ = dispatcher.spawn(message);
                }
                None => {
                    error!("Gateway event stream ended");
                    result = Err(DiscordError::GatewayClosed.into());
                    break;
                }
            },
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    shards.shutdown_all().await;
    let _ = stop_panel.send(());

    match panel.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Control panel error: {}", e),
        Err(e) => error!("Control panel task failed: {}", e),
    }
    if let Ok(Err(e)) = gateway_task.await {
        warn!("Gateway stopped with error: {}", e);
    }

    result
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
