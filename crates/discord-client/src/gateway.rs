//! Gateway connection exposed as an async event stream.

use crate::client::{DiscordClient, GuildSlot, ShardPresence};
use crate::error::DiscordError;
use crate::types::*;
use serenity::all::{
    Client, Context, EventHandler, GatewayIntents, GuildId, Message, Ready, ShardManager,
};
use serenity::async_trait;
use std::num::NonZeroU64;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tracing::{error, info, warn};

const EVENT_BUFFER: usize = 256;

struct Handler {
    events: mpsc::Sender<GatewayEvent>,
    guild: GuildSlot,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.tag());

        {
            let mut guild = self.guild.write().await;
            if guild.is_none() {
                *guild = ready.guilds.first().map(|g| g.id);
            }
            match *guild {
                Some(id) => info!("Operating in guild {}", id),
                None => warn!("Bot is not a member of any guild"),
            }
        }

        let event = GatewayEvent::Ready {
            user_tag: ready.user.tag(),
            presence: Arc::new(ShardPresence::new(ctx)),
        };
        if self.events.send(event).await.is_err() {
            warn!("Dropped ready event, receiver closed");
        }
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let event = GatewayEvent::Message(BotMessage::from(&msg));
        if self.events.send(event).await.is_err() {
            warn!("Dropped message event, receiver closed");
        }
    }
}

/// Discord gateway session.
pub struct Gateway {
    client: Client,
    events: mpsc::Receiver<GatewayEvent>,
    chat: DiscordClient,
}

impl Gateway {
    /// Log in and prepare the gateway. No events flow until [`Gateway::run`].
    pub async fn connect(token: &str, guild_id: Option<u64>) -> Result<Self, DiscordError> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let guild: GuildSlot = Arc::new(RwLock::new(
            guild_id.and_then(NonZeroU64::new).map(GuildId::from),
        ));
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let client = Client::builder(token, intents)
            .event_handler(Handler {
                events: tx,
                guild: guild.clone(),
            })
            .await?;

        let chat = DiscordClient::with_slot(client.http.clone(), guild);

        Ok(Self {
            client,
            events: rx,
            chat,
        })
    }

    /// REST client sharing this session's credentials and guild.
    pub fn chat_client(&self) -> DiscordClient {
        self.chat.clone()
    }

    /// Handle for shutting the session down.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        self.client.shard_manager.clone()
    }

    /// Start the session in the background and return its event stream.
    ///
    /// The stream ends when the session stops.
    pub fn run(
        self,
    ) -> (
        JoinHandle<Result<(), DiscordError>>,
        impl Stream<Item = GatewayEvent>,
    ) {
        let mut client = self.client;
        let task = tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!("Gateway error: {}", e);
                return Err(DiscordError::from(e));
            }
            Ok(())
        });

        (task, ReceiverStream::new(self.events))
    }
}
