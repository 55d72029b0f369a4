//! Discord REST client and the chat-platform seams the bot depends on.

use crate::error::DiscordError;
use crate::types::*;
use async_trait::async_trait;
use serenity::all::{ChannelId, Context, GuildId, Http};
use std::num::NonZeroU64;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Outbound chat operations.
///
/// Implementations must tolerate concurrent calls: every command runs on its
/// own task and the control panel shares the same client.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `text` verbatim to a channel.
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), DiscordError>;

    /// Text-capable channels of the bot's guild, in display order.
    async fn text_channels(&self) -> Result<Vec<ChannelSummary>, DiscordError>;

    /// Reply to a message in its channel, mentioning the author.
    async fn reply(&self, original: &BotMessage, text: &str) -> Result<(), DiscordError> {
        let text = format!("{}, {}", original.author_mention(), text);
        self.send(&original.channel_id, &text).await
    }

    /// Look up a text channel of the bot's guild by id.
    async fn find_text_channel(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelSummary>, DiscordError> {
        Ok(self
            .text_channels()
            .await?
            .into_iter()
            .find(|c| c.id == channel_id))
    }
}

/// Presence updates for the connected session.
pub trait PresenceSink: Send + Sync {
    fn set_streaming(&self, activity: &StreamingActivity) -> Result<(), DiscordError>;
}

/// Presence handle bound to one gateway shard.
pub struct ShardPresence {
    ctx: Context,
}

impl ShardPresence {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl PresenceSink for ShardPresence {
    fn set_streaming(&self, activity: &StreamingActivity) -> Result<(), DiscordError> {
        self.ctx.set_activity(Some(activity.to_activity_data()?));
        debug!("Presence set to {:?}", activity.name);
        Ok(())
    }
}

/// Shared slot holding the guild the bot operates in.
pub(crate) type GuildSlot = Arc<RwLock<Option<GuildId>>>;

/// Discord REST client.
#[derive(Clone)]
pub struct DiscordClient {
    http: Arc<Http>,
    guild: GuildSlot,
}

impl DiscordClient {
    /// Create a client from an existing HTTP handle.
    pub fn new(http: Arc<Http>, guild_id: Option<u64>) -> Self {
        let guild = guild_id.and_then(NonZeroU64::new).map(GuildId::from);
        Self::with_slot(http, Arc::new(RwLock::new(guild)))
    }

    pub(crate) fn with_slot(http: Arc<Http>, guild: GuildSlot) -> Self {
        Self { http, guild }
    }

    /// The guild currently targeted, if known.
    pub async fn guild_id(&self) -> Option<String> {
        self.guild.read().await.map(|g| g.to_string())
    }

    async fn require_guild(&self) -> Result<GuildId, DiscordError> {
        self.guild.read().await.ok_or(DiscordError::NoGuild)
    }
}

/// Parse a channel snowflake.
pub fn parse_channel_id(channel_id: &str) -> Result<ChannelId, DiscordError> {
    channel_id
        .trim()
        .parse::<NonZeroU64>()
        .map(ChannelId::from)
        .map_err(|_| DiscordError::InvalidChannelId(channel_id.to_string()))
}

#[async_trait]
impl ChatClient for DiscordClient {
    #[instrument(skip(self, text))]
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), DiscordError> {
        let channel = parse_channel_id(channel_id)?;
        channel.say(&self.http, text).await?;
        debug!("Sent message to {}", channel_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn text_channels(&self) -> Result<Vec<ChannelSummary>, DiscordError> {
        let guild = self.require_guild().await?;
        let mut channels: Vec<_> = guild.channels(&self.http).await?.into_values().collect();
        channels.sort_by_key(|c| (c.position, c.id));

        Ok(channels
            .iter()
            .filter_map(ChannelSummary::from_text_channel)
            .collect())
    }
}
