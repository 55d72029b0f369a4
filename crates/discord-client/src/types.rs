//! Discord-facing types.

use crate::error::DiscordError;
use serenity::all::{ActivityData, ChannelType, GuildChannel, Message};
use std::sync::Arc;

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct BotMessage {
    /// Discord message snowflake.
    pub message_id: String,
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Guild the channel belongs to, `None` for direct messages.
    pub guild_id: Option<String>,
    /// Author snowflake.
    pub author_id: String,
    /// Author display name.
    pub author_name: String,
    /// Whether the author is a bot account (this bot included).
    pub author_is_bot: bool,
    /// Raw message text.
    pub content: String,
}

impl BotMessage {
    /// Mention string for the author, e.g. `<@1234>`.
    pub fn author_mention(&self) -> String {
        format!("<@{}>", self.author_id)
    }
}

impl From<&Message> for BotMessage {
    fn from(msg: &Message) -> Self {
        Self {
            message_id: msg.id.to_string(),
            channel_id: msg.channel_id.to_string(),
            guild_id: msg.guild_id.map(|g| g.to_string()),
            author_id: msg.author.id.to_string(),
            author_name: msg.author.name.clone(),
            author_is_bot: msg.author.bot,
            content: msg.content.clone(),
        }
    }
}

/// A text-capable guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
}

impl ChannelSummary {
    /// Build a summary if the channel accepts text messages.
    pub fn from_text_channel(channel: &GuildChannel) -> Option<Self> {
        match channel.kind {
            ChannelType::Text | ChannelType::News => Some(Self {
                id: channel.id.to_string(),
                name: channel.name.clone(),
            }),
            _ => None,
        }
    }
}

/// A "streaming" presence shown on the bot's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingActivity {
    /// Status text.
    pub name: String,
    /// Stream URL; Discord only renders streaming status for Twitch and YouTube.
    pub url: String,
    /// Secondary line shown under the status.
    pub display_name: String,
}

impl StreamingActivity {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            display_name: display_name.into(),
        }
    }

    /// Convert into the gateway presence payload.
    pub fn to_activity_data(&self) -> Result<ActivityData, DiscordError> {
        let mut activity = ActivityData::streaming(self.name.clone(), self.url.as_str())
            .map_err(|e| DiscordError::InvalidActivity(format!("{}: {}", self.url, e)))?;
        activity.state = Some(self.display_name.clone());
        Ok(activity)
    }
}

/// Event emitted by the gateway.
#[derive(Clone)]
pub enum GatewayEvent {
    /// Session established. Carries a handle for presence updates on this shard.
    Ready {
        user_tag: String,
        presence: Arc<dyn crate::PresenceSink>,
    },
    /// A message was posted somewhere the bot can see.
    Message(BotMessage),
}

impl std::fmt::Debug for GatewayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayEvent::Ready { user_tag, .. } => {
                f.debug_struct("Ready").field("user_tag", user_tag).finish()
            }
            GatewayEvent::Message(msg) => f.debug_tuple("Message").field(msg).finish(),
        }
    }
}
