//! Discord client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("Discord error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Invalid channel id: {0}")]
    InvalidChannelId(String),

    #[error("Bot is not a member of any guild")]
    NoGuild,

    #[error("Invalid activity: {0}")]
    InvalidActivity(String),

    #[error("Gateway closed")]
    GatewayClosed,
}
