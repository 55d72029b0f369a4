//! Channels command - lists the guild's text channels.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;

/// Discord rejects messages longer than this.
const MAX_MESSAGE_LEN: usize = 2000;

pub struct ChannelsHandler;

#[async_trait]
impl CommandHandler for ChannelsHandler {
    fn name(&self) -> &str {
        "channels"
    }

    fn category(&self) -> Category {
        Category::Utility
    }

    fn description(&self) -> &str {
        "List text channels"
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
        let channels = ctx.chat.text_channels().await?;
        if channels.is_empty() {
            return ctx.reply("no text channels found.").await;
        }

        let mut text = format!("**Text channels ({}):**", channels.len());
        for channel in &channels {
            let line = format!("\n- #{} (`{}`)", channel.name, channel.id);
            if text.len() + line.len() > MAX_MESSAGE_LEN {
                break;
            }
            text.push_str(&line);
        }
        ctx.say(&text).await
    }
}
