//! Ping command.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    fn name(&self) -> &str {
        "ping"
    }

    fn category(&self) -> Category {
        Category::General
    }

    fn description(&self) -> &str {
        "Check that the bot is alive"
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
        ctx.reply("Pong!").await
    }
}
