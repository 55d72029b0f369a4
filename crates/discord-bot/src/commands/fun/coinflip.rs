//! Coin flip command.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use rand::Rng;

pub struct CoinflipHandler;

#[async_trait]
impl CommandHandler for CoinflipHandler {
    fn name(&self) -> &str {
        "coinflip"
    }

    fn category(&self) -> Category {
        Category::Fun
    }

    fn description(&self) -> &str {
        "Flip a coin"
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
        let face = if rand::thread_rng().gen_bool(0.5) {
            "Heads!"
        } else {
            "Tails!"
        };
        ctx.reply(face).await
    }
}
