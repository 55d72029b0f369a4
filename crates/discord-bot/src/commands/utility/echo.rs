//! Echo command - repeats its arguments.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;

pub struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    fn name(&self) -> &str {
        "echo"
    }

    fn category(&self) -> Category {
        Category::Utility
    }

    fn description(&self) -> &str {
        "Repeat a message"
    }

    fn usage(&self) -> Option<&str> {
        Some("<text>")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> AppResult<()> {
        if args.is_empty() {
            return ctx
                .reply(&format!("usage: `{}echo <text>`", ctx.prefix))
                .await;
        }
        ctx.say(&args.join(" ")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, context, MockChat};

    #[tokio::test]
    async fn test_echo_joins_args() {
        let mut chat = MockChat::new();
        chat.expect_send()
            .withf(|channel, text| {
                channel.to_string() == "42" && text.to_string() == "hello world"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let ctx = context(chat, "!echo hello   world");
        EchoHandler
            .execute(&ctx, &args(&["hello", "world"]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_echo_without_args_shows_usage() {
        let mut chat = MockChat::new();
        chat.expect_send()
            .withf(|_, text| text.to_string() == "<@1234>, usage: `!echo <text>`")
            .times(1)
            .returning(|_, _| Ok(()));

        let ctx = context(chat, "!echo");
        EchoHandler.execute(&ctx, &args(&[])).await.unwrap();
    }
}
