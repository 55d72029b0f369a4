//! User info command.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;

pub struct UserInfoHandler;

#[async_trait]
impl CommandHandler for UserInfoHandler {
    fn name(&self) -> &str {
        "userinfo"
    }

    fn category(&self) -> Category {
        Category::Utility
    }

    fn description(&self) -> &str {
        "Show your username and id"
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
        let author = &ctx.message;
        ctx.reply(&format!(
            "your username: {}\nyour ID: {}",
            author.author_name, author.author_id
        ))
        .await
    }
}
