//! Bot command handlers.

mod fun;
mod general;
mod registry;
mod utility;

pub use fun::{CoinflipHandler, RollHandler};
pub use general::{HelpHandler, PingHandler};
pub use registry::CommandRegistry;
pub use utility::{ChannelsHandler, EchoHandler, UserInfoHandler};

use crate::error::AppResult;
use async_trait::async_trait;
use discord_client::{BotMessage, ChatClient};
use std::fmt;
use std::sync::Arc;

/// Grouping shown by `help`. Has no effect on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Utility,
    Fun,
}

impl Category {
    /// Display order.
    pub const ALL: [Category; 3] = [Category::General, Category::Utility, Category::Fun];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::General => write!(f, "General"),
            Category::Utility => write!(f, "Utility"),
            Category::Fun => write!(f, "Fun"),
        }
    }
}

/// Everything a command sees about the message that triggered it.
pub struct CommandContext {
    /// The triggering message.
    pub message: BotMessage,
    /// Outbound chat operations.
    pub chat: Arc<dyn ChatClient>,
    /// All registered commands.
    pub registry: Arc<CommandRegistry>,
    /// Prefix in effect.
    pub prefix: String,
}

impl CommandContext {
    /// Reply to the author in the originating channel.
    pub async fn reply(&self, text: &str) -> AppResult<()> {
        self.chat.reply(&self.message, text).await?;
        Ok(())
    }

    /// Post into the originating channel without mentioning anyone.
    pub async fn say(&self, text: &str) -> AppResult<()> {
        self.chat.send(&self.message.channel_id, text).await?;
        Ok(())
    }
}

/// Command handler trait.
///
/// Handlers may run concurrently with each other and with themselves.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name (e.g., "help", "roll"), matched case-insensitively.
    fn name(&self) -> &str;

    /// Help grouping.
    fn category(&self) -> Category;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Argument synopsis (e.g., "[NdM]").
    fn usage(&self) -> Option<&str> {
        None
    }

    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> AppResult<()>;
}
