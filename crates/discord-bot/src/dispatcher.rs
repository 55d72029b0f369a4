//! Routes prefixed chat messages to command handlers.

use crate::commands::{CommandContext, CommandRegistry};
use discord_client::{BotMessage, ChatClient};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Reply sent when a command fails.
pub const FAILURE_REPLY: &str = "there was an error trying to execute that command!";

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lower-cased command name; empty when nothing follows the prefix.
    pub name: String,
    pub args: Vec<String>,
}

/// Split `content` into command name and arguments if it starts with `prefix`.
pub fn parse(content: &str, prefix: &str) -> Option<Invocation> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_lowercase();
    Some(Invocation {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}

/// What happened to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Bot-authored or not a command.
    Ignored,
    /// Prefixed, but no such command.
    UnknownCommand(String),
    /// Handler completed.
    Executed(String),
    /// Handler returned an error or panicked.
    Failed(String),
}

#[derive(Clone)]
pub struct Dispatcher {
    prefix: Arc<str>,
    registry: Arc<CommandRegistry>,
    chat: Arc<dyn ChatClient>,
}

impl Dispatcher {
    pub fn new(
        prefix: impl Into<Arc<str>>,
        registry: Arc<CommandRegistry>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
            chat,
        }
    }

    /// Dispatch on a fresh task so slow commands never hold up the event loop.
    pub fn spawn(&self, message: BotMessage) -> JoinHandle<DispatchOutcome> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch(message).await })
    }

    /// Run the matching command, if any. Never fails.
    pub async fn dispatch(&self, message: BotMessage) -> DispatchOutcome {
        if message.author_is_bot {
            return DispatchOutcome::Ignored;
        }
        let Some(invocation) = parse(&message.content, &self.prefix) else {
            return DispatchOutcome::Ignored;
        };

        let Some(handler) = self.registry.lookup(&invocation.name) else {
            debug!(command = %invocation.name, "Unknown command");
            return DispatchOutcome::UnknownCommand(invocation.name);
        };

        let ctx = CommandContext {
            message,
            chat: self.chat.clone(),
            registry: self.registry.clone(),
            prefix: self.prefix.to_string(),
        };

        let result = AssertUnwindSafe(handler.execute(&ctx, &invocation.args))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(Ok(())) => DispatchOutcome::Executed(invocation.name),
            Ok(Err(e)) => {
                error!(command = %invocation.name, "Command failed: {}", e);
                self.notify_failure(&ctx).await;
                DispatchOutcome::Failed(invocation.name)
            }
            Err(panic) => {
                error!(
                    command = %invocation.name,
                    "Command panicked: {}",
                    panic_message(panic.as_ref())
                );
                self.notify_failure(&ctx).await;
                DispatchOutcome::Failed(invocation.name)
            }
        };

        info!(
            author = %ctx.message.author_name,
            channel = %ctx.message.channel_id,
            "{}",
            ctx.message.content
        );
        outcome
    }

    async fn notify_failure(&self, ctx: &CommandContext) {
        if let Err(e) = self.chat.reply(&ctx.message, FAILURE_REPLY).await {
            error!("Failed to send failure reply: {}", e);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
