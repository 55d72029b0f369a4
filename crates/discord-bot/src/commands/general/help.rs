//! Help command - lists available commands.

use crate::commands::{Category, CommandContext, CommandHandler, CommandRegistry};
use crate::error::AppResult;
use async_trait::async_trait;

pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }

    /// Render the command listing, grouped by category.
    pub fn render(registry: &CommandRegistry, prefix: &str) -> String {
        let mut text = String::from("**Commands:**");

        for category in Category::ALL {
            let handlers = registry.by_category(category);
            if handlers.is_empty() {
                continue;
            }

            text.push_str(&format!("\n\n__{}__", category));
            for handler in handlers {
                let usage = handler
                    .usage()
                    .map(|u| format!(" {}", u))
                    .unwrap_or_default();
                text.push_str(&format!(
                    "\n- `{}{}{}` - {}",
                    prefix,
                    handler.name(),
                    usage,
                    handler.description()
                ));
            }
        }

        text
    }
}

impl Default for HelpHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn category(&self) -> Category {
        Category::General
    }

    fn description(&self) -> &str {
        "Show this message"
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> AppResult<()> {
        ctx.say(&Self::render(&ctx.registry, &ctx.prefix)).await
    }
}
