//! General commands.

mod help;
mod ping;

pub use help::HelpHandler;
pub use ping::PingHandler;

use super::CommandHandler;
use std::sync::Arc;

pub(super) fn handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![Arc::new(HelpHandler::new()), Arc::new(PingHandler)]
}
