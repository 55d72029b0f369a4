//! Utility commands.

mod channels;
mod echo;
mod userinfo;

pub use channels::ChannelsHandler;
pub use echo::EchoHandler;
pub use userinfo::UserInfoHandler;

use super::CommandHandler;
use std::sync::Arc;

pub(super) fn handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(EchoHandler),
        Arc::new(UserInfoHandler),
        Arc::new(ChannelsHandler),
    ]
}
