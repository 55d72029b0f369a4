//! Fun commands.

mod coinflip;
mod roll;

pub use coinflip::CoinflipHandler;
pub use roll::RollHandler;

use super::CommandHandler;
use std::sync::Arc;

pub(super) fn handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![Arc::new(RollHandler), Arc::new(CoinflipHandler)]
}
