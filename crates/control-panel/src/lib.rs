//! Control panel: a token-gated web form that relays a message into one of
//! the bot's Discord channels.
//!
//! - `GET /?token=...` renders the channel picker
//! - `POST /sendMessage` with `token`, `channelid` and `text` sends the text

pub mod api;
pub mod auth;
pub mod error;
pub mod views;

pub use api::{create_router, AppState, DEFAULT_PUBLIC_DIR};
pub use auth::{Authenticator, SharedSecret};
pub use error::PanelError;
pub use views::Views;
