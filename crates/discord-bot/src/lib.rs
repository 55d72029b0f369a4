//! Discord command bot with a web control panel.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod presence;

pub use config::Config;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{AppError, AppResult};
