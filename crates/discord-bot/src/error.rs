//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Discord error: {0}")]
    Discord(#[from] discord_client::DiscordError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Control panel error: {0}")]
    Panel(#[from] control_panel::PanelError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Command registration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    Duplicate(String),

    #[error("Invalid command name: {0:?}")]
    InvalidName(String),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
