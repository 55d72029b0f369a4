//! Error types for the control panel.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use discord_client::DiscordError;
use thiserror::Error;

/// Control panel errors. Responses carry the status code only.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Missing token, channelid or text")]
    MissingFields,

    #[error("Invalid token")]
    Unauthorized,

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Could not list channels: {0}")]
    ChannelsUnavailable(DiscordError),

    #[error("Send failed: {0}")]
    SendFailed(DiscordError),

    #[error("Template error: {0}")]
    Template(String),
}

impl PanelError {
    pub fn status(&self) -> StatusCode {
        match self {
            PanelError::MissingFields => StatusCode::BAD_REQUEST,
            PanelError::Unauthorized => StatusCode::UNAUTHORIZED,
            PanelError::ChannelNotFound(_) => StatusCode::NOT_ACCEPTABLE,
            PanelError::ChannelsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PanelError::SendFailed(_) => StatusCode::BAD_GATEWAY,
            PanelError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

impl From<handlebars::TemplateError> for PanelError {
    fn from(e: handlebars::TemplateError) -> Self {
        PanelError::Template(e.to_string())
    }
}

impl From<handlebars::RenderError> for PanelError {
    fn from(e: handlebars::RenderError) -> Self {
        PanelError::Template(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PanelError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(PanelError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            PanelError::ChannelNotFound("1".into()).status(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            PanelError::SendFailed(DiscordError::NoGuild).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_response_is_bare_status() {
        let response = PanelError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("content-type").is_none());
    }
}
