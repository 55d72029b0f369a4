//! HTTP request handlers.

use super::types::{IndexQuery, SendMessageBody};
use super::AppState;
use crate::error::PanelError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use discord_client::DiscordError;
use tracing::{error, info, warn};

/// Channel picker. An invalid token renders the error view without channel data.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response, PanelError> {
    let token = match query.token {
        Some(token) if state.auth.authorize(Some(&token)) => token,
        _ => {
            warn!("Control panel opened with an invalid token");
            return Ok(Html(state.views.error()?).into_response());
        }
    };

    let channels = match state.chat.text_channels().await {
        Ok(channels) => channels,
        Err(e) => {
            error!("Failed to list channels: {}", e);
            let page = state.views.error()?;
            return Ok((StatusCode::SERVICE_UNAVAILABLE, Html(page)).into_response());
        }
    };

    Ok(Html(state.views.index(&token, &channels)?).into_response())
}

/// Relay a message into a guild channel.
pub async fn send_message(
    State(state): State<AppState>,
    SendMessageBody(request): SendMessageBody,
) -> Result<StatusCode, PanelError> {
    let relay = request.into_relay()?;

    if !state.auth.authorize(Some(&relay.token)) {
        warn!("Rejected relay with an invalid token");
        return Err(PanelError::Unauthorized);
    }

    let channel = match state.chat.find_text_channel(&relay.channel_id).await {
        Ok(Some(channel)) => channel,
        Ok(None) | Err(DiscordError::NoGuild) => {
            return Err(PanelError::ChannelNotFound(relay.channel_id));
        }
        Err(e) => return Err(PanelError::ChannelsUnavailable(e)),
    };

    state
        .chat
        .send(&channel.id, &relay.text)
        .await
        .map_err(|e| {
            error!(channel = %channel.name, "Relay failed: {}", e);
            PanelError::SendFailed(e)
        })?;

    info!(channel = %channel.name, "Relayed message from control panel");
    Ok(StatusCode::OK)
}
