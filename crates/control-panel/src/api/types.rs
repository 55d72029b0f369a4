//! API request types.

use crate::error::PanelError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub token: Option<String>,
}

/// Body of `POST /sendMessage`.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub token: Option<String>,
    pub channelid: Option<String>,
    pub text: Option<String>,
}

/// A fully populated send request.
#[derive(Debug, PartialEq, Eq)]
pub struct RelayMessage {
    pub token: String,
    pub channel_id: String,
    pub text: String,
}

impl SendMessageRequest {
    /// All three fields, or `MissingFields` if any is absent or empty.
    pub fn into_relay(self) -> Result<RelayMessage, PanelError> {
        match (non_empty(self.token), non_empty(self.channelid), non_empty(self.text)) {
            (Some(token), Some(channel_id), Some(text)) => Ok(RelayMessage {
                token,
                channel_id,
                text,
            }),
            _ => Err(PanelError::MissingFields),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

/// Accepts `SendMessageRequest` either form-encoded or as JSON.
pub struct SendMessageBody(pub SendMessageRequest);

#[async_trait]
impl<S> FromRequest<S> for SendMessageBody
where
    S: Send + Sync,
{
    type Rejection = PanelError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = if is_json {
            Json::<SendMessageRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|_| PanelError::MissingFields)?
        } else {
            Form::<SendMessageRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|_| PanelError::MissingFields)?
        };

        Ok(Self(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_relay_complete() {
        let request = SendMessageRequest {
            token: Some("t".into()),
            channelid: Some("1".into()),
            text: Some("hello  there".into()),
        };
        assert_eq!(
            request.into_relay().unwrap(),
            RelayMessage {
                token: "t".into(),
                channel_id: "1".into(),
                text: "hello  there".into(),
            }
        );
    }

    #[test]
    fn test_into_relay_missing_or_empty() {
        let missing_text = SendMessageRequest {
            token: Some("t".into()),
            channelid: Some("1".into()),
            text: None,
        };
        assert!(matches!(
            missing_text.into_relay(),
            Err(PanelError::MissingFields)
        ));

        let empty_token = SendMessageRequest {
            token: Some(String::new()),
            channelid: Some("1".into()),
            text: Some("hi".into()),
        };
        assert!(matches!(
            empty_token.into_relay(),
            Err(PanelError::MissingFields)
        ));

        assert!(SendMessageRequest::default().into_relay().is_err());
    }
}
