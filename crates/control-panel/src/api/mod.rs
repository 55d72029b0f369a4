//! HTTP API for the control panel.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::auth::Authenticator;
use crate::error::PanelError;
use crate::views::Views;
use axum::{
    extract::Request,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use discord_client::ChatClient;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Static assets shipped with this crate.
pub const DEFAULT_PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Outbound Discord operations
    pub chat: Arc<dyn ChatClient>,
    /// Access check for both endpoints
    pub auth: Arc<dyn Authenticator>,
    /// Compiled page templates
    pub views: Arc<Views>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        chat: Arc<dyn ChatClient>,
        auth: impl Authenticator + 'static,
    ) -> Result<Self, PanelError> {
        Ok(Self {
            chat,
            auth: Arc::new(auth),
            views: Arc::new(Views::new()?),
        })
    }
}

/// Create the control panel router, serving static assets from `public_dir`.
pub fn create_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/sendMessage", post(handlers::send_message))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::debug_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .with_state(state)
}
