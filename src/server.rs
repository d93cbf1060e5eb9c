//! HTTP boundary: the single interactions webhook route.
//!
//! Signature verification happens on the raw body before any parsing, so
//! unverified payloads never reach the dispatcher.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serenity::http::Http;
use serenity::interactions_endpoint::Verifier;
use serenity::model::application::Interaction;
use tracing::{debug, warn};
use url::Url;

use crate::cards::catalog::CatalogSource;
use crate::interactions::{self, SlashCommand};

/// Per-process state shared by every request.
pub struct AppState {
    pub http: Http,
    pub verifier: Verifier,
    pub catalog: Box<dyn CatalogSource>,
    pub media_base: Url,
    pub commands: Vec<Box<dyn SlashCommand>>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/interactions", post(interactions_endpoint))
        .with_state(state)
}

async fn interactions_endpoint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = header_str(&headers, "X-Signature-Ed25519");
    let timestamp = header_str(&headers, "X-Signature-Timestamp");
    if state.verifier.verify(signature, timestamp, &body).is_err() {
        debug!("rejected interaction with a bad signature");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(err) => {
            warn!(error = %err, "could not decode interaction payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    Json(interactions::dispatch(&state, interaction).await).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
