//! Route handlers.
//!
//! Each handler extracts its query parameters and delegates to the
//! [`Forwarder`](crate::forwarder::Forwarder). Failures render through
//! `IntoResponse for ForwardError`.

use axum::{
    extract::{RawQuery, State},
    Json,
};
use serde_json::Value;

use crate::forwarder::{ForwardError, MediaSearchResponse};
use crate::http::server::AppState;

/// Body of `GET /`.
pub const WELCOME: &str = "Welcome to the NASA API Media Server! This API provides data from NASA EPIC, APOD, and the NASA Media Library.";

/// First value of `key` in a raw query string.
///
/// Parsing never fails: repeated keys keep their first value and malformed
/// escapes decode lossily, so every request reaches the forwarder.
pub fn first_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub async fn root() -> &'static str {
    WELCOME
}

/// `GET /api/nasa-media?query=...`
pub async fn nasa_media(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<MediaSearchResponse>, ForwardError> {
    let query = first_param(raw.as_deref(), "query");
    state
        .forwarder
        .search_media(query.as_deref())
        .await
        .map(Json)
}

/// `GET /api/epic`
pub async fn epic(State(state): State<AppState>) -> Result<Json<Value>, ForwardError> {
    state.forwarder.epic_snapshots().await.map(Json)
}

/// `GET /api/epic/image?date=YYYY-MM-DD`
pub async fn epic_image(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, ForwardError> {
    let date = first_param(raw.as_deref(), "date");
    state
        .forwarder
        .epic_snapshots_by_date(date.as_deref())
        .await
        .map(Json)
}

/// `GET /api/apod`
pub async fn apod(State(state): State<AppState>) -> Result<Json<Value>, ForwardError> {
    state.forwarder.apod().await.map(Json)
}
