//! HTTP routes
//!
//! The preview surface is mounted under the configured routing prefix. A
//! request without a session identifier is a client error and creates no
//! session.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::views;

pub fn router(state: AppState) -> Router {
    let prefix = state.previewer.config().route_prefix.clone();

    Router::new()
        .route("/health", get(health))
        .route(&prefix, get(missing_id))
        .route(&format!("{}/", prefix), get(missing_id))
        .route(&format!("{}/{{id}}", prefix), get(preview_root))
        .route(&format!("{}/{{id}}/{{*rest}}", prefix), get(preview_route))
        .route("/api/preview/{id}/refresh", post(refresh_preview))
        .route("/api/preview/{id}/file-change", post(file_change))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn missing_id() -> Response {
    (StatusCode::BAD_REQUEST, "Preview ID is required").into_response()
}

async fn preview_root(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> Response {
    render_preview(&state, &id, uri.path())
}

async fn preview_route(
    State(state): State<AppState>,
    Path((id, _rest)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    render_preview(&state, &id, uri.path())
}

fn render_preview(state: &AppState, session_id: &str, request_path: &str) -> Response {
    let request = match state.previewer.resolve_request(Some(session_id), request_path) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    let address = match state
        .previewer
        .build_address(&request.session_id, &request.path)
    {
        Ok(address) => address,
        Err(e) => return error_response(e),
    };

    tracing::info!(
        session_id = %request.session_id,
        path = %request.path,
        address = %address,
        "Serving preview shell"
    );

    views::preview_shell(
        &request.session_id,
        &address,
        &state.previewer.config().channel,
    )
    .into_response()
}

async fn refresh_preview(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.previewer.notify_refresh(&id) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(e),
    }
}

async fn file_change(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.previewer.notify_file_change(&id) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: periscope_core::CoreError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, error.to_string()).into_response()
}
