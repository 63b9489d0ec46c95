// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod auth;

use crate::middleware::auth::require_session;
use crate::AppState;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// Sessions currently held in memory
    pub sessions: usize,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
        sessions: state.sessions.len(),
    })
}

/// Origins allowed to call the API with credentials: the dashboard itself
/// and local development servers.
fn is_allowed_origin(origin: &str, app_url: &str) -> bool {
    origin == app_url
        || origin.starts_with("http://localhost")
        || origin.starts_with("http://127.0.0.1")
}

fn cors_layer(app_url: &str) -> CorsLayer {
    let app_url = app_url.trim_end_matches('/').to_string();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| is_allowed_origin(o, &app_url))
                .unwrap_or(false)
        }))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// Build the dashboard router.
///
/// `/health` and the login routes are open; everything under `/api`
/// requires a live session.
pub fn create_router(state: Arc<AppState>) -> Router {
    let session_guard = middleware::from_fn_with_state(state.clone(), require_session);

    Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes())
        .merge(api::routes().route_layer(session_guard))
        .layer(cors_layer(&state.config.app_url))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let app = "https://dash.example.com";
        assert!(is_allowed_origin("https://dash.example.com", app));
        assert!(is_allowed_origin("http://localhost:5173", app));
        assert!(is_allowed_origin("http://127.0.0.1:8501", app));
        assert!(!is_allowed_origin("https://evil.example.com", app));
        assert!(!is_allowed_origin("https://dash.example.com.evil.net", app));
    }
}
