// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session resolution middleware and session cookie helpers.

use crate::error::AppError;
use crate::services::Session;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Cookie carrying the session marker.
pub const SESSION_COOKIE: &str = "strava_session";

/// Session resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Arc<Session>);

/// Session marker from the cookie, falling back to `Authorization: Bearer`.
pub fn session_marker(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Cookie that keeps the session across page loads.
pub fn session_cookie(marker: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, marker.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that clears the session marker. Path must match `session_cookie`.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Middleware that requires a live session.
///
/// If the handler answers 401 (Strava rejected the token) the session is
/// discarded so the next request starts a fresh login.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(marker) = session_marker(&jar, request.headers()) else {
        return AppError::Unauthorized.into_response();
    };

    let Some(session) = state.sessions.get(&marker) else {
        tracing::debug!("Unknown session marker");
        return (jar.remove(removal_cookie()), AppError::Unauthorized).into_response();
    };

    let athlete_id = session.auth.athlete_id;
    request.extensions_mut().insert(CurrentSession(session));

    let response = next.run(request).await;

    if response.status() == StatusCode::UNAUTHORIZED {
        tracing::warn!(athlete_id, "Strava rejected session token, discarding session");
        state.sessions.remove(&marker);
        return (jar.remove(removal_cookie()), response).into_response();
    }

    response
}
