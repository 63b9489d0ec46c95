// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::AppError;
use crate::middleware::auth::{removal_cookie, session_cookie, session_marker, SESSION_COOKIE};
use crate::services::AuthOutcome;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_entry))
        .route("/auth/strava", get(auth_start))
        .route("/auth/logout", post(logout))
}

/// Query parameters on the dashboard entry point.
///
/// Strava redirects here with `code` (or `error` when the user declines).
#[derive(Deserialize)]
pub struct EntryParams {
    #[serde(default)]
    code: Option<String>,
    /// Session marker, for clients that do not keep cookies.
    #[serde(default)]
    session: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authentication state returned by the entry point.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryResponse {
    pub authenticated: bool,
    /// Link to Strava's consent page, present when not authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub athlete: Option<AthleteIdentity>,
    /// OAuth error reported by Strava on the redirect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthleteIdentity {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
}

/// Dashboard entry: authenticate from an inbound code or an existing session.
async fn dashboard_entry(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<EntryParams>,
) -> Response {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
        return Json(EntryResponse {
            authenticated: false,
            login_url: Some(state.auth.authorization_url()),
            athlete: None,
            error: Some(error),
        })
        .into_response();
    }

    let cookie_marker = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let has_prior_session = cookie_marker.is_some() || params.session.is_some();
    let stored_session = params.session.or(cookie_marker);

    let outcome = state
        .auth
        .authenticate(
            has_prior_session,
            params.code.as_deref(),
            stored_session.as_deref(),
        )
        .await;

    match outcome {
        AuthOutcome::NotAuthenticated => Json(EntryResponse {
            authenticated: false,
            login_url: Some(state.auth.authorization_url()),
            athlete: None,
            error: None,
        })
        .into_response(),
        AuthOutcome::Authenticated(session) => {
            let secure = state.config.app_url.starts_with("https://");
            let jar = jar.add(session_cookie(&session.marker, secure));
            let body = EntryResponse {
                authenticated: true,
                login_url: None,
                athlete: Some(AthleteIdentity {
                    athlete_id: session.auth.athlete_id,
                    firstname: session.auth.athlete_firstname.clone(),
                    lastname: session.auth.athlete_lastname.clone(),
                }),
                error: None,
            };
            (jar, Json(body)).into_response()
        }
        AuthOutcome::ExchangeFailed(reason) => {
            // Clear the marker so the next visit starts a clean login
            (jar.remove(removal_cookie()), AppError::AuthExchangeFailed(reason)).into_response()
        }
    }
}

/// Redirect to Strava's authorization page.
async fn auth_start(State(state): State<Arc<AppState>>) -> Redirect {
    tracing::info!(
        client_id = %state.config.strava_client_id,
        "Starting OAuth flow, redirecting to Strava"
    );
    Redirect::temporary(&state.auth.authorization_url())
}

/// Logout - drop the session and expire the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(marker) = session_marker(&jar, &headers) {
        state.auth.logout(&marker);
    }
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}
