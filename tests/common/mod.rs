// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use strava_dashboard::config::Config;
use strava_dashboard::models::AuthSession;
use strava_dashboard::routes::create_router;
use strava_dashboard::AppState;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test app whose Strava calls go to `provider_url`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(provider_url: &str) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_with_provider(provider_url)));
    (create_router(state.clone()), state)
}

/// Put a ready-made session in the store, as if `marker` had been exchanged.
#[allow(dead_code)]
pub fn seed_session(state: &AppState, marker: &str, athlete_id: u64) {
    state.sessions.insert(
        marker,
        AuthSession {
            access_token: format!("access-{}", athlete_id),
            athlete_id,
            athlete_firstname: "Ada".to_string(),
            athlete_lastname: "Lovelace".to_string(),
        },
    );
}

/// Token endpoint body as Strava returns it.
#[allow(dead_code)]
pub fn token_response(athlete_id: u64, firstname: &str, lastname: &str) -> Value {
    json!({
        "token_type": "Bearer",
        "expires_at": 1_900_000_000,
        "expires_in": 21600,
        "refresh_token": "refresh-token",
        "access_token": format!("access-{}", athlete_id),
        "athlete": {
            "id": athlete_id,
            "firstname": firstname,
            "lastname": lastname,
            "profile": null
        }
    })
}

/// Mount a token endpoint accepting exactly `code`, expected `times` times.
#[allow(dead_code)]
pub async fn mock_token_exchange(server: &MockServer, code: &str, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains(format!("code={}", code)))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Summary activity JSON with a local start date.
#[allow(dead_code)]
pub fn activity_json(id: u64, local_date: &str, has_heartrate: bool) -> Value {
    json!({
        "id": id,
        "name": format!("Activity {}", id),
        "sport_type": "Run",
        "start_date": format!("{}T14:00:00Z", local_date),
        "start_date_local": format!("{}T07:00:00Z", local_date),
        "has_heartrate": has_heartrate,
        "distance": 5000.0,
        "moving_time": 1500
    })
}

/// GET request carrying the session cookie.
#[allow(dead_code)]
pub fn get_with_session(uri: &str, marker: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, format!("strava_session={}", marker))
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// All Set-Cookie header values on a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}
