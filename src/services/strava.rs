// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Authorization URL construction and authorization code exchange
//! - Athlete profile, gear and zone definitions
//! - Paginated activity listing and per-activity zone distributions
//! - Response classification (401 vs. other failures)

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Activity, AthleteZones, Athlete, AuthSession};
use crate::models::zones::StravaActivityZone;
use serde::Deserialize;

/// Scopes requested at authorization time.
pub const STRAVA_SCOPE: &str = "activity:read_all,profile:read_all,activity:write";

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_base_url: String,
    oauth_base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl StravaClient {
    /// Create a new Strava client from application configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.strava_api_base_url.trim_end_matches('/').to_string(),
            oauth_base_url: config.strava_oauth_base_url.trim_end_matches('/').to_string(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
            redirect_uri: config.app_url.clone(),
        }
    }

    /// URL the user visits to grant access. Deterministic for a given config.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}/authorize?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}",
            self.oauth_base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(STRAVA_SCOPE),
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Any non-2xx answer, or a body that is not a token response, is an
    /// `AuthExchangeFailed`.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthSession, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::AuthExchangeFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::AuthExchangeFailed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenExchangeResponse = response.json().await.map_err(|e| {
            AppError::AuthExchangeFailed(format!("failed to parse token response: {}", e))
        })?;

        Ok(token.into())
    }

    /// Get authenticated athlete profile (includes shoes).
    pub async fn get_athlete(&self, access_token: &str) -> Result<Athlete, AppError> {
        let url = format!("{}/athlete", self.api_base_url);
        self.get_json(&url, access_token, &[]).await
    }

    /// Get the athlete's heart-rate and power zone definitions.
    pub async fn get_athlete_zones(&self, access_token: &str) -> Result<AthleteZones, AppError> {
        let url = format!("{}/athlete/zones", self.api_base_url);
        self.get_json(&url, access_token, &[]).await
    }

    /// List one page of the athlete's activities, newest first, at the
    /// provider's default page size (30).
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let url = format!("{}/athlete/activities", self.api_base_url);
        self.get_json(&url, access_token, &[("page", page.to_string())])
            .await
    }

    /// Get a single activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<Activity, AppError> {
        let url = format!("{}/activities/{}", self.api_base_url, activity_id);
        self.get_json(&url, access_token, &[]).await
    }

    /// Get the zone distributions (heart rate, power) recorded for an activity.
    pub async fn get_activity_zones(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<Vec<StravaActivityZone>, AppError> {
        let url = format!("{}/activities/{}/zones", self.api_base_url, activity_id);
        self.get_json(&url, access_token, &[]).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(AppError::transport)?;

        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();

    if status.as_u16() == 401 {
        tracing::warn!("Strava rejected access token (401)");
        return Err(AppError::ApiUnauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    response.json().await.map_err(|e| AppError::ApiError {
        status: status.as_u16(),
        message: format!("JSON parse error: {}", e),
    })
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    athlete: TokenAthlete,
}

/// Athlete summary embedded in the token response.
#[derive(Debug, Clone, Deserialize)]
struct TokenAthlete {
    id: u64,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
}

impl From<TokenExchangeResponse> for AuthSession {
    fn from(token: TokenExchangeResponse) -> Self {
        AuthSession {
            access_token: token.access_token,
            athlete_id: token.athlete.id,
            athlete_firstname: token.athlete.firstname,
            athlete_lastname: token.athlete.lastname,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url() {
        let client = StravaClient::new(&Config::test_default());
        assert_eq!(
            client.authorization_url(),
            "https://www.strava.com/oauth/authorize?client_id=test_client_id\
             &redirect_uri=http%3A%2F%2Flocalhost%3A8501\
             &response_type=code&approval_prompt=auto\
             &scope=activity%3Aread_all%2Cprofile%3Aread_all%2Cactivity%3Awrite"
        );
    }

    #[test]
    fn test_authorization_url_is_deterministic() {
        let client = StravaClient::new(&Config::test_default());
        assert_eq!(client.authorization_url(), client.authorization_url());
    }

    #[test]
    fn test_token_response_to_session() {
        let token: TokenExchangeResponse = serde_json::from_value(serde_json::json!({
            "token_type": "Bearer",
            "expires_at": 1700000000,
            "expires_in": 21600,
            "refresh_token": "r",
            "access_token": "a",
            "athlete": {"id": 99, "firstname": "Ada", "lastname": "Lovelace"}
        }))
        .unwrap();
        let session = AuthSession::from(token);
        assert_eq!(session.access_token, "a");
        assert_eq!(session.athlete_id, 99);
        assert_eq!(session.athlete_firstname, "Ada");
        assert_eq!(session.athlete_lastname, "Lovelace");
    }
}
