// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No session attached to the request.
    #[error("Authentication required")]
    Unauthorized,

    /// Strava rejected the authorization code exchange.
    #[error("Strava token exchange failed: {0}")]
    AuthExchangeFailed(String),

    /// Strava answered 401 to an authenticated call.
    #[error("Strava rejected the access token")]
    ApiUnauthorized,

    #[error("Strava API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Zone data for a single activity could not be fetched.
    #[error("Zone data unavailable for activity {activity_id}: {reason}")]
    PartialDataUnavailable { activity_id: u64, reason: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error means the session's token is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::ApiUnauthorized | AppError::Unauthorized)
    }

    /// Transport-level failure talking to Strava (no HTTP status available).
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AppError::ApiError {
            status: 0,
            message: err.to_string(),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::AuthExchangeFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                "auth_exchange_failed",
                Some(msg.clone()),
            ),
            AppError::ApiUnauthorized => {
                (StatusCode::UNAUTHORIZED, "strava_unauthorized", None)
            }
            AppError::ApiError { .. } => {
                (StatusCode::BAD_GATEWAY, "strava_error", Some(self.to_string()))
            }
            AppError::PartialDataUnavailable { .. } => (
                StatusCode::BAD_GATEWAY,
                "partial_data_unavailable",
                Some(self.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
