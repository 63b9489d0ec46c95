// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Default Strava REST API root.
pub const DEFAULT_STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";
/// Default Strava OAuth root (`/authorize`, `/token`).
pub const DEFAULT_STRAVA_OAUTH_BASE_URL: &str = "https://www.strava.com/oauth";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public URL of this app; Strava redirects here with `?code=`.
    pub app_url: String,
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Server port
    pub port: u16,
    /// Strava REST API root, overridable for tests.
    pub strava_api_base_url: String,
    /// Strava OAuth root, overridable for tests.
    pub strava_oauth_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            app_url: env::var("APP_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("APP_URL"))?,
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            strava_api_base_url: env::var("STRAVA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_STRAVA_API_BASE_URL.to_string()),
            strava_oauth_base_url: env::var("STRAVA_OAUTH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_STRAVA_OAUTH_BASE_URL.to_string()),
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            app_url: "http://localhost:8501".to_string(),
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            port: 8080,
            strava_api_base_url: DEFAULT_STRAVA_API_BASE_URL.to_string(),
            strava_oauth_base_url: DEFAULT_STRAVA_OAUTH_BASE_URL.to_string(),
        }
    }

    /// Test configuration with both Strava roots pointing at a stub server.
    pub fn test_with_provider(provider_url: &str) -> Self {
        Self {
            strava_api_base_url: format!("{}/api/v3", provider_url),
            strava_oauth_base_url: format!("{}/oauth", provider_url),
            ..Self::test_default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("APP_URL", " http://localhost:8501 ");
        env::set_var("STRAVA_CLIENT_ID", "test_id");
        env::set_var("STRAVA_CLIENT_SECRET", "test_secret\n");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.app_url, "http://localhost:8501");
        assert_eq!(config.strava_client_id, "test_id");
        assert_eq!(config.strava_client_secret, "test_secret");
        assert_eq!(config.port, 8080);
        assert_eq!(config.strava_api_base_url, DEFAULT_STRAVA_API_BASE_URL);
    }

    #[test]
    fn test_provider_override_paths() {
        let config = Config::test_with_provider("http://127.0.0.1:9999");
        assert_eq!(config.strava_api_base_url, "http://127.0.0.1:9999/api/v3");
        assert_eq!(config.strava_oauth_base_url, "http://127.0.0.1:9999/oauth");
        assert_eq!(config.strava_client_id, "test_client_id");
    }
}
