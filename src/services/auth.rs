// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth authorization-code flow against Strava.
//!
//! The marker that identifies a session is the authorization code that
//! created it. On the first visit Strava redirects with `?code=`; the caller
//! then hands the same value back as its session marker on every later
//! request so the exchange is not repeated.

use crate::error::AppError;
use crate::models::AuthSession;
use crate::services::session::{Session, SessionStore};
use crate::services::strava::StravaClient;
use std::sync::Arc;

/// Result of an authentication attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Neither a code nor a session marker was presented.
    NotAuthenticated,
    Authenticated(Arc<Session>),
    /// The token endpoint refused the code. Terminal for this attempt; the
    /// caller must drop any code/session markers it holds.
    ExchangeFailed(String),
}

impl AuthOutcome {
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            AuthOutcome::Authenticated(session) => Some(&session.auth),
            _ => None,
        }
    }
}

/// Drives code exchange and session bookkeeping.
#[derive(Clone)]
pub struct AuthFlow {
    client: StravaClient,
    sessions: SessionStore,
}

impl AuthFlow {
    pub fn new(client: StravaClient, sessions: SessionStore) -> Self {
        Self { client, sessions }
    }

    /// Login link to show when unauthenticated.
    pub fn authorization_url(&self) -> String {
        self.client.authorization_url()
    }

    /// Authenticate from whatever the request carried.
    ///
    /// A fresh `inbound_code` always takes precedence over `stored_session`,
    /// so following the login link again never resumes a stale session.
    /// When `has_prior_session` is set and the chosen marker already has a
    /// live session, it is returned without contacting Strava. The same
    /// holds for an inbound code that was already exchanged. A successful
    /// exchange ends the session under any different stored marker.
    pub async fn authenticate(
        &self,
        has_prior_session: bool,
        inbound_code: Option<&str>,
        stored_session: Option<&str>,
    ) -> AuthOutcome {
        let marker = match select_marker(inbound_code, stored_session) {
            Some(marker) => marker,
            None => return AuthOutcome::NotAuthenticated,
        };

        // A code is single-use, so a reload carrying an already exchanged
        // code resumes its session even without a prior-session marker.
        if has_prior_session || inbound_code == Some(marker) {
            if let Some(session) = self.sessions.get(marker) {
                tracing::debug!(athlete_id = session.auth.athlete_id, "Resuming session");
                return AuthOutcome::Authenticated(session);
            }
        }

        tracing::info!(
            fresh_code = inbound_code.is_some(),
            "Exchanging authorization code for tokens"
        );

        match self.client.exchange_code(marker).await {
            Ok(auth) => {
                tracing::info!(
                    athlete_id = auth.athlete_id,
                    firstname = %auth.athlete_firstname,
                    "OAuth successful, session stored"
                );
                // The superseded session ends here
                if let Some(old) = stored_session.filter(|old| *old != marker) {
                    if self.sessions.remove(old) {
                        tracing::debug!("Dropped superseded session");
                    }
                }
                AuthOutcome::Authenticated(self.sessions.insert(marker, auth))
            }
            Err(AppError::AuthExchangeFailed(reason)) => {
                self.sessions.remove(marker);
                AuthOutcome::ExchangeFailed(reason)
            }
            Err(other) => {
                self.sessions.remove(marker);
                AuthOutcome::ExchangeFailed(other.to_string())
            }
        }
    }

    /// End a session. Returns whether one existed.
    pub fn logout(&self, marker: &str) -> bool {
        let removed = self.sessions.remove(marker);
        if removed {
            tracing::info!("Session logged out");
        }
        removed
    }
}

/// Pick the marker to authenticate with, ignoring blank values.
fn select_marker<'a>(inbound_code: Option<&'a str>, stored_session: Option<&'a str>) -> Option<&'a str> {
    let present = |v: Option<&'a str>| v.filter(|s| !s.trim().is_empty());
    present(inbound_code).or(present(stored_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_select_marker_prefers_inbound_code() {
        assert_eq!(select_marker(Some("new"), Some("old")), Some("new"));
        assert_eq!(select_marker(None, Some("old")), Some("old"));
        assert_eq!(select_marker(Some("new"), None), Some("new"));
        assert_eq!(select_marker(None, None), None);
    }

    #[test]
    fn test_select_marker_ignores_blank_values() {
        assert_eq!(select_marker(Some(""), Some("old")), Some("old"));
        assert_eq!(select_marker(Some("  "), None), None);
    }

    #[tokio::test]
    async fn test_no_code_no_session_is_not_authenticated() {
        let flow = AuthFlow::new(
            StravaClient::new(&Config::test_default()),
            SessionStore::new(),
        );
        for has_prior in [false, true] {
            let outcome = flow.authenticate(has_prior, None, None).await;
            assert!(matches!(outcome, AuthOutcome::NotAuthenticated));
        }
    }

    #[tokio::test]
    async fn test_prior_session_resumes_without_exchange() {
        let sessions = SessionStore::new();
        sessions.insert(
            "code-abc",
            AuthSession {
                access_token: "t".to_string(),
                athlete_id: 5,
                athlete_firstname: "Ada".to_string(),
                athlete_lastname: "Lovelace".to_string(),
            },
        );
        // Unroutable provider: any network call would fail the exchange.
        let mut config = Config::test_default();
        config.strava_oauth_base_url = "http://127.0.0.1:1/oauth".to_string();
        let flow = AuthFlow::new(StravaClient::new(&config), sessions);

        let outcome = flow.authenticate(true, None, Some("code-abc")).await;
        assert_eq!(outcome.session().map(|s| s.athlete_id), Some(5));
    }
}
