// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authorization state produced by a successful code exchange.

use std::fmt;

/// Access token plus the identity it belongs to. Immutable once created.
#[derive(Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub athlete_id: u64,
    pub athlete_firstname: String,
    pub athlete_lastname: String,
}

// Keep the bearer token out of logs.
impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("athlete_id", &self.athlete_id)
            .field("athlete_firstname", &self.athlete_firstname)
            .field("athlete_lastname", &self.athlete_lastname)
            .finish()
    }
}
