// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava dashboard backend.
//!
//! Authenticates athletes against Strava and serves the data behind the
//! dashboard charts: distance per shoe and time in heart-rate zones over a
//! date range.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityRepository, AuthFlow, SessionStore, StravaClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub auth: AuthFlow,
    pub activities: ActivityRepository,
}

impl AppState {
    /// Wire up services from configuration. Sessions start empty.
    pub fn new(config: Config) -> Self {
        let strava = StravaClient::new(&config);
        let sessions = SessionStore::new();

        Self {
            auth: AuthFlow::new(strava.clone(), sessions.clone()),
            activities: ActivityRepository::new(strava),
            sessions,
            config,
        }
    }
}
