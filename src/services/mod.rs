// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod auth;
pub mod session;
pub mod strava;
pub mod zones;

pub use activity::{get_shoes, ActivityRepository};
pub use auth::{AuthFlow, AuthOutcome};
pub use session::{CacheKey, Session, SessionCache, SessionStore};
pub use strava::StravaClient;
pub use zones::{aggregate, ZoneFetcher};
