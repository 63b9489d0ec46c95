// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod auth;
pub mod zones;

pub use activity::Activity;
pub use athlete::{Athlete, AthleteZones, ShoeRecord};
pub use auth::AuthSession;
pub use zones::{ActivityZoneDistribution, ZoneAggregate, ZoneBucket, ZONE_COUNT};
