// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated sessions.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentSession;
use crate::models::{Activity, ZONE_COUNT};
use crate::services::{aggregate, get_shoes};
use crate::time_utils::{default_week_range, format_utc_rfc3339, parse_date};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require a session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/shoes", get(get_shoes_handler))
        .route("/api/activities", get(get_activities))
        .route("/api/activities/range", get(get_activities_in_range))
        .route("/api/activities/{id}", get(get_activity))
        .route("/api/zones", get(get_zone_totals))
        .route("/api/athlete/zones", get(get_athlete_zones))
}

// ─── User Profile ────────────────────────────────────────────

/// Current athlete response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
}

/// Identity from the token exchange; no Strava call.
async fn get_me(Extension(CurrentSession(session)): Extension<CurrentSession>) -> Json<MeResponse> {
    Json(MeResponse {
        athlete_id: session.auth.athlete_id,
        firstname: session.auth.athlete_firstname.clone(),
        lastname: session.auth.athlete_lastname.clone(),
    })
}

// ─── Shoes ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShoesResponse {
    pub shoes: Vec<ShoeSummary>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShoeSummary {
    pub name: String,
    pub distance_km: f64,
    pub primary: bool,
    pub retired: bool,
}

/// Distance per shoe for the bar chart.
async fn get_shoes_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<ShoesResponse>> {
    let athlete = state.activities.get_athlete(&session).await?;

    let shoes = get_shoes(&athlete)
        .into_iter()
        .map(|s| ShoeSummary {
            name: s.name,
            distance_km: s.converted_distance_km,
            primary: s.primary,
            retired: s.retired,
        })
        .collect();

    Ok(Json(ShoesResponse { shoes }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct PageQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Deserialize)]
struct RangeQuery {
    /// First day, `YYYY-MM-DD`
    start: Option<String>,
    /// Last day (inclusive), `YYYY-MM-DD`
    end: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub start_date: String,
    /// Local calendar date (`YYYY-MM-DD`)
    pub local_date: String,
    pub has_heart_rate: bool,
    pub distance_meters: f64,
    pub strava_url: String,
}

impl From<&Activity> for ActivitySummary {
    fn from(a: &Activity) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            sport_type: a.sport_type.clone(),
            start_date: format_utc_rfc3339(a.start_date),
            local_date: a.local_date().to_string(),
            has_heart_rate: a.has_heart_rate,
            distance_meters: a.distance,
            strava_url: a.strava_url(),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub page: u32,
    pub activities: Vec<ActivitySummary>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityRangeResponse {
    pub start: String,
    pub end: String,
    pub activities: Vec<ActivitySummary>,
}

/// One page of the activity feed.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ActivitiesResponse>> {
    tracing::debug!(
        athlete_id = session.auth.athlete_id,
        page = params.page,
        "Fetching activities page"
    );

    let activities = state
        .activities
        .get_activities_page(&session, params.page)
        .await?;

    Ok(Json(ActivitiesResponse {
        page: params.page,
        activities: activities.iter().map(ActivitySummary::from).collect(),
    }))
}

/// A single activity.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(id): Path<u64>,
) -> Result<Json<ActivitySummary>> {
    let activity = state.activities.get_activity(&session, id).await?;
    Ok(Json(ActivitySummary::from(&activity)))
}

/// Activities whose local start date falls within `[start, end]`.
async fn get_activities_in_range(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<ActivityRangeResponse>> {
    let (start, end) = parse_range(&params)?.ok_or_else(|| {
        AppError::BadRequest("Both 'start' and 'end' are required".to_string())
    })?;

    let activities = state
        .activities
        .get_activities_in_range(&session, start, end)
        .await?;

    Ok(Json(ActivityRangeResponse {
        start: start.to_string(),
        end: end.to_string(),
        activities: activities.iter().map(ActivitySummary::from).collect(),
    }))
}

/// Parse an optional `[start, end]` pair. Neither given is `None`; exactly
/// one given, an unparseable date or `start > end` is a bad request.
fn parse_range(params: &RangeQuery) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let parse = |name: &str, raw: &str| {
        parse_date(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid '{}' parameter: expected YYYY-MM-DD", name))
        })
    };

    match (params.start.as_deref(), params.end.as_deref()) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = parse("start", start)?;
            let end = parse("end", end)?;
            if start > end {
                return Err(AppError::BadRequest(
                    "'start' must not be after 'end'".to_string(),
                ));
            }
            Ok(Some((start, end)))
        }
        _ => Err(AppError::BadRequest(
            "'start' and 'end' must be given together".to_string(),
        )),
    }
}

// ─── Heart-Rate Zones ────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneTotalsResponse {
    pub start: String,
    pub end: String,
    /// Activities in range (with or without heart-rate data)
    pub activity_count: u32,
    /// Minutes per zone, zone 1 first
    pub zones: Vec<ZoneMinutes>,
    /// Activities whose zone data could not be loaded (counted as zero)
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<number>"))]
    pub unavailable_activity_ids: Vec<u64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneMinutes {
    /// 1-based zone number
    pub zone: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub minutes: u64,
}

/// Time in heart-rate zones over a date range (default: this week so far).
async fn get_zone_totals(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<ZoneTotalsResponse>> {
    let (start, end) = match parse_range(&params)? {
        Some(range) => range,
        None => default_week_range(chrono::Local::now().date_naive()),
    };

    let activities = state
        .activities
        .get_activities_in_range(&session, start, end)
        .await?;

    let fetcher = state.activities.zone_fetcher(&session);
    let totals = aggregate(&activities, &fetcher).await?;

    tracing::debug!(
        athlete_id = session.auth.athlete_id,
        %start,
        %end,
        activities = activities.len(),
        unavailable = totals.unavailable.len(),
        "Aggregated heart-rate zones"
    );

    Ok(Json(ZoneTotalsResponse {
        start: start.to_string(),
        end: end.to_string(),
        activity_count: activities.len() as u32,
        zones: totals
            .minutes
            .iter()
            .enumerate()
            .map(|(i, &minutes)| ZoneMinutes {
                zone: i as u32 + 1,
                minutes,
            })
            .collect(),
        unavailable_activity_ids: totals.unavailable,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthleteZonesResponse {
    pub custom_zones: bool,
    pub zones: Vec<ZoneBounds>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneBounds {
    pub zone: u32,
    pub min_bpm: i32,
    /// `None` for the open-ended top zone
    pub max_bpm: Option<i32>,
}

/// The athlete's heart-rate zone boundaries, for labelling the zone chart.
async fn get_athlete_zones(
    State(state): State<Arc<AppState>>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<AthleteZonesResponse>> {
    let zones = state.activities.get_athlete_zones(&session).await?;

    let Some(heart_rate) = zones.heart_rate else {
        return Ok(Json(AthleteZonesResponse {
            custom_zones: false,
            zones: vec![],
        }));
    };

    if heart_rate.zones.len() != ZONE_COUNT {
        tracing::warn!(
            count = heart_rate.zones.len(),
            "Unexpected number of heart-rate zones"
        );
    }

    Ok(Json(AthleteZonesResponse {
        custom_zones: heart_rate.custom_zones,
        zones: heart_rate
            .zones
            .iter()
            .enumerate()
            .map(|(i, z)| ZoneBounds {
                zone: i as u32 + 1,
                min_bpm: z.min,
                max_bpm: (z.max >= 0).then_some(z.max),
            })
            .collect(),
    }))
}
