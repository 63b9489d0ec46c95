// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity repository.
//!
//! Session-scoped reads of the athlete profile and activity feed:
//! 1. Athlete detail and shoe projection
//! 2. Single pages of the activity feed
//! 3. Activities whose local start date falls within a date range
//! 4. Single activities and their heart-rate zone distributions
//!
//! Every read goes through the session's cache.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityZoneDistribution, Athlete, AthleteZones, ShoeRecord};
use crate::services::session::{CacheKey, Session};
use crate::services::strava::StravaClient;
use crate::services::zones::ZoneFetcher;
use chrono::NaiveDate;
use std::future::Future;

/// Read access to one athlete's Strava data.
#[derive(Clone)]
pub struct ActivityRepository {
    strava: StravaClient,
}

impl ActivityRepository {
    pub fn new(strava: StravaClient) -> Self {
        Self { strava }
    }

    /// Athlete profile including gear.
    pub async fn get_athlete(&self, session: &Session) -> Result<Athlete> {
        session
            .cache
            .memoize(CacheKey::Athlete, || {
                self.strava.get_athlete(session.access_token())
            })
            .await
    }

    /// The athlete's heart-rate zone definitions.
    pub async fn get_athlete_zones(&self, session: &Session) -> Result<AthleteZones> {
        session
            .cache
            .memoize(CacheKey::AthleteZones, || {
                self.strava.get_athlete_zones(session.access_token())
            })
            .await
    }

    /// One page (1-indexed) of the activity feed at the provider's page size.
    pub async fn get_activities_page(&self, session: &Session, page: u32) -> Result<Vec<Activity>> {
        if page == 0 {
            return Err(AppError::BadRequest("Page must be greater than 0".to_string()));
        }

        session
            .cache
            .memoize(CacheKey::ActivitiesPage(page), || {
                self.strava.list_activities(session.access_token(), page)
            })
            .await
    }

    /// Activities whose local start date lies in `[start, end]`.
    ///
    /// Walks the feed page by page and stops at the first page that
    /// contributes no matching activity. Any provider error aborts the scan
    /// and nothing collected so far is returned.
    pub async fn get_activities_in_range(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Activity>> {
        if start > end {
            return Err(AppError::BadRequest(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }

        session
            .cache
            .memoize(CacheKey::ActivitiesInRange(start, end), || {
                collect_in_range(start, end, |page| self.get_activities_page(session, page))
            })
            .await
    }

    /// A single activity by id.
    pub async fn get_activity(&self, session: &Session, activity_id: u64) -> Result<Activity> {
        session
            .cache
            .memoize(CacheKey::Activity(activity_id), || {
                self.strava.get_activity(session.access_token(), activity_id)
            })
            .await
    }

    /// Heart-rate time in zones for one activity.
    pub async fn get_activity_zones(
        &self,
        session: &Session,
        activity_id: u64,
    ) -> Result<ActivityZoneDistribution> {
        session
            .cache
            .memoize(CacheKey::ActivityZones(activity_id), || async {
                let zones = self
                    .strava
                    .get_activity_zones(session.access_token(), activity_id)
                    .await?;
                ActivityZoneDistribution::from_activity_zones(&zones).map_err(|reason| {
                    AppError::PartialDataUnavailable {
                        activity_id,
                        reason,
                    }
                })
            })
            .await
    }

    /// Bind this repository to a session for zone aggregation.
    pub fn zone_fetcher<'a>(&'a self, session: &'a Session) -> SessionZoneFetcher<'a> {
        SessionZoneFetcher {
            repo: self,
            session,
        }
    }
}

/// Shoes from the athlete's gear list. No network access.
pub fn get_shoes(athlete: &Athlete) -> Vec<ShoeRecord> {
    athlete.shoes.clone()
}

/// Page through a feed collecting activities within `[start, end]`.
///
/// Terminates when a page yields zero matches, not when a page is empty,
/// so a reverse-chronological feed stops once it has run past the window.
pub async fn collect_in_range<F, Fut>(
    start: NaiveDate,
    end: NaiveDate,
    mut fetch_page: F,
) -> Result<Vec<Activity>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<Activity>>>,
{
    let mut matched = Vec::new();
    let mut page = 1u32;

    loop {
        let activities = fetch_page(page).await?;
        let before = matched.len();

        matched.extend(
            activities
                .into_iter()
                .filter(|a| a.started_within(start, end)),
        );

        let page_matches = matched.len() - before;
        tracing::debug!(page, page_matches, "Scanned activity page");

        if page_matches == 0 {
            break;
        }
        page += 1;
    }

    tracing::debug!(
        %start,
        %end,
        total = matched.len(),
        pages = page,
        "Range scan complete"
    );
    Ok(matched)
}

/// [`ZoneFetcher`] reading through a session's cache.
pub struct SessionZoneFetcher<'a> {
    repo: &'a ActivityRepository,
    session: &'a Session,
}

impl ZoneFetcher for SessionZoneFetcher<'_> {
    async fn fetch_zones(&self, activity: &Activity) -> Result<ActivityZoneDistribution> {
        self.repo.get_activity_zones(self.session, activity.id).await
    }
}
