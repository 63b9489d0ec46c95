// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heart-rate zone aggregation across activities.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityZoneDistribution, ZoneAggregate};
use std::future::Future;

/// Source of per-activity zone distributions.
pub trait ZoneFetcher {
    /// Heart-rate time in zones for one activity.
    fn fetch_zones(
        &self,
        activity: &Activity,
    ) -> impl Future<Output = Result<ActivityZoneDistribution>> + Send;
}

/// Sum time in each heart-rate zone over `activities`, in whole minutes.
///
/// Activities without heart-rate data are skipped. A failed zone fetch is
/// logged, counts as zero and is listed in `unavailable`. The one exception
/// is a rejected access token, which aborts with `ApiUnauthorized` so the
/// session can be discarded.
pub async fn aggregate<Z: ZoneFetcher>(
    activities: &[Activity],
    fetcher: &Z,
) -> Result<ZoneAggregate> {
    let mut total = ZoneAggregate::default();

    for activity in activities.iter().filter(|a| a.has_heart_rate) {
        match fetcher.fetch_zones(activity).await {
            Ok(distribution) => total.add(&distribution),
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                let reason = match e {
                    AppError::PartialDataUnavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                let err = AppError::PartialDataUnavailable {
                    activity_id: activity.id,
                    reason,
                };
                tracing::warn!(activity_id = activity.id, error = %err, "Skipping activity zones");
                total.unavailable.push(activity.id);
            }
        }
    }

    Ok(total)
}
