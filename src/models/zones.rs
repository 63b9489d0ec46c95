// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Heart-rate zone distributions and their aggregate.

use serde::{Deserialize, Serialize};

/// Strava's fixed five-zone heart-rate model.
pub const ZONE_COUNT: usize = 5;

/// Time spent in one zone. Position in the distribution is the zone index.
///
/// Strava reports `time` as a JSON number that may carry a fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneBucket {
    #[serde(rename = "time")]
    pub time_seconds: f64,
}

/// Per-activity heart-rate time in zones, zone 1 first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityZoneDistribution {
    pub buckets: [ZoneBucket; ZONE_COUNT],
}

impl ActivityZoneDistribution {
    pub fn from_seconds(seconds: [u64; ZONE_COUNT]) -> Self {
        Self {
            buckets: seconds.map(|t| ZoneBucket {
                time_seconds: t as f64,
            }),
        }
    }

    /// Pick the heart-rate entry out of a `GET /activities/{id}/zones` body.
    ///
    /// Returns `Err` with a reason when there is no heart-rate entry or it
    /// does not have exactly five buckets.
    pub fn from_activity_zones(zones: &[StravaActivityZone]) -> Result<Self, String> {
        let heart_rate = zones
            .iter()
            .find(|z| z.zone_type == "heartrate")
            .ok_or_else(|| "no heart-rate zone distribution".to_string())?;

        let buckets: [ZoneBucket; ZONE_COUNT] = heart_rate
            .distribution_buckets
            .clone()
            .try_into()
            .map_err(|b: Vec<ZoneBucket>| {
                format!("expected {} heart-rate buckets, got {}", ZONE_COUNT, b.len())
            })?;

        Ok(Self { buckets })
    }
}

/// One entry of the `GET /activities/{id}/zones` array.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivityZone {
    #[serde(rename = "type")]
    pub zone_type: String,
    #[serde(default)]
    pub distribution_buckets: Vec<ZoneBucket>,
}

/// Minutes per heart-rate zone summed over a set of activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneAggregate {
    /// Whole minutes per zone, zone 1 first
    pub minutes: [u64; ZONE_COUNT],
    /// Activities whose zone data could not be fetched (counted as zero)
    pub unavailable: Vec<u64>,
}

impl ZoneAggregate {
    /// Add one activity's distribution, flooring each bucket to whole minutes.
    pub fn add(&mut self, distribution: &ActivityZoneDistribution) {
        for (slot, bucket) in self.minutes.iter_mut().zip(distribution.buckets.iter()) {
            // Negative or NaN times saturate to zero
            *slot += (bucket.time_seconds / 60.0).floor() as u64;
        }
    }
}
