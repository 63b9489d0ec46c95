// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model as returned by the activity list endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Web URL for an activity on strava.com.
const STRAVA_ACTIVITY_URL: &str = "https://www.strava.com/activities";

/// Summary activity from `GET /athlete/activities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Sport type (Ride, Run, Hike, etc.)
    #[serde(default)]
    pub sport_type: String,
    /// Start time in UTC
    pub start_date: DateTime<Utc>,
    /// Start time in the athlete's local timezone.
    ///
    /// Strava encodes local wall-clock time with a `Z` suffix, so the
    /// calendar date is read straight off the value.
    pub start_date_local: DateTime<Utc>,
    /// Whether a heart-rate stream was recorded
    #[serde(default, rename = "has_heartrate")]
    pub has_heart_rate: bool,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
}

impl Activity {
    /// Local calendar date the activity started on.
    pub fn local_date(&self) -> NaiveDate {
        self.start_date_local.date_naive()
    }

    /// Whether the local start date lies within `[start, end]`, both inclusive.
    pub fn started_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let date = self.local_date();
        start <= date && date <= end
    }

    /// Link to the activity on strava.com.
    pub fn strava_url(&self) -> String {
        format!("{}/{}", STRAVA_ACTIVITY_URL, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(local: &str) -> Activity {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Morning Run",
            "sport_type": "Run",
            "start_date": "2024-03-04T06:30:00Z",
            "start_date_local": local,
            "has_heartrate": true,
            "distance": 5012.3,
            "moving_time": 1534,
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_summary_activity() {
        let a = activity("2024-03-03T22:30:00Z");
        assert_eq!(a.id, 42);
        assert!(a.has_heart_rate);
        // Local date wins over the UTC date
        assert_eq!(a.local_date(), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_missing_heartrate_defaults_false() {
        let a: Activity = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Walk",
            "start_date": "2024-03-04T06:30:00Z",
            "start_date_local": "2024-03-04T06:30:00Z",
        }))
        .unwrap();
        assert!(!a.has_heart_rate);
    }

    #[test]
    fn test_started_within_is_inclusive() {
        let a = activity("2024-03-04T23:59:59Z");
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

        assert!(a.started_within(d(4), d(4)));
        assert!(a.started_within(d(1), d(4)));
        assert!(a.started_within(d(4), d(10)));
        assert!(!a.started_within(d(5), d(10)));
        assert!(!a.started_within(d(1), d(3)));
    }

    #[test]
    fn test_strava_url() {
        assert_eq!(
            activity("2024-03-04T06:30:00Z").strava_url(),
            "https://www.strava.com/activities/42"
        );
    }
}
