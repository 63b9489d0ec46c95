// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Athlete profile, gear and zone definitions.

use serde::{Deserialize, Serialize};

/// Detailed athlete from `GET /athlete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    /// Running shoes registered as gear
    #[serde(default)]
    pub shoes: Vec<ShoeRecord>,
}

/// A pair of shoes from the athlete's gear list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Total distance in meters
    #[serde(default, rename = "distance")]
    pub distance_meters: f64,
    /// Distance converted to the athlete's unit (kilometers for metric)
    #[serde(rename = "converted_distance")]
    pub converted_distance_km: f64,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub retired: bool,
}

/// Zone definitions from `GET /athlete/zones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteZones {
    #[serde(default)]
    pub heart_rate: Option<HeartRateZones>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateZones {
    #[serde(default)]
    pub custom_zones: bool,
    pub zones: Vec<ZoneRange>,
}

/// Bounds of one zone in bpm. The open-ended top zone has `max == -1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRange {
    pub min: i32,
    pub max: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_athlete_without_shoes() {
        let athlete: Athlete = serde_json::from_value(serde_json::json!({
            "id": 7,
            "firstname": "Ada",
            "lastname": "Lovelace",
        }))
        .unwrap();
        assert!(athlete.shoes.is_empty());
    }

    #[test]
    fn test_shoe_field_names() {
        let shoe: ShoeRecord = serde_json::from_value(serde_json::json!({
            "id": "g123",
            "name": "Pegasus",
            "distance": 421337.0,
            "converted_distance": 421.3,
            "primary": true,
        }))
        .unwrap();
        assert_eq!(shoe.distance_meters, 421337.0);
        assert_eq!(shoe.converted_distance_km, 421.3);
        assert!(shoe.primary);
        assert!(!shoe.retired);
    }

    #[test]
    fn test_athlete_zones() {
        let zones: AthleteZones = serde_json::from_value(serde_json::json!({
            "heart_rate": {
                "custom_zones": false,
                "zones": [
                    {"min": 0, "max": 115},
                    {"min": 115, "max": 152},
                    {"min": 152, "max": 171},
                    {"min": 171, "max": 190},
                    {"min": 190, "max": -1}
                ]
            },
            "power": {"zones": []}
        }))
        .unwrap();
        let hr = zones.heart_rate.unwrap();
        assert_eq!(hr.zones.len(), 5);
        assert_eq!(hr.zones[4], ZoneRange { min: 190, max: -1 });
    }
}
