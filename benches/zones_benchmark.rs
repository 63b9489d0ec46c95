use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strava_dashboard::error::Result;
use strava_dashboard::models::{Activity, ActivityZoneDistribution};
use strava_dashboard::services::activity::collect_in_range;
use strava_dashboard::services::{aggregate, ZoneFetcher};

/// Zone source with no I/O so only the aggregation itself is measured.
struct FixedZones;

impl ZoneFetcher for FixedZones {
    async fn fetch_zones(&self, activity: &Activity) -> Result<ActivityZoneDistribution> {
        let base = activity.id % 600;
        Ok(ActivityZoneDistribution::from_seconds([
            base,
            base * 2,
            base * 3,
            base / 2,
            60,
        ]))
    }
}

/// A year of daily activities, newest first, like the Strava feed.
fn synthetic_feed(count: u64) -> Vec<Activity> {
    let newest = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    (0..count)
        .map(|i| {
            let day = newest - Duration::days(i as i64);
            serde_json::from_value(serde_json::json!({
                "id": i,
                "name": format!("Activity {}", i),
                "start_date": format!("{}T12:00:00Z", day),
                "start_date_local": format!("{}T07:00:00Z", day),
                "has_heartrate": i % 3 != 0,
            }))
            .expect("valid activity")
        })
        .collect()
}

fn benchmark_zone_aggregation(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("Failed to build runtime");
    let feed = synthetic_feed(365);

    let mut group = c.benchmark_group("zones");

    group.bench_function("aggregate_year", |b| {
        b.iter(|| runtime.block_on(aggregate(black_box(&feed), &FixedZones)))
    });

    let pages: Vec<Vec<Activity>> = feed.chunks(30).map(|c| c.to_vec()).collect();
    let start = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    // Last quarter spans pages 1-4; page 5 has no matches and ends the scan
    group.bench_function("range_scan_quarter", |b| {
        b.iter(|| {
            runtime.block_on(collect_in_range(start, end, |page| {
                let body = pages.get(page as usize - 1).cloned().unwrap_or_default();
                async move { Ok(body) }
            }))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_zone_aggregation);
criterion_main!(benches);
