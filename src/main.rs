// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Dashboard API Server
//!
//! Serves shoe mileage and heart-rate zone data for an athlete who has
//! connected their Strava account.

use std::sync::Arc;
use strava_dashboard::{config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Missing APP_URL / client credentials is fatal
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        app_url = %config.app_url,
        "Starting Strava dashboard API"
    );

    let state = Arc::new(AppState::new(config.clone()));
    let app = strava_dashboard::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_dashboard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
