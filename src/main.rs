// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker
//!
//! Reconciles the workout documents in a notes vault after manual edits and
//! prints statistics over them as JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config, services::WorkoutFileService, storage::FsDocumentStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured JSON logging on stderr; stdout carries the report
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        vault = %config.vault_root.display(),
        folder = %config.workout_folder,
        auto_sync = config.enable_auto_sync,
        "Starting Workout Tracker"
    );

    let store = FsDocumentStore::new(&config.vault_root);
    let service = WorkoutFileService::new(store, config.workout_folder.clone());

    if config.enable_auto_sync {
        let rewritten = service.sync_all().await?;
        tracing::info!(rewritten, "Workout documents reconciled");
    }

    let stats = service.statistics().await?;
    tracing::info!(
        total_workouts = stats.total_workouts,
        current_streak = stats.current_streak,
        "Statistics computed"
    );

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
