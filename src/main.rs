//! TrunkRate server
//!
//! HTTP host for the call-rating and override-resolution engine: loads
//! configuration, optionally seeds trunk rating snapshots from a JSON
//! file, and serves the rating API.

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use std::env;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trunkrate_api::{configure_margin, configure_trunks, AppState, MemoryTrunkStore};
use trunkrate_core::models::TrunkRatingConfig;
use trunkrate_core::AppConfig;
use trunkrate_engine::{MarginAggregator, RatingEngine};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "trunkrate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(configure_trunks)
            .configure(configure_margin),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "trunkrate={},trunkrate_api={},trunkrate_engine={},actix_web=info",
            log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Seed the trunk store from an optional JSON file of snapshots
fn seed_store(store: &MemoryTrunkStore, path: &str) {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Vec<TrunkRatingConfig>>(&raw) {
            Ok(configs) => {
                for config in configs {
                    if let Err(e) = config.validate() {
                        warn!(trunk_id = %config.trunk_id, error = %e, "Skipping invalid trunk snapshot");
                        continue;
                    }
                    store.install(config);
                }
                info!(count = store.len(), file = path, "Seeded trunk snapshots");
            }
            Err(e) => warn!(file = path, error = %e, "Failed to parse trunk snapshot file"),
        },
        Err(e) => warn!(file = path, error = %e, "Failed to read trunk snapshot file"),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting TrunkRate v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        panic!("Failed to load configuration: {}", e);
    });

    let store = Arc::new(MemoryTrunkStore::new());
    if let Some(ref path) = config.trunks_file {
        seed_store(&store, path);
    }

    let state = AppState::new(
        RatingEngine::new(config.rating.clone()),
        MarginAggregator::new(config.rating.margin.clone()),
        store,
    );

    // CORS configuration
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);
        for origin in cors_origins.split(',') {
            cors = cors.allowed_origin(origin.trim());
        }

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
