//! Integration tests for the rating API layer
//!
//! Exercises the DTO conversions, the in-memory store, and the full
//! handler path through an actix test service.

use actix_web::{test, web, App};
use rust_decimal_macros::dec;
use std::sync::Arc;
use trunkrate_api::{configure_margin, configure_trunks, AppState, MemoryTrunkStore};
use trunkrate_core::models::{OverrideSet, RateZone, TrunkRatingConfig};
use trunkrate_engine::{MarginAggregator, RatingEngine};

fn state() -> AppState {
    AppState::new(
        RatingEngine::default(),
        MarginAggregator::default(),
        Arc::new(MemoryTrunkStore::new()),
    )
}

fn trunk_config() -> TrunkRatingConfig {
    TrunkRatingConfig {
        trunk_id: "trunk-001".to_string(),
        zones: vec![RateZone {
            zone: "DOM".to_string(),
            customer_rate: dec!(0.0095),
            vendor_rate: dec!(0.0045),
            billing_increment: 60,
            minimum_duration: 0,
            ..Default::default()
        }],
        customer_overrides: OverrideSet::default(),
        vendor_overrides: OverrideSet::default(),
    }
}

#[actix_web::test]
async fn rate_call_roundtrip() {
    let state = state();
    state.store.install(trunk_config());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure_trunks)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/trunks/trunk-001/rating/calls")
        .set_json(serde_json::json!({
            "dialed_number": "13105551234",
            "raw_seconds": 65,
            "zone": "DOM"
        }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["billed_seconds"], 120);
    assert_eq!(body["data"]["rate_source"]["source"], "BASE");
}

#[actix_web::test]
async fn rate_call_unknown_trunk_is_404() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state()))
            .service(web::scope("/api/v1").configure(configure_trunks)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/trunks/ghost/rating/calls")
        .set_json(serde_json::json!({
            "dialed_number": "13105551234",
            "raw_seconds": 65,
            "zone": "DOM"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn install_and_fetch_snapshot() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state()))
            .service(web::scope("/api/v1").configure(configure_trunks)),
    )
    .await;

    let put = test::TestRequest::put()
        .uri("/api/v1/trunks/trunk-001/rating-config")
        .set_json(trunk_config())
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_eq!(resp.status(), 204);

    let get = test::TestRequest::get()
        .uri("/api/v1/trunks/trunk-001/rating-config")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, get).await;
    assert_eq!(body["data"]["trunk_id"], "trunk-001");
    assert_eq!(body["data"]["zones"][0]["zone"], "DOM");
}

#[actix_web::test]
async fn install_rejects_malformed_zone_table() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state()))
            .service(web::scope("/api/v1").configure(configure_trunks)),
    )
    .await;

    let mut config = trunk_config();
    config.zones[0].billing_increment = 0;

    let put = test::TestRequest::put()
        .uri("/api/v1/trunks/trunk-001/rating-config")
        .set_json(config)
        .to_request();
    let resp = test::call_service(&app, put).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn batch_reports_partial_failures() {
    let state = state();
    state.store.install(trunk_config());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure_trunks)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/trunks/trunk-001/rating/batch")
        .set_json(serde_json::json!({
            "calls": [
                { "dialed_number": "13105551234", "raw_seconds": 65, "zone": "DOM" },
                { "dialed_number": "5551234", "raw_seconds": 30, "zone": "MOBILE" }
            ]
        }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["failures"][0]["error_code"], "unknown_zone");
    assert_eq!(body["data"]["failures"][0]["index"], 1);
}

#[actix_web::test]
async fn projected_margin_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state()))
            .service(web::scope("/api/v1").configure(configure_margin)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/margin/projected")
        .set_json(serde_json::json!({
            "zones": [{
                "zone": "DOM",
                "customer_rate": "0.0095",
                "vendor_rate": "0.0045",
                "billing_increment": 60
            }],
            "volume_by_zone": [{ "zone": "DOM", "minutes": "125000" }]
        }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["zones"][0]["status"], "HEALTHY");
    assert_eq!(body["data"]["risk_zones"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn empty_snapshot_request_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state()))
            .service(web::scope("/api/v1").configure(configure_margin)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/margin/snapshot")
        .set_json(serde_json::json!({ "results": [] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
