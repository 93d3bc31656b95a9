// tests/preview_server.rs
mod common;

use actix_web::{App, http::StatusCode, test, web};
use common::{FakeClient, Reply, current, reference, success_body};
use driftdeck::orchestrator::Orchestrator;
use driftdeck::pacing::RevealPacer;
use driftdeck::preview::{PreviewState, PreviewSurface, configure_routes};
use driftdeck::surface::RecordingSurface;
use serde_json::{Value, json};

macro_rules! preview_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_health() {
    let app = preview_app!(PreviewState::new());
    let resp: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp["status"], "healthy");
}

#[actix_rt::test]
async fn test_report_is_404_before_first_reveal() {
    let state = PreviewState::new();
    let app = preview_app!(state);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/report").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let snap: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/dashboard").to_request()).await;
    assert_eq!(snap["phase"], "idle");
    assert!(snap["dashboard"].is_null());
}

#[actix_rt::test]
async fn test_revealed_report_is_served_sandboxed() {
    let state = PreviewState::new();
    let surface = PreviewSurface::new(RecordingSurface::new(), state.clone());
    let mut orch = Orchestrator::new(
        FakeClient::new(Reply::Json(200, success_body(json!({})))),
        surface,
        RevealPacer::immediate(),
    );
    orch.submit(Some(reference()), Some(current())).await.unwrap();

    let app = preview_app!(state);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/report").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-security-policy").unwrap(),
        "sandbox"
    );
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Drift Report"));

    let snap: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/dashboard").to_request()).await;
    assert_eq!(snap["phase"], "revealed");
    assert_eq!(snap["visibility"]["report_view"], true);
    assert_eq!(snap["dashboard"]["automation"]["action"], "NO ACTION");
    assert_eq!(snap["dashboard"]["leaderboard"][0]["score"], "0.87");
    assert!(snap.get("report").is_none());
}

#[actix_rt::test]
async fn test_failure_alert_is_published() {
    let state = PreviewState::new();
    let surface = PreviewSurface::new(RecordingSurface::new(), state.clone());
    let mut orch = Orchestrator::new(
        FakeClient::new(Reply::Json(400, json!({"detail": {"errors": ["missing column X"]}}))),
        surface,
        RevealPacer::immediate(),
    );
    orch.submit(Some(reference()), Some(current())).await.unwrap();

    let snapshot = state.read();
    assert_eq!(snapshot.phase, driftdeck::ui::Phase::Idle);
    let alert = snapshot.alert.as_ref().unwrap();
    assert!(alert.message.contains("missing column X"));
}

#[actix_rt::test]
async fn test_index_page_is_embedded() {
    let app = preview_app!(PreviewState::new());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("driftdeck preview"));
}
