use std::sync::Arc;

use agenda_clock::{create_router, AgendaEntry, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

fn router() -> Router {
    let agenda = vec![AgendaEntry::new("Intro", 2), AgendaEntry::new("Body", 90)];
    create_router(Arc::new(AppState::new(agenda, false)))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router();
    let (status, body) = call(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_shows_initial_snapshot() {
    let app = router();
    let (status, body) = call(&app, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["current_label"], "Intro");
    assert_eq!(body["snapshot"]["time"], "00:02");
    assert_eq!(body["snapshot"]["next_label"], "Body");
    assert_eq!(body["snapshot"]["phase"], "initial");
    assert!(body["last_action"].is_null());
}

#[tokio::test]
async fn transitions_walk_the_agenda() {
    let app = router();

    let (status, body) = call(&app, Method::POST, "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["snapshot"]["controls"]["stop"], true);

    let (_, body) = call(&app, Method::POST, "/skip").await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["snapshot"]["current_label"], "Body");
    assert_eq!(body["snapshot"]["time"], "01:30");
    assert_eq!(body["snapshot"]["next_label"], "End");

    let (_, body) = call(&app, Method::POST, "/stop").await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["snapshot"]["phase"], "stopped");
    assert_eq!(body["snapshot"]["controls"]["skip"], true);
    assert_eq!(body["snapshot"]["controls"]["restart"], true);

    let (_, body) = call(&app, Method::POST, "/skip").await;
    assert_eq!(body["status"], "finished");
    assert_eq!(body["snapshot"]["current_label"], "End");
    assert_eq!(body["snapshot"]["time"], "");
    assert!(body["snapshot"]["next_label"].is_null());

    // Finished is absorbing
    let (_, body) = call(&app, Method::POST, "/start").await;
    assert_eq!(body["status"], "finished");

    let (_, body) = call(&app, Method::POST, "/restart").await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["snapshot"]["phase"], "initial");
    assert_eq!(body["snapshot"]["current_label"], "Intro");

    let (_, body) = call(&app, Method::GET, "/status").await;
    assert_eq!(body["last_action"], "restart");
}

#[tokio::test]
async fn empty_agenda_is_finished() {
    let app = create_router(Arc::new(AppState::new(Vec::new(), false)));
    let (_, body) = call(&app, Method::GET, "/status").await;
    assert_eq!(body["snapshot"]["phase"], "finished");
    assert_eq!(body["snapshot"]["controls"]["restart"], true);
}

#[tokio::test]
async fn transitions_require_post() {
    let app = router();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/start")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
