mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use omdb_browse::api::types::{ErrorBody, ThemeBody};
use omdb_browse::api::{AppState, Theme, router};
use omdb_browse::catalog::MovieDetails;
use omdb_browse::controller::{Phase, ViewSnapshot};
use omdb_browse::session::{SessionHandle, SessionSettings, spawn_session};
use serde_json::from_slice;
use tokio::time::timeout;
use tower::ServiceExt;

use common::{FakeCatalog, details};

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

fn build_app() -> (Router, SessionHandle) {
    let catalog = Arc::new(
        FakeCatalog::new()
            .with_titles("matrix", "tt0133", 12)
            .with_details(details("tt0133093", "The Matrix")),
    );
    let settings = SessionSettings {
        debounce: Duration::from_millis(50),
        request_timeout: Duration::from_secs(5),
        showcase_seeds: Vec::new(),
        showcase_size: 9,
        showcase_ttl: Duration::from_secs(600),
        search_ttl: Duration::from_secs(300),
    };
    let (session, _task) = spawn_session(Arc::clone(&catalog), settings);
    let app = router(AppState::new(session.clone(), catalog, Theme::Light));
    (app, session)
}

fn json_request(method: &str, uri: &str, body: &str) -> Result<Request<Body>, axum::http::Error> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
}

#[tokio::test(start_paused = true)]
async fn query_then_view_returns_first_page() -> TestResult<()> {
    let (app, session) = build_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/query", r#"{"text":"matrix"}"#)?)
        .await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let mut rx = session.subscribe();
    timeout(
        Duration::from_secs(30),
        rx.wait_for(|v| v.phase == Phase::Results),
    )
    .await??;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/view").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let view: ViewSnapshot = from_slice(&bytes)?;
    assert_eq!(view.committed_query, "matrix");
    assert_eq!(view.results.len(), 9);
    assert_eq!(view.total_available, Some(12));
    assert!(view.can_load_more);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/load-more")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    timeout(Duration::from_secs(30), rx.wait_for(|v| v.results.len() == 10)).await??;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn title_endpoint_returns_details() -> TestResult<()> {
    let (app, _session) = build_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/titles/tt0133093")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: MovieDetails = from_slice(&bytes)?;
    assert_eq!(parsed.title, "The Matrix");
    assert_eq!(parsed.genres(), vec!["Action", "Sci-Fi"]);
    assert_eq!(parsed.awards, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn unknown_title_is_not_found_with_provider_message() -> TestResult<()> {
    let (app, _session) = build_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/titles/tt0000000").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: ErrorBody = from_slice(&bytes)?;
    assert_eq!(parsed.message, "Incorrect IMDb ID.");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn theme_can_be_read_and_switched() -> TestResult<()> {
    let (app, session) = build_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/theme").body(Body::empty())?)
        .await?;
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: ThemeBody = from_slice(&bytes)?;
    assert_eq!(parsed.theme, Theme::Light);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/theme", r#"{"theme":"dark"}"#)?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/theme").body(Body::empty())?)
        .await?;
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: ThemeBody = from_slice(&bytes)?;
    assert_eq!(parsed.theme, Theme::Dark);

    // Presentation settings never leak into the search state.
    assert_eq!(session.view().phase, Phase::Idle);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn healthz_reports_ok() -> TestResult<()> {
    let (app, _session) = build_app();
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"ok");
    Ok(())
}
