#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request received by the stub service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the remote shortening service.
///
/// Hands out codes in submission order and returns the same code for a URL
/// it has already seen.
#[derive(Default)]
pub struct StubState {
    pub base_url: Mutex<String>,
    pub links: Mutex<Vec<String>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn shorten_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    let url = body["url"]
        .as_str()
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?
        .to_string();

    let mut links = state.links.lock().unwrap();
    let index = match links.iter().position(|l| *l == url) {
        Some(index) => index,
        None => {
            links.push(url.clone());
            links.len() - 1
        }
    };
    let base_url = state.base_url.lock().unwrap().clone();

    Ok(Json(json!({
        "short_url": format!("{base_url}/code{index}"),
        "original_url": url,
        "visits_count": 0
    })))
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Starts the stub shortening service.
pub async fn spawn_shortener() -> (String, Arc<StubState>) {
    let state = Arc::new(StubState::default());
    let router = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state.clone());

    let base_url = serve(router).await;
    *state.base_url.lock().unwrap() = base_url.clone();

    (base_url, state)
}

/// Starts a service whose `/shorten` always answers with `status`.
pub async fn spawn_failing(status: StatusCode) -> String {
    let router = Router::new().route("/shorten", post(move || async move { status }));
    serve(router).await
}

/// Starts a service whose `/shorten` answers 200 with `body`.
pub async fn spawn_with_body(body: Value) -> String {
    let router = Router::new().route(
        "/shorten",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    serve(router).await
}

/// Returns a local base URL nothing is listening on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
