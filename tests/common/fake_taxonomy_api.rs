//! Fake taxonomy API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /api/microbe/search?name=..&gram_filter=..`
//! - `GET /api/microbe/detail?tax_id=..`
//! - `POST /api/microbes/details` with `{"tax_ids": [..]}`
//!
//! Search rows may carry a `gram` field (`"positive"` / `"negative"`); when
//! a `gram_filter` is sent only matching rows are returned. Every request is
//! recorded so tests can assert on what the gateway actually sent.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeTaxonomyApi::start().await.unwrap();
//! api.add_detail(DetailRecordBuilder::new("1423", "Bacillus subtilis").build_json()).await;
//! let gateway = HttpGateway::new(&api.base_url()).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the fake server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct ApiState {
    /// Search rows keyed by lowercase term.
    searches: HashMap<String, Vec<Value>>,
    details: HashMap<String, Value>,
    /// Identifiers the batch endpoint reports as failed, with the message.
    batch_errors: HashMap<String, String>,
    /// When set, every endpoint answers with this status and raw body.
    failure: Option<(StatusCode, String)>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake taxonomy API server.
pub struct FakeTaxonomyApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeTaxonomyApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/api/microbe/search", get(search))
            .route("/api/microbe/detail", get(detail))
            .route("/api/microbes/details", post(batch))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Rows returned when searching for `term` (case-insensitive).
    pub async fn add_search(&self, term: &str, rows: Vec<Value>) {
        self.state
            .lock()
            .await
            .searches
            .insert(term.to_lowercase(), rows);
    }

    /// Register a detail record under its `tax_id`.
    pub async fn add_detail(&self, record: Value) {
        let tax_id = match &record["tax_id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.state.lock().await.details.insert(tax_id, record);
    }

    /// Make the batch endpoint report `tax_id` as failed.
    pub async fn fail_in_batch(&self, tax_id: &str, message: &str) {
        self.state
            .lock()
            .await
            .batch_errors
            .insert(tax_id.to_string(), message.to_string());
    }

    /// Make every endpoint answer with `status` and the raw `body`.
    pub async fn fail_all(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.state.lock().await.failure = Some((status, body.to_string()));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

fn forced_failure(state: &ApiState) -> Option<Response> {
    state
        .failure
        .clone()
        .map(|(status, body)| (status, body).into_response())
}

async fn search(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        path: "/api/microbe/search",
        query: query.clone(),
        body: None,
    });
    if let Some(resp) = forced_failure(&state) {
        return resp;
    }

    let Some(name) = query.get("name") else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Missing name"}))).into_response();
    };
    let rows: Vec<Value> = state
        .searches
        .get(&name.to_lowercase())
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|row| match query.get("gram_filter") {
            Some(gram) => row.get("gram").and_then(Value::as_str) == Some(gram.as_str()),
            None => true,
        })
        .collect();
    Json(Value::Array(rows)).into_response()
}

async fn detail(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        path: "/api/microbe/detail",
        query: query.clone(),
        body: None,
    });
    if let Some(resp) = forced_failure(&state) {
        return resp;
    }

    let tax_id = query.get("tax_id").cloned().unwrap_or_default();
    match state.details.get(&tax_id) {
        Some(record) => Json(record.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("Microbe with TaxID {tax_id} not found")})),
        )
            .into_response(),
    }
}

async fn batch(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        path: "/api/microbes/details",
        query: HashMap::new(),
        body: Some(body.clone()),
    });
    if let Some(resp) = forced_failure(&state) {
        return resp;
    }

    let ids: Vec<String> = body["tax_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_str).map(str::to_owned).collect())
        .unwrap_or_default();

    let mut results = Vec::new();
    let mut errors = Map::new();
    for id in ids {
        if let Some(message) = state.batch_errors.get(&id) {
            errors.insert(id, Value::String(message.clone()));
        } else if let Some(record) = state.details.get(&id) {
            results.push(record.clone());
        } else {
            errors.insert(id, Value::String("Not found".to_string()));
        }
    }
    Json(json!({"results": results, "errors": errors})).into_response()
}
