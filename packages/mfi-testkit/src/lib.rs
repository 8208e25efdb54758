mod error;

pub use error::{Error, Result};

use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use axum::{
	Router,
	body::Bytes,
	extract::{Path, State},
	http::{HeaderMap, StatusCode, header},
	response::{IntoResponse, Response},
	routing,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot};

/// A request observed by [`MockMarqo`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub index: Option<String>,
	pub authorization: Option<String>,
	pub content_type: Option<String>,
	pub body: Value,
}

/// Canned responses for a [`MockMarqo`] server.
#[derive(Debug, Clone)]
pub struct MockMarqoBuilder {
	search_status: StatusCode,
	search_body: String,
	indexes_status: StatusCode,
}
impl MockMarqoBuilder {
	pub fn search_hits(mut self, hits: Value) -> Self {
		self.search_body = serde_json::json!({ "hits": hits, "processingTimeMs": 1 }).to_string();

		self
	}

	/// Serves `body` verbatim from the search route, even when it is not JSON.
	pub fn search_raw(mut self, status: u16, body: impl Into<String>) -> Self {
		self.search_status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
		self.search_body = body.into();

		self
	}

	pub fn indexes_status(mut self, status: u16) -> Self {
		self.indexes_status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);

		self
	}

	pub async fn start(self) -> Result<MockMarqo> {
		let state = Arc::new(MockState {
			search_status: self.search_status,
			search_body: self.search_body,
			indexes_status: self.indexes_status,
			search_calls: AtomicUsize::new(0),
			indexes_calls: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		});
		let app = Router::new()
			.route("/indexes", routing::get(indexes_handler))
			.route("/indexes/{index}/search", routing::post(search_handler))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(MockMarqo { base_url: format!("http://{addr}"), state, shutdown: Some(tx) })
	}
}

impl Default for MockMarqoBuilder {
	fn default() -> Self {
		Self {
			search_status: StatusCode::OK,
			search_body: serde_json::json!({ "hits": [] }).to_string(),
			indexes_status: StatusCode::OK,
		}
	}
}

/// An in-process stand-in for the Marqo HTTP API.
///
/// Serves `GET /indexes` and `POST /indexes/{index}/search` and records every request.
/// The server stops when the value is dropped.
pub struct MockMarqo {
	base_url: String,
	state: Arc<MockState>,
	shutdown: Option<oneshot::Sender<()>>,
}
impl MockMarqo {
	pub fn builder() -> MockMarqoBuilder {
		MockMarqoBuilder::default()
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn search_calls(&self) -> usize {
		self.state.search_calls.load(Ordering::SeqCst)
	}

	pub fn indexes_calls(&self) -> usize {
		self.state.indexes_calls.load(Ordering::SeqCst)
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}

impl Drop for MockMarqo {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

struct MockState {
	search_status: StatusCode,
	search_body: String,
	indexes_status: StatusCode,
	search_calls: AtomicUsize,
	indexes_calls: AtomicUsize,
	requests: Mutex<Vec<RecordedRequest>>,
}
impl MockState {
	fn record(&self, index: Option<String>, headers: &HeaderMap, body: &[u8]) {
		let header_text = |name: header::HeaderName| {
			headers.get(name).and_then(|value| value.to_str().ok()).map(ToString::to_string)
		};
		let request = RecordedRequest {
			index,
			authorization: header_text(header::AUTHORIZATION),
			content_type: header_text(header::CONTENT_TYPE),
			body: serde_json::from_slice(body).unwrap_or(Value::Null),
		};

		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request);
	}
}

async fn indexes_handler(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
	state.indexes_calls.fetch_add(1, Ordering::SeqCst);
	state.record(None, &headers, &[]);

	let body = serde_json::json!({ "results": [{ "indexName": "products" }] });

	(state.indexes_status, axum::Json(body)).into_response()
}

async fn search_handler(
	State(state): State<Arc<MockState>>,
	Path(index): Path<String>,
	headers: HeaderMap,
	body: Bytes,
) -> Response {
	state.search_calls.fetch_add(1, Ordering::SeqCst);
	state.record(Some(index), &headers, &body);

	(
		state.search_status,
		[(header::CONTENT_TYPE, "application/json")],
		state.search_body.clone(),
	)
		.into_response()
}
