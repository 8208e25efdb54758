use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use mfi_api::{routes, state::AppState};
use mfi_config::{Config, Marqo, Service};
use mfi_service::MergeService;
use mfi_testkit::MockMarqo;

fn test_config(endpoint: &str) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		marqo: Marqo {
			enabled: true,
			api_key: "key".to_string(),
			endpoint: endpoint.to_string(),
			index: "products".to_string(),
			result_limit: 5,
			cache_ttl_seconds: 3_600,
			timeout_ms: 2_000,
		},
	}
}

fn state_for(cfg: Config) -> AppState {
	AppState { service: Arc::new(MergeService::new(cfg)) }
}

async fn send(app: Router, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
	let body = payload.map(|payload| Body::from(payload.to_string())).unwrap_or_else(Body::empty);
	let request = Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(body)
		.expect("Failed to build request.");
	let response = app.oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

	(status, value)
}

async fn start_marqo() -> MockMarqo {
	MockMarqo::builder()
		.search_hits(json!([
			{ "_id": "2", "_score": 0.9, "_source": { "title": "Red Heels", "url": "/p/2" } }
		]))
		.start()
		.await
		.expect("Failed to start mock Marqo.")
}

#[tokio::test]
async fn health_ok() {
	let app = routes::router(state_for(test_config("http://localhost")));
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn inject_merges_marqo_results() {
	let server = start_marqo().await;
	let app = routes::router(state_for(test_config(server.base_url())));
	let (status, body) = send(
		app,
		"/v1/search/inject",
		Some(json!({
			"phrase": "red shoes",
			"results": {
				"products": [{ "ID": 1, "post_title": "Red Sneakers" }],
				"total": 1,
				"categories": []
			}
		})),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["total"], json!(2));
	assert_eq!(body["marqo_enhanced"], json!(true));
	assert_eq!(body["categories"], json!([]));
	assert_eq!(body["products"][1]["ID"], json!("2"));
	assert_eq!(body["products"][1]["marqo_source"], json!(true));
}

#[tokio::test]
async fn inject_passes_through_when_marqo_is_unreachable() {
	let addr = {
		let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind.");

		listener.local_addr().expect("Failed to read local address.")
	};
	let app = routes::router(state_for(test_config(&format!("http://{addr}"))));
	let native = json!({ "products": [{ "ID": 1, "post_title": "Red Sneakers" }], "total": 1 });
	let (status, body) =
		send(app, "/v1/search/inject", Some(json!({ "phrase": "red shoes", "results": native })))
			.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, native);
}

#[tokio::test]
async fn inject_without_phrase_returns_native_payload_verbatim() {
	let server = start_marqo().await;
	let app = routes::router(state_for(test_config(server.base_url())));
	let native = json!({
		"products": [{ "ID": null, "post_title": "A", "marqo_source": false }],
		"total": 1
	});
	let (status, body) =
		send(app, "/v1/search/inject", Some(json!({ "results": native.clone() }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, native);
	assert_eq!(server.search_calls(), 0);
}

#[tokio::test]
async fn direct_search_returns_normalized_results() {
	let server = start_marqo().await;
	let app = routes::router(state_for(test_config(server.base_url())));
	let (status, body) = send(app, "/v1/search", Some(json!({ "phrase": "red shoes" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], json!(true));
	assert_eq!(body["data"][0]["id"], json!("2"));
	assert_eq!(body["data"][0]["source"], json!("marqo"));
	assert_eq!(body["data"][0]["description"], json!(""));
}

#[tokio::test]
async fn direct_search_rejects_empty_phrase() {
	let server = start_marqo().await;
	let app = routes::router(state_for(test_config(server.base_url())));
	let (status, body) = send(app, "/v1/search", Some(json!({ "phrase": "" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], json!("empty_query"));
	assert_eq!(server.search_calls(), 0);
}

#[tokio::test]
async fn direct_search_reports_upstream_failures() {
	let server = MockMarqo::builder()
		.search_raw(502, "upstream exploded")
		.start()
		.await
		.expect("Failed to start mock Marqo.");
	let app = routes::router(state_for(test_config(server.base_url())));
	let (status, body) = send(app, "/v1/search", Some(json!({ "phrase": "lamp" }))).await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert_eq!(body["error_code"], json!("provider_error"));
}

#[tokio::test]
async fn admin_test_connection_reports_status() {
	let server = MockMarqo::builder()
		.indexes_status(401)
		.start()
		.await
		.expect("Failed to start mock Marqo.");
	let app = routes::admin_router(state_for(test_config(server.base_url())));
	let (status, body) = send(app, "/v1/admin/test_connection", None).await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert_eq!(body["message"], json!("Connection failed: Connection error. Code: 401"));
}

#[tokio::test]
async fn admin_flush_cache_clears_cached_results() {
	let server = start_marqo().await;
	let state = state_for(test_config(server.base_url()));
	let public = routes::router(state.clone());
	let admin = routes::admin_router(state);

	send(public.clone(), "/v1/search", Some(json!({ "phrase": "lamp" }))).await;
	send(public.clone(), "/v1/search", Some(json!({ "phrase": "lamp" }))).await;

	assert_eq!(server.search_calls(), 1);

	let (status, body) = send(admin, "/v1/admin/flush_cache", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], json!(true));

	send(public, "/v1/search", Some(json!({ "phrase": "lamp" }))).await;

	assert_eq!(server.search_calls(), 2);
}
