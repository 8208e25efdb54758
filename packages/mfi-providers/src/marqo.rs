use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use mfi_domain::{ExternalHit, SearchQuery};

use crate::{Error, Result};

/// Client for a single Marqo index.
#[derive(Debug, Clone)]
pub struct MarqoClient {
	http: Client,
	api_key: String,
	endpoint: String,
	index: String,
}
impl MarqoClient {
	pub fn new(cfg: &mfi_config::Marqo) -> Result<Self> {
		Self::build(cfg, true)
	}

	/// Client for account-level calls such as listing indexes. The index may be blank.
	pub fn connect(cfg: &mfi_config::Marqo) -> Result<Self> {
		Self::build(cfg, false)
	}

	fn build(cfg: &mfi_config::Marqo, require_index: bool) -> Result<Self> {
		let api_key = cfg.api_key.trim();
		let endpoint = cfg.endpoint.trim().trim_end_matches('/');
		let index = cfg.index.trim();

		for (label, value) in [("api_key", api_key), ("endpoint", endpoint)] {
			if value.is_empty() {
				return Err(incomplete(label));
			}
		}

		if require_index && index.is_empty() {
			return Err(incomplete("index"));
		}

		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(|err| Error::InvalidConfig {
				message: format!("Failed to build Marqo HTTP client: {err}"),
			})?;

		Ok(Self {
			http,
			api_key: api_key.to_string(),
			endpoint: endpoint.to_string(),
			index: index.to_string(),
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ExternalHit>> {
		if self.index.is_empty() {
			return Err(incomplete("index"));
		}

		let url = format!("{}/indexes/{}/search", self.endpoint, self.index);
		let res = self
			.http
			.post(url)
			.headers(crate::auth_headers(&self.api_key)?)
			.json(&search_body(query))
			.send()
			.await
			.map_err(|err| Error::Network { message: err.to_string() })?;
		let status = res.status();

		if !status.is_success() {
			tracing::warn!(%status, index = %self.index, "Marqo search returned a non-success status.");
		}

		let body = res.bytes().await.map_err(|err| Error::Network { message: err.to_string() })?;
		let json: Value = serde_json::from_slice(&body).map_err(|err| Error::Decode {
			message: format!("Error decoding Marqo response: {err}"),
		})?;

		Ok(parse_search_response(&json))
	}

	/// Lists indexes to confirm that the endpoint is reachable and the key is accepted.
	pub async fn test_connection(&self) -> Result<()> {
		let url = format!("{}/indexes", self.endpoint);
		let res = self
			.http
			.get(url)
			.headers(crate::auth_headers(&self.api_key)?)
			.send()
			.await
			.map_err(|err| Error::Connection { message: err.to_string() })?;
		let status = res.status();

		if status != StatusCode::OK {
			return Err(Error::Connection {
				message: format!("Connection error. Code: {}", status.as_u16()),
			});
		}

		Ok(())
	}
}

pub async fn search(cfg: &mfi_config::Marqo, query: &SearchQuery) -> Result<Vec<ExternalHit>> {
	MarqoClient::new(cfg)?.search(query).await
}

pub async fn test_connection(cfg: &mfi_config::Marqo) -> Result<()> {
	MarqoClient::connect(cfg)?.test_connection().await
}

fn incomplete(label: &str) -> Error {
	Error::InvalidConfig { message: format!("Incomplete Marqo configuration: {label} is empty.") }
}

fn search_body(query: &SearchQuery) -> Value {
	let mut body = serde_json::json!({
		"q": query.phrase(),
		"limit": query.limit(),
	});

	if let Some(filter) = query.filter() {
		body["filter"] = filter.clone();
	}

	body
}

fn parse_search_response(json: &Value) -> Vec<ExternalHit> {
	json.get("hits")
		.and_then(Value::as_array)
		.map(|hits| hits.iter().map(ExternalHit::from_value).collect())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_body_without_empty_filter() {
		let query = SearchQuery::new("red shoes", 5).expect("Expected a valid query.");

		assert_eq!(search_body(&query), serde_json::json!({ "q": "red shoes", "limit": 5 }));

		let query = query.with_filter(serde_json::json!("in_stock:true"));

		assert_eq!(
			search_body(&query),
			serde_json::json!({ "q": "red shoes", "limit": 5, "filter": "in_stock:true" })
		);
	}

	#[test]
	fn missing_hits_yield_empty_list() {
		assert!(parse_search_response(&serde_json::json!({ "processingTimeMs": 3 })).is_empty());
		assert!(parse_search_response(&serde_json::json!([1, 2])).is_empty());
	}

	#[test]
	fn parses_hits_in_order() {
		let json = serde_json::json!({
			"hits": [
				{ "_id": "b", "_score": 0.4, "_source": { "title": "B" } },
				{ "_id": "a", "_score": 0.9, "_source": { "title": "A" } }
			]
		});
		let hits = parse_search_response(&json);

		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].id.as_deref(), Some("b"));
		assert_eq!(hits[1].score, Some(0.9));
	}

	#[test]
	fn rejects_incomplete_config() {
		let cfg = mfi_config::Marqo {
			api_key: "key".to_string(),
			endpoint: "https://marqo.example.com/".to_string(),
			..Default::default()
		};
		let err = MarqoClient::new(&cfg).expect_err("Expected a config error.");

		assert!(matches!(err, Error::InvalidConfig { .. }));
		assert!(err.to_string().contains("index"));
	}

	#[test]
	fn strips_trailing_slash_from_endpoint() {
		let cfg = mfi_config::Marqo {
			api_key: "key".to_string(),
			endpoint: "https://marqo.example.com/api//".to_string(),
			index: "products".to_string(),
			..Default::default()
		};
		let client = MarqoClient::new(&cfg).expect("Expected a client.");

		assert_eq!(client.endpoint(), "https://marqo.example.com/api");
	}
}
