use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
	#[serde(rename = "native")]
	Native,
	#[serde(rename = "marqo")]
	External,
}

/// An external hit reshaped into the storefront's item fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
	pub id: String,
	pub score: f64,
	pub title: String,
	pub description: String,
	pub url: String,
	pub image: String,
	pub price: String,
	pub sku: String,
	#[serde(rename = "source")]
	pub provenance: Provenance,
	pub raw: Map<String, Value>,
}

/// Reads `key` from a source document as display text.
///
/// Strings are returned verbatim, numbers and booleans as their JSON text. Anything else,
/// including a missing key, yields an empty string.
pub fn field_text(source: &Map<String, Value>, key: &str) -> String {
	match source.get(key) {
		Some(Value::String(text)) => text.clone(),
		Some(Value::Number(number)) => number.to_string(),
		Some(Value::Bool(flag)) => flag.to_string(),
		_ => String::new(),
	}
}
