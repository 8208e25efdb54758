use serde_json::{Map, Value};

/// A raw hit as returned by the Marqo search endpoint.
///
/// Every field is optional so that malformed hits survive parsing and are dropped later by
/// [`crate::normalize`] instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalHit {
	pub id: Option<String>,
	pub score: Option<f64>,
	pub source: Option<Map<String, Value>>,
}
impl ExternalHit {
	pub fn from_value(value: &Value) -> Self {
		let id = match value.get("_id") {
			Some(Value::String(id)) => Some(id.clone()),
			Some(Value::Number(id)) => Some(id.to_string()),
			_ => None,
		};
		let score = value.get("_score").and_then(Value::as_f64);
		let source = value.get("_source").and_then(Value::as_object).cloned();

		Self { id, score, source }
	}
}
