use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
	#[error("Search phrase must be non-empty.")]
	EmptyPhrase,
	#[error("Search limit must be greater than zero.")]
	ZeroLimit,
}

/// A validated request against the external search index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
	phrase: String,
	limit: u32,
	filter: Option<Value>,
}
impl SearchQuery {
	pub fn new(phrase: &str, limit: u32) -> Result<Self, QueryError> {
		let phrase = phrase.trim();

		if phrase.is_empty() {
			return Err(QueryError::EmptyPhrase);
		}
		if limit == 0 {
			return Err(QueryError::ZeroLimit);
		}

		Ok(Self { phrase: phrase.to_string(), limit, filter: None })
	}

	/// Attaches a filter expression. Null and empty filters are ignored.
	pub fn with_filter(self, filter: Value) -> Self {
		let empty = match &filter {
			Value::Null => true,
			Value::String(text) => text.trim().is_empty(),
			Value::Array(items) => items.is_empty(),
			Value::Object(map) => map.is_empty(),
			_ => false,
		};
		let filter = (!empty).then_some(filter);

		Self { filter, ..self }
	}

	pub fn phrase(&self) -> &str {
		&self.phrase
	}

	pub fn limit(&self) -> u32 {
		self.limit
	}

	pub fn filter(&self) -> Option<&Value> {
		self.filter.as_ref()
	}
}
