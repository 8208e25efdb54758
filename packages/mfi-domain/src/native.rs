use std::{
	fmt,
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::result::{NormalizedResult, field_text};

/// Product identifier as it appears in widget payloads.
///
/// Native ids are usually numbers while Marqo ids are strings. Two ids denote the same
/// product when their canonical text matches: a number's decimal text, or a string with
/// surrounding whitespace removed. An integral float such as `1.0` reads as `1`.
/// `1` and `"1"` are equal, `"01"` and `1` are not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
	Number(Number),
	Text(String),
}
impl ProductId {
	pub fn canonical(&self) -> String {
		match self {
			Self::Number(number) => match number.as_f64() {
				Some(value)
					if number.is_f64() && value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT =>
					(value as i64).to_string(),
				_ => number.to_string(),
			},
			Self::Text(text) => text.trim().to_string(),
		}
	}

	/// Reads an id from a JSON value. Only numbers and strings are ids.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(number) => Some(Self::Number(number.clone())),
			Value::String(text) => Some(Self::Text(text.clone())),
			_ => None,
		}
	}
}

impl PartialEq for ProductId {
	fn eq(&self, other: &Self) -> bool {
		self.canonical() == other.canonical()
	}
}

impl Eq for ProductId {}

impl Hash for ProductId {
	fn hash<H>(&self, state: &mut H)
	where
		H: Hasher,
	{
		self.canonical().hash(state);
	}
}

impl fmt::Display for ProductId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.canonical())
	}
}

impl From<u64> for ProductId {
	fn from(id: u64) -> Self {
		Self::Number(id.into())
	}
}

impl From<&str> for ProductId {
	fn from(id: &str) -> Self {
		Self::Text(id.to_string())
	}
}

const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// One entry of the widget's `products` section.
///
/// The entry is kept as the object it arrived as, so native products leave the pipeline
/// exactly as they came in. `ID` and the Marqo markers are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeProduct {
	pub fields: Map<String, Value>,
}
impl NativeProduct {
	pub fn id(&self) -> Option<ProductId> {
		self.fields.get("ID").and_then(ProductId::from_value)
	}

	pub fn title(&self) -> String {
		field_text(&self.fields, "post_title")
	}

	pub fn is_marqo_source(&self) -> bool {
		self.fields.get("marqo_source").and_then(Value::as_bool).unwrap_or(false)
	}

	pub fn marqo_data(&self) -> Option<&Map<String, Value>> {
		self.fields.get("marqo_data").and_then(Value::as_object)
	}
}

impl From<&NormalizedResult> for NativeProduct {
	fn from(result: &NormalizedResult) -> Self {
		let mut fields = Map::new();

		fields.insert("ID".to_string(), Value::String(result.id.clone()));

		for (key, value) in [
			("post_title", &result.title),
			("post_content", &result.description),
			("price", &result.price),
			("sku", &result.sku),
			("thumbnail", &result.image),
			("url", &result.url),
		] {
			fields.insert(key.to_string(), Value::String(value.clone()));
		}

		fields.insert("marqo_data".to_string(), Value::Object(result.raw.clone()));
		fields.insert("marqo_source".to_string(), Value::Bool(true));

		Self { fields }
	}
}

/// The widget's result payload.
///
/// Only `products` is typed. `total`, `marqo_enhanced` and the other sections (categories,
/// tags, vendors, ...) stay in `extra` as they arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeResultSet {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub products: Option<Vec<NativeProduct>>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl NativeResultSet {
	pub fn products(&self) -> &[NativeProduct] {
		self.products.as_deref().unwrap_or_default()
	}

	pub fn total(&self) -> Option<u64> {
		self.extra.get("total").and_then(Value::as_u64)
	}

	pub fn is_marqo_enhanced(&self) -> bool {
		self.extra.get("marqo_enhanced").and_then(Value::as_bool).unwrap_or(false)
	}

	pub fn push_external(&mut self, product: NativeProduct) {
		self.products.get_or_insert_with(Vec::new).push(product);
	}

	/// Sets `total` to the product count and flags the set as enhanced.
	pub fn mark_enhanced(&mut self) {
		let count = self.products().len() as u64;

		self.extra.insert("total".to_string(), Value::from(count));
		self.extra.insert("marqo_enhanced".to_string(), Value::Bool(true));
	}
}
