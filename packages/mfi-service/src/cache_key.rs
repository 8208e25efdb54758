#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
	Widget,
	Direct,
}
impl CacheKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Widget => "search",
			Self::Direct => "ajax_search",
		}
	}
}

pub fn hash_phrase(phrase: &str) -> String {
	blake3::hash(phrase.as_bytes()).to_hex().to_string()
}

/// `search_<hash>` for the widget path, `ajax_search_<hash>` for direct searches.
pub fn build_cache_key(kind: CacheKind, phrase: &str) -> String {
	format!("{}_{}", kind.as_str(), hash_phrase(phrase))
}

pub fn cache_key_prefix(key: &str) -> &str {
	let len = key.len().min(24);

	&key[..len]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn variants_use_distinct_keys() {
		let widget = build_cache_key(CacheKind::Widget, "red shoes");
		let direct = build_cache_key(CacheKind::Direct, "red shoes");

		assert!(widget.starts_with("search_"));
		assert!(direct.starts_with("ajax_search_"));
		assert_ne!(widget, direct);
		assert_eq!(widget, build_cache_key(CacheKind::Widget, "red shoes"));
	}
}
