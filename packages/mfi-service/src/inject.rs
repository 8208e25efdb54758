use serde::{Deserialize, Serialize};
use tracing::warn;

use mfi_domain::NativeResultSet;

use crate::{MergeService, cache_key::CacheKind, merge::merge_results};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectRequest {
	#[serde(default)]
	pub phrase: String,
	#[serde(default)]
	pub results: NativeResultSet,
}

impl MergeService {
	/// Widget hook: returns `native` extended with Marqo results.
	///
	/// Never fails. Any problem reaching Marqo is logged and the native results are
	/// returned unchanged.
	pub async fn inject(&self, native: NativeResultSet, phrase: &str) -> NativeResultSet {
		let phrase = phrase.trim();

		if phrase.is_empty() || !self.cfg.marqo.enabled || native.is_marqo_enhanced() {
			return native;
		}

		match self.cached_search(CacheKind::Widget, phrase).await {
			Ok(results) => merge_results(native, &results),
			Err(err) => {
				warn!(error = %err, "Marqo search failed; serving native results.");

				native
			},
		}
	}
}
