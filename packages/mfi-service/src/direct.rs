use serde::{Deserialize, Serialize};

use mfi_domain::NormalizedResult;

use crate::{Error, MergeService, Result, cache_key::CacheKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectSearchRequest {
	#[serde(default)]
	pub phrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectSearchResponse {
	pub success: bool,
	pub data: Vec<NormalizedResult>,
}

impl MergeService {
	/// Out-of-band search that returns normalized Marqo results on their own.
	pub async fn direct_search(&self, phrase: &str) -> Result<Vec<NormalizedResult>> {
		let phrase = phrase.trim();

		if phrase.is_empty() {
			return Err(Error::EmptyQuery);
		}
		if !self.cfg.marqo.enabled {
			return Err(Error::Disabled);
		}

		self.cached_search(CacheKind::Direct, phrase).await
	}
}
