pub mod admin;
pub mod cache_key;
pub mod direct;
pub mod inject;
pub mod merge;

mod error;

pub use admin::AdminResponse;
pub use direct::{DirectSearchRequest, DirectSearchResponse};
pub use error::{Error, Result};
pub use inject::InjectRequest;
pub use merge::merge_results;

use std::{future::Future, pin::Pin, sync::Arc};

use tracing::{info, warn};

use mfi_config::{Config, Marqo};
use mfi_domain::{ExternalHit, NormalizedResult, SearchQuery};
use mfi_providers::marqo;
use mfi_storage::ResultCache;

use crate::cache_key::{CacheKind, build_cache_key, cache_key_prefix};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a Marqo,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, mfi_providers::Result<Vec<ExternalHit>>>;

	fn test_connection<'a>(&'a self, cfg: &'a Marqo) -> BoxFuture<'a, mfi_providers::Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub search: Arc<dyn SearchProvider>,
}
impl Providers {
	pub fn new(search: Arc<dyn SearchProvider>) -> Self {
		Self { search }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { search: Arc::new(DefaultProviders) }
	}
}

/// Blends Marqo hits into widget results and serves direct searches.
pub struct MergeService {
	pub cfg: Config,
	pub cache: ResultCache,
	pub providers: Providers,
}
impl MergeService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, cache: ResultCache::in_memory(), providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, cache: ResultCache, providers: Providers) -> Self {
		Self { cfg, cache, providers }
	}

	/// Serves `phrase` from the cache, or searches Marqo and caches the normalized hits.
	pub(crate) async fn cached_search(
		&self,
		kind: CacheKind,
		phrase: &str,
	) -> Result<Vec<NormalizedResult>> {
		let key = build_cache_key(kind, phrase);

		if let Some(cached) = self.cache.get(&key) {
			info!(
				cache_kind = kind.as_str(),
				cache_key_prefix = cache_key_prefix(&key),
				hit = true,
				results = cached.len(),
				"Cache hit."
			);

			return Ok(cached);
		}

		info!(
			cache_kind = kind.as_str(),
			cache_key_prefix = cache_key_prefix(&key),
			hit = false,
			ttl_seconds = self.cfg.marqo.cache_ttl_seconds,
			"Cache miss."
		);

		let query = SearchQuery::new(phrase, self.cfg.marqo.result_limit)?;
		let hits = self.providers.search.search(&self.cfg.marqo, &query).await?;
		let results = mfi_domain::normalize(hits);

		if !self.cache.set(&key, results.clone(), self.cfg.marqo.cache_ttl_seconds)
			&& self.cfg.marqo.cache_ttl_seconds > 0
		{
			warn!(
				cache_kind = kind.as_str(),
				cache_key_prefix = cache_key_prefix(&key),
				"Failed to cache Marqo results."
			);
		}

		Ok(results)
	}
}

struct DefaultProviders;

impl SearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a Marqo,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, mfi_providers::Result<Vec<ExternalHit>>> {
		Box::pin(marqo::search(cfg, query))
	}

	fn test_connection<'a>(&'a self, cfg: &'a Marqo) -> BoxFuture<'a, mfi_providers::Result<()>> {
		Box::pin(marqo::test_connection(cfg))
	}
}
