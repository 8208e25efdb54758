use std::sync::Arc;

use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::{debug, warn};

use mfi_domain::NormalizedResult;

use crate::transient::{MemoryStore, Transient, TransientStore};

/// Namespace shared by every key this cache writes.
pub const CACHE_GROUP: &str = "marqo_fibo_cache";

/// TTL cache of normalized results, namespaced under [`CACHE_GROUP`].
///
/// Store failures never reach the caller: reads degrade to a miss and writes report
/// `false`.
#[derive(Clone)]
pub struct ResultCache {
	store: Arc<dyn TransientStore>,
}
impl ResultCache {
	pub fn new(store: Arc<dyn TransientStore>) -> Self {
		Self { store }
	}

	pub fn in_memory() -> Self {
		Self::new(Arc::new(MemoryStore::new()))
	}

	pub fn get(&self, key: &str) -> Option<Vec<NormalizedResult>> {
		self.get_at(key, OffsetDateTime::now_utc())
	}

	/// Expired entries read as absent and are removed on the way out.
	pub fn get_at(&self, key: &str, now: OffsetDateTime) -> Option<Vec<NormalizedResult>> {
		let key = prepare_key(key);

		match self.store.get(&key) {
			Ok(Some(entry)) if !entry.is_expired(now) => Some(entry.value),
			Ok(Some(_)) => {
				if let Err(err) = self.store.delete(&key) {
					warn!(error = %err, %key, "Failed to purge expired cache entry.");
				}

				None
			},
			Ok(None) => None,
			Err(err) => {
				warn!(error = %err, %key, "Cache read failed.");

				None
			},
		}
	}

	pub fn set(&self, key: &str, value: Vec<NormalizedResult>, ttl_seconds: u64) -> bool {
		self.set_at(key, value, ttl_seconds, OffsetDateTime::now_utc())
	}

	/// A zero TTL stores nothing and clears any previous entry under `key`.
	pub fn set_at(
		&self,
		key: &str,
		value: Vec<NormalizedResult>,
		ttl_seconds: u64,
		now: OffsetDateTime,
	) -> bool {
		let key = prepare_key(key);

		if ttl_seconds == 0 {
			if let Err(err) = self.store.delete(&key) {
				warn!(error = %err, %key, "Failed to clear cache entry.");
			}

			return false;
		}

		let ttl = Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX));
		let expires_at = now
			.checked_add(ttl)
			.unwrap_or_else(|| PrimitiveDateTime::new(Date::MAX, Time::MIDNIGHT).assume_utc());

		match self.store.set(&key, Transient { value, expires_at }) {
			Ok(()) => true,
			Err(err) => {
				warn!(error = %err, %key, "Cache write failed.");

				false
			},
		}
	}

	pub fn delete(&self, key: &str) -> bool {
		let key = prepare_key(key);

		self.store.delete(&key).unwrap_or_else(|err| {
			warn!(error = %err, %key, "Cache delete failed.");

			false
		})
	}

	/// Removes every entry in the namespace. Returns `false` only when the store failed.
	pub fn flush_all(&self) -> bool {
		match self.store.delete_prefix(&format!("{CACHE_GROUP}_")) {
			Ok(removed) => {
				debug!(removed, "Flushed result cache.");

				true
			},
			Err(err) => {
				warn!(error = %err, "Cache flush failed.");

				false
			},
		}
	}
}

/// Lower-cases `key` and drops everything outside `[a-z0-9_-]`.
pub fn sanitize_key(key: &str) -> String {
	key.chars()
		.map(|c| c.to_ascii_lowercase())
		.filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
		.collect()
}

fn prepare_key(key: &str) -> String {
	format!("{CACHE_GROUP}_{}", sanitize_key(key))
}
