use std::sync::RwLock;

use ahash::AHashMap;
use time::OffsetDateTime;

use mfi_domain::NormalizedResult;

use crate::Result;

/// A stored value together with its expiry instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Transient {
	pub value: Vec<NormalizedResult>,
	pub expires_at: OffsetDateTime,
}
impl Transient {
	pub fn is_expired(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}
}

/// The host key space that backs the result cache.
///
/// Implementations must make single-key operations atomic. No ordering is required
/// across keys.
pub trait TransientStore
where
	Self: Send + Sync,
{
	fn get(&self, key: &str) -> Result<Option<Transient>>;

	fn set(&self, key: &str, entry: Transient) -> Result<()>;

	/// Returns whether an entry was removed.
	fn delete(&self, key: &str) -> Result<bool>;

	/// Removes every key starting with `prefix` and returns how many were removed.
	fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RwLock<AHashMap<String, Transient>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.read().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl TransientStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<Transient>> {
		let entries = self.entries.read().unwrap_or_else(|err| err.into_inner());

		Ok(entries.get(key).cloned())
	}

	fn set(&self, key: &str, entry: Transient) -> Result<()> {
		let mut entries = self.entries.write().unwrap_or_else(|err| err.into_inner());

		entries.insert(key.to_string(), entry);

		Ok(())
	}

	fn delete(&self, key: &str) -> Result<bool> {
		let mut entries = self.entries.write().unwrap_or_else(|err| err.into_inner());

		Ok(entries.remove(key).is_some())
	}

	fn delete_prefix(&self, prefix: &str) -> Result<usize> {
		let mut entries = self.entries.write().unwrap_or_else(|err| err.into_inner());
		let before = entries.len();

		entries.retain(|key, _| !key.starts_with(prefix));

		Ok(before - entries.len())
	}
}
