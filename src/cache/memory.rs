//! Thread-safe in-memory [`CredentialCache`] implementation.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	cache::{CacheEntry, CacheKey, CredentialCache},
};

type CacheMap = Arc<RwLock<HashMap<CacheKey, CacheEntry>>>;

/// Process-local cache; clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Looks up `key` treating `now` as the current instant.
	///
	/// Expired entries are dropped and reported as absent.
	pub fn get_at(&self, key: &CacheKey, now: OffsetDateTime) -> Option<AccessToken> {
		{
			let guard = self.0.read();

			match guard.get(key) {
				Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		let mut guard = self.0.write();

		// Another writer may have replaced the entry between the two locks.
		match guard.get(key) {
			Some(entry) if !entry.is_expired_at(now) => Some(entry.value.clone()),
			Some(_) => {
				guard.remove(key);

				None
			},
			None => None,
		}
	}

	/// Stores `token` treating `now` as the current instant.
	pub fn put_at(&self, key: CacheKey, token: AccessToken, ttl: Duration, now: OffsetDateTime) {
		self.0.write().insert(key, CacheEntry::new(token, now, ttl));
	}

	/// Returns the expiry instant recorded for `key`, expired or not.
	pub fn expires_at(&self, key: &CacheKey) -> Option<OffsetDateTime> {
		self.0.read().get(key).map(|entry| entry.expires_at)
	}

	/// Number of entries still live at the current instant.
	pub fn len(&self) -> usize {
		let now = OffsetDateTime::now_utc();

		self.0.read().values().filter(|entry| !entry.is_expired_at(now)).count()
	}

	/// Returns `true` when no live entry remains.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
impl CredentialCache for MemoryCache {
	fn get(&self, key: &CacheKey) -> Option<AccessToken> {
		self.get_at(key, OffsetDateTime::now_utc())
	}

	fn put(&self, key: CacheKey, token: AccessToken, ttl: Duration) {
		self.put_at(key, token, ttl, OffsetDateTime::now_utc());
	}

	fn remove(&self, key: &CacheKey) -> Option<AccessToken> {
		let now = OffsetDateTime::now_utc();

		let removed = self.0.write().remove(key);

		removed.filter(|entry| !entry.is_expired_at(now)).map(|entry| entry.value)
	}

	fn clear(&self) {
		self.0.write().clear();
	}
}
