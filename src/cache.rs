//! Credential cache contract and the built-in in-memory implementation.
//!
//! A cache holds at most one live [`AccessToken`] per [`CacheKey`]. Writes always replace the
//! previous entry for a key and expiry is evaluated lazily on read, so there is no background
//! eviction task.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::{_prelude::*, auth::AccessToken};

/// Milliseconds of cache lifetime granted per advertised `expires_in` second.
///
/// `500` keeps a token for half of its advertised lifetime so it is never handed out close to
/// upstream expiry.
pub const TTL_MILLIS_PER_ADVERTISED_SECOND: i64 = 500;

/// Storage contract for cached access tokens.
///
/// Implementations must be shareable across clients and tasks; the client holds them behind
/// `Arc<dyn CredentialCache>`.
pub trait CredentialCache
where
	Self: Send + Sync,
{
	/// Returns the token stored under `key` when present and not expired.
	fn get(&self, key: &CacheKey) -> Option<AccessToken>;

	/// Stores `token` under `key` for `ttl`, replacing any prior entry.
	fn put(&self, key: CacheKey, token: AccessToken, ttl: Duration);

	/// Removes and returns the live token stored under `key`.
	fn remove(&self, key: &CacheKey) -> Option<AccessToken>;

	/// Removes every entry.
	fn clear(&self);
}

/// Cache lifetime for a freshly issued token: half of `expires_in`, in milliseconds.
pub fn token_ttl(token: &AccessToken) -> Duration {
	let advertised = i64::try_from(token.expires_in).unwrap_or(i64::MAX);

	Duration::milliseconds(advertised.saturating_mul(TTL_MILLIS_PER_ADVERTISED_SECOND))
}

/// Key identifying a cached token; derived from the client identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);
impl CacheKey {
	const PREFIX: &'static str = "oauth:";

	/// Builds the key `oauth:{client_id}`.
	pub fn for_client(client_id: &str) -> Self {
		Self(format!("{}{client_id}", Self::PREFIX))
	}

	/// Returns the key text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Cached token plus the instant after which it is treated as absent.
#[derive(Clone, Debug)]
pub struct CacheEntry {
	/// Cached token.
	pub value: AccessToken,
	/// Expiry instant.
	pub expires_at: OffsetDateTime,
}
impl CacheEntry {
	/// Creates an entry expiring `ttl` after `now`.
	pub fn new(value: AccessToken, now: OffsetDateTime, ttl: Duration) -> Self {
		Self { value, expires_at: now.saturating_add(ttl) }
	}

	/// Returns `true` once `instant` reaches the expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}
