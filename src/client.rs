//! USPS API client: token acquisition and tracking queries.

pub mod tracking;

mod access_token;
mod common;

pub use tracking::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	cache::{CacheKey, CredentialCache, MemoryCache},
	config::ClientConfig,
	http::ReqwestHttpClient,
};

/// Path of the OAuth 2.0 token endpoint, relative to the environment URL.
pub const TOKEN_PATH: &str = "/oauth2/v3/token";
/// Path of the tracking endpoint, relative to the environment URL.
pub const TRACKING_PATH: &str = "/tracking/v3r2/tracking";

/// Per-call overrides shared by every operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Overrides the config's default timeout for this call.
	pub timeout: Option<StdDuration>,
}
impl RequestOptions {
	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}
}

/// Client for the USPS OAuth and tracking endpoints.
///
/// The client owns its configuration and a handle to a [`CredentialCache`]. A client built with
/// [`UspsClient::new`] gets a private [`MemoryCache`]; pass a shared cache to
/// [`UspsClient::with_cache`] when several clients (or clones) should reuse tokens. Tokens are
/// keyed by client identifier, so clients with different identifiers never observe each
/// other's tokens even when sharing a cache.
///
/// Concurrent cache misses each perform their own exchange and the last write wins. Enable
/// [`UspsClient::with_single_flight`] to coalesce them per cache key instead.
#[derive(Clone)]
pub struct UspsClient {
	/// Immutable configuration.
	pub config: ClientConfig,
	/// Token cache consulted before every exchange.
	pub cache: Arc<dyn CredentialCache>,
	/// HTTP client used for every outbound request.
	pub http_client: ReqwestHttpClient,
	single_flight: bool,
	flow_guards: Arc<Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>>,
}
impl UspsClient {
	/// Creates a client with a private in-memory cache.
	pub fn new(config: impl Into<ClientConfig>) -> Self {
		Self::with_cache(config, Arc::new(MemoryCache::default()))
	}

	/// Creates a client that stores tokens in the caller-provided cache.
	pub fn with_cache(config: impl Into<ClientConfig>, cache: Arc<dyn CredentialCache>) -> Self {
		Self {
			config: config.into(),
			cache,
			http_client: ReqwestHttpClient::default(),
			single_flight: false,
			flow_guards: Default::default(),
		}
	}

	/// Replaces the HTTP client.
	pub fn with_http_client(mut self, http_client: impl Into<ReqwestHttpClient>) -> Self {
		self.http_client = http_client.into();

		self
	}

	/// Serializes concurrent token exchanges for the same cache key when `enabled`.
	pub fn with_single_flight(mut self, enabled: bool) -> Self {
		self.single_flight = enabled;

		self
	}

	/// Returns the configured credentials.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.config.credentials
	}

	/// Drops this client's cached token so the next call performs a fresh exchange.
	pub fn invalidate_token(&self) -> Option<AccessToken> {
		self.cache.remove(&self.credentials().cache_key())
	}

	fn timeout(&self, options: RequestOptions) -> StdDuration {
		options.timeout.unwrap_or(self.config.timeout)
	}
}
impl Debug for UspsClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UspsClient")
			.field("config", &self.config)
			.field("single_flight", &self.single_flight)
			.finish()
	}
}
