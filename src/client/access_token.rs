//! OAuth 2.0 client-credentials token acquisition with caching.
//!
//! [`UspsClient::access_token`] returns the cached token while it is live and otherwise posts
//! the client credentials to the token endpoint. Successful exchanges are cached for half of
//! the advertised lifetime; failures are never cached.

// crates.io
use reqwest::header::CONTENT_TYPE;
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	cache::{self, CacheKey},
	client::{RequestOptions, TOKEN_PATH, UspsClient, common},
	http,
	obs::{self, CacheLookup, CallKind, CallOutcome, CallSpan},
};

const ENDPOINT: &str = "token";

impl UspsClient {
	/// Returns a live access token, exchanging the client credentials on a cache miss.
	pub async fn access_token(&self, options: RequestOptions) -> Result<AccessToken> {
		const KIND: CallKind = CallKind::AccessToken;

		let span = CallSpan::new(KIND, "access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.resolve_access_token(options)).await;

		common::record_result(KIND, &result);

		result
	}

	async fn resolve_access_token(&self, options: RequestOptions) -> Result<AccessToken> {
		let key = self.credentials().cache_key();

		if let Some(token) = self.cached_token(&key) {
			return Ok(token);
		}

		if !self.single_flight {
			return self.exchange_client_credentials(key, options).await;
		}

		let guard = common::flow_guard(self, &key);
		let _singleflight = guard.lock().await;

		// A concurrent caller may have finished the exchange while this one waited.
		if let Some(token) = self.cached_token(&key) {
			return Ok(token);
		}

		self.exchange_client_credentials(key, options).await
	}

	fn cached_token(&self, key: &CacheKey) -> Option<AccessToken> {
		let cached = self.cache.get(key);
		let lookup = if cached.is_some() { CacheLookup::Hit } else { CacheLookup::Miss };

		obs::trace_cache_lookup(key, lookup);
		obs::record_cache_lookup(lookup);

		cached
	}

	async fn exchange_client_credentials(
		&self,
		key: CacheKey,
		options: RequestOptions,
	) -> Result<AccessToken> {
		let credentials = self.credentials();
		let url = credentials.endpoint(TOKEN_PATH)?;
		let timeout = self.timeout(options);
		let form = Serializer::new(String::new())
			.append_pair("client_id", &credentials.client_id)
			.append_pair("client_secret", credentials.client_secret.expose())
			.append_pair("grant_type", "client_credentials")
			.finish();
		let request = self
			.http_client
			.post(url)
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(form);
		let response = http::dispatch(ENDPOINT, request, timeout).await?;
		let token = http::read_json::<AccessToken>(ENDPOINT, response, timeout).await?;

		self.cache.put(key, token.clone(), cache::token_ttl(&token));

		Ok(token)
	}
}
