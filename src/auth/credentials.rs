//! Client credentials and endpoint resolution.

// self
use crate::{_prelude::*, auth::Secret, cache::CacheKey, error::UrlError};

/// USPS testing environment; used when no environment URL is configured.
pub const DEFAULT_ENVIRONMENT_URL: &str = "https://apis-tem.usps.com";
/// USPS production environment.
pub const PRODUCTION_ENVIRONMENT_URL: &str = "https://apis.usps.com";

/// OAuth 2.0 client-credentials pair plus the environment it is valid for.
///
/// The environment URL is stored exactly as supplied and only parsed when an endpoint is
/// resolved, so a malformed value fails the operation that needed it with
/// [`ErrorKind::InvalidUrl`](crate::error::ErrorKind::InvalidUrl) before any network I/O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier (the USPS consumer key).
	pub client_id: String,
	/// OAuth 2.0 client secret (the USPS consumer secret).
	pub client_secret: Secret,
	/// Base URL of the API environment.
	pub environment_url: String,
}
impl ClientCredentials {
	/// Creates credentials targeting [`DEFAULT_ENVIRONMENT_URL`].
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<Secret>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			environment_url: DEFAULT_ENVIRONMENT_URL.into(),
		}
	}

	/// Overrides the environment URL.
	pub fn with_environment_url(mut self, url: impl Into<String>) -> Self {
		self.environment_url = url.into();

		self
	}

	/// Cache key under which this client's token is stored.
	pub fn cache_key(&self) -> CacheKey {
		CacheKey::for_client(&self.client_id)
	}

	/// Resolves `path` against the environment URL.
	///
	/// The path is appended textually (`{environment_url}{path}`), mirroring how the API
	/// documents its endpoints; a trailing `/` on the environment URL is ignored. Only `http`
	/// and `https` URLs with a host are accepted.
	pub fn endpoint(&self, path: &str) -> Result<Url> {
		let raw = format!("{}{path}", self.environment_url.trim_end_matches('/'));
		let url = match Url::parse(&raw) {
			Ok(url) => url,
			Err(source) => return Err(Error::invalid_url(raw, source)),
		};

		if !matches!(url.scheme(), "http" | "https") {
			let scheme = url.scheme().to_owned();

			return Err(Error::invalid_url(raw, UrlError::UnsupportedScheme { scheme }));
		}
		if !url.has_host() {
			return Err(Error::invalid_url(raw, UrlError::MissingHost));
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn endpoint_appends_path() {
		let credentials = ClientCredentials::new("id", "secret");
		let url = credentials.endpoint("/oauth2/v3/token").expect("Default URL should resolve.");

		assert_eq!(url.as_str(), "https://apis-tem.usps.com/oauth2/v3/token");

		let credentials = credentials.with_environment_url("https://apis.usps.com/");
		let url = credentials.endpoint("/tracking/v3r2/tracking").expect("URL should resolve.");

		assert_eq!(url.as_str(), "https://apis.usps.com/tracking/v3r2/tracking");
	}

	#[test]
	fn endpoint_rejects_malformed_environment() {
		let credentials = ClientCredentials::new("id", "secret").with_environment_url("invalid");
		let err = credentials.endpoint("/oauth2/v3/token").expect_err("Relative URL must fail.");

		assert_eq!(err.kind(), ErrorKind::InvalidUrl);
		assert_eq!(err.to_string(), "Failed to parse URL from invalid/oauth2/v3/token.");
	}

	#[test]
	fn endpoint_rejects_non_http_schemes() {
		for environment in
			["ftp://example.com", "file:///tmp", "mailto:someone@example.com", "data:text/plain,hi"]
		{
			let credentials =
				ClientCredentials::new("id", "secret").with_environment_url(environment);
			let err = credentials
				.endpoint("/oauth2/v3/token")
				.expect_err("Non-HTTP environment URLs must fail.");

			assert_eq!(err.kind(), ErrorKind::InvalidUrl, "Unexpected kind for {environment}.");
			assert!(matches!(
				err,
				Error::InvalidUrl { source: UrlError::UnsupportedScheme { .. }, .. }
			));
		}
	}

	#[test]
	fn cache_key_is_scoped_by_client_id() {
		let a = ClientCredentials::new("alpha", "secret");
		let b = ClientCredentials::new("beta", "secret");

		assert_eq!(a.cache_key().as_str(), "oauth:alpha");
		assert_ne!(a.cache_key(), b.cache_key());
	}
}
