//! Client configuration and its validating builder.

// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, DEFAULT_ENVIRONMENT_URL, Secret},
	error::ConfigError,
};

/// Per-request timeout applied when neither the call nor the config overrides it.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_millis(30_000);

/// Immutable configuration owned by a [`UspsClient`](crate::client::UspsClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Credentials and environment URL.
	pub credentials: ClientCredentials,
	/// Default request timeout.
	pub timeout: StdDuration,
}
impl ClientConfig {
	/// Wraps credentials with the default timeout; performs no validation.
	pub fn new(credentials: ClientCredentials) -> Self {
		Self { credentials, timeout: DEFAULT_TIMEOUT }
	}

	/// Returns a builder that validates its inputs.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}
impl From<ClientCredentials> for ClientConfig {
	fn from(credentials: ClientCredentials) -> Self {
		Self::new(credentials)
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// OAuth 2.0 client identifier.
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	pub client_secret: Option<Secret>,
	/// Environment URL; defaults to [`DEFAULT_ENVIRONMENT_URL`].
	pub environment_url: Option<String>,
	/// Default request timeout; defaults to [`DEFAULT_TIMEOUT`].
	pub timeout: Option<StdDuration>,
}
impl ClientConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the environment URL.
	pub fn environment_url(mut self, url: impl Into<String>) -> Self {
		self.environment_url = Some(url.into());

		self
	}

	/// Sets the default request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting config.
	///
	/// The environment URL is intentionally not parsed here; see [`ClientCredentials`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let client_id = self
			.client_id
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingClientId)?;
		let client_secret = self
			.client_secret
			.filter(|value| !value.is_blank())
			.ok_or(ConfigError::MissingClientSecret)?;
		let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

		if timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let credentials = ClientCredentials {
			client_id,
			client_secret,
			environment_url: self.environment_url.unwrap_or_else(|| DEFAULT_ENVIRONMENT_URL.into()),
		};

		Ok(ClientConfig { credentials, timeout })
	}
}
