//! Transport wrapper and HTTP error normalization.
//!
//! Both endpoints funnel their responses through [`dispatch`], which applies the per-request
//! timeout, maps reqwest failures onto [`Error`] kinds, and turns any non-success status into
//! an [`HttpError`] built by [`HttpError::from_response`].

// std
use std::ops::Deref;
// crates.io
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{HttpError, UrlError},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self::with_client(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl HttpError {
	/// Normalizes a non-success response, consuming its body.
	///
	/// A body that cannot be read is treated as empty.
	pub async fn from_response(response: Response) -> Self {
		let status = response.status();
		let raw_text = response.text().await.unwrap_or_default();

		Self::from_parts(status, raw_text)
	}

	/// Builds the normalized error from a status and raw body text.
	pub fn from_parts(status: StatusCode, raw_text: impl Into<String>) -> Self {
		let raw_text = raw_text.into();
		let message = match status.canonical_reason() {
			Some(reason) => format!("{} {reason}", status.as_u16()),
			None => status.as_u16().to_string(),
		};
		let parsed_json = parse_error_body(&raw_text);

		Self { status_code: status.as_u16(), message, raw_text, parsed_json }
	}
}

/// Structured view of an error body; `None` when the body is not JSON.
fn parse_error_body(raw_text: &str) -> Option<serde_json::Value> {
	serde_json::from_str(raw_text).ok()
}

/// Sends `request` bounded by `timeout` and returns the response when its status is a success.
pub(crate) async fn dispatch(
	endpoint: &'static str,
	request: RequestBuilder,
	timeout: StdDuration,
) -> Result<Response> {
	let response = request
		.timeout(timeout)
		.send()
		.await
		.map_err(|e| map_reqwest_error(endpoint, timeout, e))?;

	if response.status().is_success() {
		Ok(response)
	} else {
		Err(HttpError::from_response(response).await.into())
	}
}

/// Reads a success body and decodes it as `T`, reporting the failing JSON path on mismatch.
pub(crate) async fn read_json<T>(
	endpoint: &'static str,
	response: Response,
	timeout: StdDuration,
) -> Result<T>
where
	T: DeserializeOwned,
{
	let bytes = response.bytes().await.map_err(|e| map_reqwest_error(endpoint, timeout, e))?;
	let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { endpoint, source })
}

pub(crate) fn map_reqwest_error(
	endpoint: &'static str,
	timeout: StdDuration,
	err: ReqwestError,
) -> Error {
	if err.is_builder() {
		let url = err.url().map(ToString::to_string).unwrap_or_default();

		Error::InvalidUrl { url, source: UrlError::Request(err) }
	} else if err.is_timeout() {
		Error::Timeout { endpoint, timeout }
	} else {
		Error::transport(endpoint, err)
	}
}
