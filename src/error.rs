//! Client-level error types shared by token acquisition, tracking queries, and configuration.
//!
//! Every failure surfaced by [`UspsClient`](crate::client::UspsClient) is an [`Error`]. Callers
//! that only need to branch on the failure category use [`Error::kind`]; callers that need the
//! upstream payload use [`Error::status_code`], [`Error::raw_text`], or [`Error::parsed_json`]
//! without matching on individual variants.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Discriminator describing which category an [`Error`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	/// Base URL or endpoint URL could not be built; raised before any network I/O.
	InvalidUrl,
	/// Upstream answered with a non-success status.
	Http,
	/// The request exceeded its timeout and was cancelled.
	Timeout,
	/// Network failure (DNS, TCP, TLS) or an unreadable response.
	Transport,
	/// A success response carried a body that does not match the expected shape.
	Decode,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::InvalidUrl => "invalid_url",
			ErrorKind::Http => "http",
			ErrorKind::Timeout => "timeout",
			ErrorKind::Transport => "transport",
			ErrorKind::Decode => "decode",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Endpoint URL could not be constructed from the configured environment URL.
	#[error("Failed to parse URL from {url}.")]
	InvalidUrl {
		/// Raw URL text that failed to parse.
		url: String,
		/// Why the URL was rejected.
		#[source]
		source: UrlError,
	},
	/// Non-success HTTP response, normalized.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Request was cancelled after exceeding its timeout.
	#[error("Request to {endpoint} timed out after {timeout:?}.")]
	Timeout {
		/// Endpoint label (`token` or `tracking`).
		endpoint: &'static str,
		/// Timeout that elapsed.
		timeout: StdDuration,
	},
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Transport {
		/// Endpoint label (`token` or `tracking`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Success response body could not be decoded.
	#[error("The {endpoint} endpoint returned a malformed body.")]
	Decode {
		/// Endpoint label (`token` or `tracking`).
		endpoint: &'static str,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
			Self::Http(_) => ErrorKind::Http,
			Self::Timeout { .. } => ErrorKind::Timeout,
			Self::Transport { .. } => ErrorKind::Transport,
			Self::Decode { .. } => ErrorKind::Decode,
		}
	}

	/// HTTP status code, only present for [`ErrorKind::Http`].
	pub fn status_code(&self) -> Option<u16> {
		match self {
			Self::Http(e) => Some(e.status_code),
			_ => None,
		}
	}

	/// Raw response body, only present for [`ErrorKind::Http`].
	pub fn raw_text(&self) -> Option<&str> {
		match self {
			Self::Http(e) => Some(&e.raw_text),
			_ => None,
		}
	}

	/// Response body parsed as JSON, present when the error body was valid JSON.
	pub fn parsed_json(&self) -> Option<&serde_json::Value> {
		match self {
			Self::Http(e) => e.parsed_json.as_ref(),
			_ => None,
		}
	}

	/// Human-readable message; for [`ErrorKind::Http`] this is `"{status} {reason}"`.
	pub fn message(&self) -> String {
		match self {
			Self::Http(e) => e.message.clone(),
			_ => self.to_string(),
		}
	}

	/// Returns the normalized HTTP error, if this is one.
	pub fn as_http(&self) -> Option<&HttpError> {
		match self {
			Self::Http(e) => Some(e),
			_ => None,
		}
	}

	pub(crate) fn invalid_url(url: impl Into<String>, source: impl Into<UrlError>) -> Self {
		Self::InvalidUrl { url: url.into(), source: source.into() }
	}

	pub(crate) fn transport(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { endpoint, source: Box::new(src) }
	}
}

/// Reasons an endpoint URL is rejected before any network I/O.
#[derive(Debug, ThisError)]
pub enum UrlError {
	/// Text is not a URL.
	#[error(transparent)]
	Parse(#[from] url::ParseError),
	/// Only `http` and `https` can reach the API.
	#[error("Unsupported URL scheme `{scheme}`; expected http or https.")]
	UnsupportedScheme {
		/// Scheme that was supplied.
		scheme: String,
	},
	/// URL lacks a host.
	#[error("URL has no host.")]
	MissingHost,
	/// Transport refused to build the request from the URL.
	#[error("Request could not be built from the URL.")]
	Request(#[source] ReqwestError),
}

/// Uniform shape for any non-success HTTP response from either endpoint.
///
/// Built by [`HttpError::from_response`](crate::http); callers branch on
/// [`status_code`](HttpError::status_code) instead of per-endpoint error types.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{message}")]
pub struct HttpError {
	/// Numeric HTTP status.
	pub status_code: u16,
	/// `"{status} {reason}"`, e.g. `"500 Internal Server Error"`.
	pub message: String,
	/// Raw response body.
	pub raw_text: String,
	/// Response body parsed as JSON; `None` when the body is not JSON.
	pub parsed_json: Option<serde_json::Value>,
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// Client identifier was not supplied or is blank.
	#[error("Missing client identifier.")]
	MissingClientId,
	/// Client secret was not supplied or is blank.
	#[error("Missing client secret.")]
	MissingClientSecret,
	/// Timeout must be greater than zero.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn http_error_exposes_status_and_body() {
		let err: Error = HttpError {
			status_code: 422,
			message: "422 Unprocessable Entity".into(),
			raw_text: "{\"error\":\"invalid\"}".into(),
			parsed_json: Some(serde_json::json!({ "error": "invalid" })),
		}
		.into();

		assert_eq!(err.kind(), ErrorKind::Http);
		assert_eq!(err.status_code(), Some(422));
		assert_eq!(err.to_string(), "422 Unprocessable Entity");
		assert_eq!(err.message(), "422 Unprocessable Entity");
		assert_eq!(err.raw_text(), Some("{\"error\":\"invalid\"}"));
		assert_eq!(
			err.parsed_json().and_then(|json| json.get("error")).and_then(|v| v.as_str()),
			Some("invalid")
		);
	}

	#[test]
	fn invalid_url_has_no_status() {
		let source =
			Url::parse("invalid/oauth2/v3/token").expect_err("Relative URL fixture should fail.");
		let err = Error::invalid_url("invalid/oauth2/v3/token", source);

		assert_eq!(err.kind(), ErrorKind::InvalidUrl);
		assert_eq!(err.status_code(), None);
		assert!(err.raw_text().is_none());
		assert_eq!(err.to_string(), "Failed to parse URL from invalid/oauth2/v3/token.");
		assert!(StdError::source(&err).is_some());
		assert_eq!(err.message(), "Failed to parse URL from invalid/oauth2/v3/token.");
	}

	#[test]
	fn kind_labels_are_stable() {
		assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
		assert_eq!(ErrorKind::InvalidUrl.as_str(), "invalid_url");
	}
}
